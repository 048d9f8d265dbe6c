//! intelliprompt コマンドのドメイン型

pub mod command;

pub use command::{IpCommand, ListFilter, RefineSource, SaveAs, SortOrder};

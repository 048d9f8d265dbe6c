//! intelliprompt 固有のアダプター（端末との対話・設定ファイル）

pub mod config;
pub mod confirmation;
pub mod console_observer;

pub use config::{load_app_config, AppConfig};
pub use confirmation::{AssumeYesConfirmation, CliConfirmation, NonInteractiveConfirmation};
pub use console_observer::ConsoleObserver;

//! ユースケース層（ポート経由で I/O を行い、表示は CLI に任せる）

pub mod generate;
pub mod library;
pub mod templates;
pub mod transfer;

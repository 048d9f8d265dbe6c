//! Ports & Adapters のポート定義
//!
//! - inbound: CLI がアプリを呼び出す入り口
//! - outbound: common::ports::outbound を使う（アプリ固有の outbound は無し）

pub mod inbound;

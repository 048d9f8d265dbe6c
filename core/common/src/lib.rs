//! IntelliPrompt 共通ライブラリ
//!
//! `intelliprompt` コマンドが使うドメイン型・ポート・アダプター・Prompt Store・生成クライアントを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Prompt, Category, Theme, 通知）
pub mod domain;

/// Outbound ポート（trait）
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// Prompt Store（状態と永続化）
pub mod store;

/// リモート生成クライアント
pub mod llm;

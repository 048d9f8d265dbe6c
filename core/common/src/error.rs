//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。CLI は `exit_code()` で終了コードに変換する。

use thiserror::Error;

/// エラー型
#[derive(Debug, Error)]
pub enum Error {
    /// 引数・入力の不正（終了コード 64）
    #[error("{0}")]
    InvalidArgument(String),

    /// ファイル・ストレージ I/O
    #[error("{0}")]
    Io(String),

    /// JSON のパース・シリアライズ
    #[error("{0}")]
    Json(String),

    /// リモート生成サービス（HTTP 層・レスポンス形式）
    #[error("{0}")]
    Http(String),

    /// 環境変数・設定の不足
    #[error("{0}")]
    Env(String),

    /// 入力データの検証失敗（インポート等）
    #[error("{0}")]
    Validation(String),

    /// 無料生成回数を使い切った
    #[error("{0}")]
    UsageLimit(String),

    /// その他の内部エラー
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn usage_limit(msg: impl Into<String>) -> Self {
        Self::UsageLimit(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// 使い方の誤り（usage を表示すべき）か
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード（sysexits 準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::Validation(_) => 64,
            Self::UsageLimit(_) => 69,
            Self::Env(_) => 78,
            _ => 70,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

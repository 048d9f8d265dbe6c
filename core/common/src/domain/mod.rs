//! ドメイン型（Newtype）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

pub mod category;
pub mod notification;
pub mod prompt;
pub mod theme;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use category::Category;
pub use notification::{Notification, NotificationKind, NOTIFICATION_TTL_MS};
pub use prompt::{NewPrompt, Prompt};
pub use theme::Theme;

/// ホームディレクトリのパス（ストレージ・ログ・設定の起点）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// キー・バリューストレージの格納先
    pub fn storage_dir(&self) -> PathBuf {
        self.0.join("storage")
    }

    /// JSONL ログファイル
    pub fn log_file(&self) -> PathBuf {
        self.0.join("logs").join("intelliprompt.jsonl")
    }

    pub fn config_file(&self) -> PathBuf {
        self.0.join("config.json")
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

/// Prompt ID（生成後は不変。コレクションごとに一意）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(String);

impl PromptId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for PromptId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for PromptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PromptId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PromptId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// 生成プロバイダ名（gemini, echo）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderName(String);

impl ProviderName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for ProviderName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ProviderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// モデル名（gemini-2.5-flash 等）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName(String);

impl ModelName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for ModelName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_id_serializes_as_plain_string() {
        let id = PromptId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        assert_eq!(&*id, "abc");
    }

    #[test]
    fn test_home_dir_paths() {
        let home = HomeDir::new("/tmp/ip");
        assert_eq!(home.storage_dir(), PathBuf::from("/tmp/ip/storage"));
        assert_eq!(home.log_file(), PathBuf::from("/tmp/ip/logs/intelliprompt.jsonl"));
        assert_eq!(home.config_file(), PathBuf::from("/tmp/ip/config.json"));
    }
}

//! Prompt レコード（個人ライブラリ・コミュニティ共通）
//!
//! JSON の形はストレージ永続化・エクスポート・インポートで共通。

use super::{Category, PromptId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: PromptId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub content: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    /// 個人の未公開エントリでは None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// コミュニティを経由したエントリのみ Some（未計測と 0 を区別する）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_published: bool,
}

impl Prompt {
    /// rating と downloads の両方を持つ（コミュニティで計測済み）か
    pub fn is_measured(&self) -> bool {
        self.rating.is_some() && self.downloads.is_some()
    }

    /// メトリクスを外したコピー（未計測扱い）
    pub fn without_metrics(&self) -> Self {
        Self {
            rating: None,
            downloads: None,
            ..self.clone()
        }
    }
}

/// addPrompt の入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrompt {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Prompt {
        Prompt {
            id: PromptId::new("p1"),
            title: "Title".to_string(),
            description: "Desc".to_string(),
            content: "Body".to_string(),
            category: Category::Coding,
            created_at: Utc.with_ymd_and_hms(2024, 7, 3, 11, 0, 0).unwrap(),
            author: None,
            rating: None,
            downloads: None,
            is_favorite: false,
            is_published: false,
        }
    }

    #[test]
    fn test_serialize_omits_absent_metrics() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["category"], "Coding");
        assert_eq!(json["createdAt"], "2024-07-03T11:00:00Z");
        assert_eq!(json["isFavorite"], false);
        assert!(json.get("rating").is_none());
        assert!(json.get("downloads").is_none());
        assert!(json.get("author").is_none());
    }

    #[test]
    fn test_measured_zero_differs_from_unmeasured() {
        let mut p = sample();
        assert!(!p.is_measured());
        p.rating = Some(0.0);
        p.downloads = Some(0);
        assert!(p.is_measured());
        assert!(!p.without_metrics().is_measured());
    }

    #[test]
    fn test_deserialize_defaults_flags() {
        let json = r#"{"id":"x","title":"T","content":"C","category":"Travel","createdAt":"2024-01-01T00:00:00Z"}"#;
        let p: Prompt = serde_json::from_str(json).unwrap();
        assert!(!p.is_favorite);
        assert!(!p.is_published);
        assert_eq!(p.description, "");
    }
}

//! プロンプトのカテゴリ（固定の列挙）
//!
//! JSON 上は表示ラベルで保存する。旧バージョンのエクスポートに含まれる
//! スペイン語ラベルも読み込み時に受け付ける。

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Marketing")]
    Marketing,
    #[serde(rename = "Education", alias = "Educación")]
    Education,
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[serde(rename = "Writing", alias = "Escritura")]
    Writing,
    #[serde(rename = "Creativity", alias = "Creatividad")]
    Creativity,
    #[serde(rename = "Data Analysis", alias = "Análisis de datos")]
    DataAnalysis,
    #[serde(rename = "Coding", alias = "Codificación")]
    Coding,
    #[serde(rename = "Research", alias = "Investigación")]
    Research,
    #[serde(rename = "Business", alias = "Negocios")]
    Business,
    #[serde(rename = "Technology", alias = "Tecnología")]
    Technology,
    #[serde(rename = "Health", alias = "Salud y Bienestar")]
    Health,
    #[serde(rename = "Finance", alias = "Finanzas")]
    Finance,
    #[serde(rename = "Travel", alias = "Viajes")]
    Travel,
    #[serde(rename = "Design", alias = "Arte y Diseño")]
    Design,
    #[serde(rename = "Other", alias = "Otras")]
    Other,
}

impl Category {
    /// 全カテゴリ（表示順）
    pub const ALL: [Category; 15] = [
        Category::Marketing,
        Category::Education,
        Category::SocialMedia,
        Category::Writing,
        Category::Creativity,
        Category::DataAnalysis,
        Category::Coding,
        Category::Research,
        Category::Business,
        Category::Technology,
        Category::Health,
        Category::Finance,
        Category::Travel,
        Category::Design,
        Category::Other,
    ];

    /// 表示ラベル（JSON 上の値と同じ）
    pub fn label(&self) -> &'static str {
        match self {
            Self::Marketing => "Marketing",
            Self::Education => "Education",
            Self::SocialMedia => "Social Media",
            Self::Writing => "Writing",
            Self::Creativity => "Creativity",
            Self::DataAnalysis => "Data Analysis",
            Self::Coding => "Coding",
            Self::Research => "Research",
            Self::Business => "Business",
            Self::Technology => "Technology",
            Self::Health => "Health",
            Self::Finance => "Finance",
            Self::Travel => "Travel",
            Self::Design => "Design",
            Self::Other => "Other",
        }
    }

    /// CLI 引数向けのスラッグ（例: social-media）
    pub fn slug(&self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// ラベル・スラッグ（ハイフン/アンダースコア区切り）を大文字小文字を区別せずに解釈する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().to_lowercase() == normalized)
            .ok_or_else(|| {
                let names: Vec<String> = Category::ALL.iter().map(|c| c.slug()).collect();
                Error::invalid_argument(format!(
                    "Unknown category '{}'. Expected one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

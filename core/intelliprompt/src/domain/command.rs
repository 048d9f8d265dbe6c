//! intelliprompt コマンドの enum（Command Pattern）
//!
//! サブコマンドごとの入力を enum で明示し、main の Runner が 1 か所で match する。

use common::domain::{Category, PromptId};
use common::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

/// 個人ライブラリ一覧の絞り込み
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Favorites,
}

/// コミュニティ一覧の並び順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// createdAt の新しい順
    #[default]
    Newest,
    /// rating 降順（同点は downloads 降順）
    Rating,
    /// downloads 降順（同点は rating 降順）
    Downloads,
}

impl SortOrder {
    pub const NAMES: [&'static str; 3] = ["newest", "rating", "downloads"];
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "rating" => Ok(Self::Rating),
            "downloads" | "popular" => Ok(Self::Downloads),
            other => Err(Error::invalid_argument(format!(
                "Unknown sort order '{}'. Expected one of: {}",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// 生成結果を個人ライブラリに保存するときの指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAs {
    pub title: String,
    pub category: Option<Category>,
}

/// refine の対象となる現在のプロンプト本文の取得元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefineSource {
    /// 個人ライブラリのエントリ
    Prompt(PromptId),
    /// テキストファイル
    File(PathBuf),
}

/// intelliprompt の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum IpCommand {
    /// 個人ライブラリ一覧
    List { filter: ListFilter },
    /// 1 件を全文表示（既定は個人、community=true でコミュニティ）
    Show { id: PromptId, community: bool },
    Add {
        title: String,
        description: String,
        content: String,
        category: Category,
    },
    Delete { id: PromptId },
    Favorite { id: PromptId },
    Publish { id: PromptId },
    /// コミュニティ検索
    Community {
        search: Option<String>,
        category: Option<Category>,
        sort: SortOrder,
    },
    /// 計測済みコミュニティエントリの上位
    Recommended,
    /// プロンプト本文を .txt として書き出す（コミュニティはダウンロード数も増やす）
    Download {
        id: PromptId,
        personal: bool,
        out_dir: Option<PathBuf>,
    },
    Import { file: PathBuf },
    Export { output: Option<PathBuf> },
    Generate {
        idea: Option<String>,
        template: Option<String>,
        context_file: Option<PathBuf>,
        save: Option<SaveAs>,
    },
    Refine {
        source: RefineSource,
        feedback: String,
        idea: Option<String>,
        context_file: Option<PathBuf>,
        save: Option<SaveAs>,
    },
    /// スターターテンプレート一覧
    Templates,
    Dashboard,
    Credits,
    /// テーマ表示（toggle=true で切り替え）
    Theme { toggle: bool },
}

impl IpCommand {
    /// ログ用のコマンド名
    pub fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Show { .. } => "show",
            Self::Add { .. } => "add",
            Self::Delete { .. } => "delete",
            Self::Favorite { .. } => "favorite",
            Self::Publish { .. } => "publish",
            Self::Community { .. } => "community",
            Self::Recommended => "recommended",
            Self::Download { .. } => "download",
            Self::Import { .. } => "import",
            Self::Export { .. } => "export",
            Self::Generate { .. } => "generate",
            Self::Refine { .. } => "refine",
            Self::Templates => "templates",
            Self::Dashboard => "dashboard",
            Self::Credits => "credits",
            Self::Theme { .. } => "theme",
        }
    }
}

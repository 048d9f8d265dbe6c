//! ライブラリの読み取り専用クエリ
//!
//! 検索・並び替え・推薦・ダッシュボード集計。store の状態は変更しない。

use crate::domain::{ListFilter, SortOrder};
use common::domain::{Category, Prompt};
use std::cmp::Ordering;

/// エクスポートファイルの既定名
pub const EXPORT_FILE_NAME: &str = "intelliprompt_export.json";

/// 推薦に出す最大件数
pub const RECOMMENDED_LIMIT: usize = 12;

/// ダッシュボードに出すお気に入りの最大件数
pub const DASHBOARD_FAVORITES: usize = 4;

fn rating_of(p: &Prompt) -> f64 {
    p.rating.unwrap_or(0.0)
}

fn downloads_of(p: &Prompt) -> u64 {
    p.downloads.unwrap_or(0)
}

fn by_rating_then_downloads(a: &Prompt, b: &Prompt) -> Ordering {
    rating_of(b)
        .total_cmp(&rating_of(a))
        .then_with(|| downloads_of(b).cmp(&downloads_of(a)))
}

fn by_downloads_then_rating(a: &Prompt, b: &Prompt) -> Ordering {
    downloads_of(b)
        .cmp(&downloads_of(a))
        .then_with(|| rating_of(b).total_cmp(&rating_of(a)))
}

/// コミュニティ検索。search はタイトルか作者に対する大文字小文字を区別しない部分一致
pub fn search_community<'a>(
    prompts: &'a [Prompt],
    search: Option<&str>,
    category: Option<Category>,
    sort: SortOrder,
) -> Vec<&'a Prompt> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    let mut hits: Vec<&Prompt> = prompts
        .iter()
        .filter(|p| match &needle {
            Some(n) => {
                p.title.to_lowercase().contains(n.as_str())
                    || p
                        .author
                        .as_deref()
                        .map(|a| a.to_lowercase().contains(n.as_str()))
                        .unwrap_or(false)
            }
            None => true,
        })
        .filter(|p| category.map(|c| p.category == c).unwrap_or(true))
        .collect();
    match sort {
        SortOrder::Newest => hits.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Rating => hits.sort_by(|a, b| by_rating_then_downloads(a, b)),
        SortOrder::Downloads => hits.sort_by(|a, b| by_downloads_then_rating(a, b)),
    }
    hits
}

/// 計測済みのエントリを rating → downloads の順に上位 RECOMMENDED_LIMIT 件
pub fn recommended(prompts: &[Prompt]) -> Vec<&Prompt> {
    let mut measured: Vec<&Prompt> = prompts.iter().filter(|p| p.is_measured()).collect();
    measured.sort_by(|a, b| by_rating_then_downloads(a, b));
    measured.truncate(RECOMMENDED_LIMIT);
    measured
}

pub fn filter_personal(prompts: &[Prompt], filter: ListFilter) -> Vec<&Prompt> {
    prompts
        .iter()
        .filter(|p| filter == ListFilter::All || p.is_favorite)
        .collect()
}

/// ダッシュボードの集計結果
#[derive(Debug)]
pub struct DashboardSummary<'a> {
    pub total: usize,
    /// 1 件以上あるカテゴリのみ（Category::ALL の順）
    pub by_category: Vec<(Category, usize)>,
    pub favorites: Vec<&'a Prompt>,
}

pub fn dashboard(prompts: &[Prompt]) -> DashboardSummary<'_> {
    let by_category = Category::ALL
        .iter()
        .map(|c| (*c, prompts.iter().filter(|p| p.category == *c).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let favorites = prompts
        .iter()
        .filter(|p| p.is_favorite)
        .take(DASHBOARD_FAVORITES)
        .collect();
    DashboardSummary {
        total: prompts.len(),
        by_category,
        favorites,
    }
}

/// ダウンロード時のファイル名: 英数字以外を `_` にして小文字化し .txt を付ける
pub fn download_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.txt", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::domain::PromptId;

    fn prompt(id: &str, title: &str, created: &str) -> Prompt {
        let json = format!(
            r#"{{"id":"{}","title":"{}","content":"c","category":"Coding","createdAt":"{}"}}"#,
            id, title, created
        );
        serde_json::from_str(&json).unwrap()
    }

    fn measured(id: &str, rating: f64, downloads: u64) -> Prompt {
        Prompt {
            id: PromptId::new(id),
            rating: Some(rating),
            downloads: Some(downloads),
            ..prompt(id, id, "2024-01-01T00:00:00Z")
        }
    }

    fn ids(ps: &[&Prompt]) -> Vec<String> {
        ps.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_search_matches_title_or_author_case_insensitive() {
        let mut a = prompt("a", "Launch Email", "2024-01-01T00:00:00Z");
        a.author = Some("Ana".to_string());
        let mut b = prompt("b", "SQL helper", "2024-01-02T00:00:00Z");
        b.author = Some("EMAIL GURU".to_string());
        let c = prompt("c", "Travel plan", "2024-01-03T00:00:00Z");
        let all = vec![a, b, c];
        let hits = search_community(&all, Some("email"), None, SortOrder::Newest);
        assert_eq!(ids(&hits), vec!["b", "a"]);
        let hits = search_community(&all, Some("  "), None, SortOrder::Newest);
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_search_category_filter() {
        let mut a = prompt("a", "A", "2024-01-01T00:00:00Z");
        a.category = Category::Travel;
        let b = prompt("b", "B", "2024-01-01T00:00:00Z");
        let all = vec![a, b];
        let hits = search_community(&all, None, Some(Category::Travel), SortOrder::Newest);
        assert_eq!(ids(&hits), vec!["a"]);
    }

    #[test]
    fn test_sort_rating_breaks_ties_by_downloads() {
        let all = vec![
            measured("low", 3.0, 999),
            measured("tie-few", 4.5, 10),
            measured("tie-many", 4.5, 50),
        ];
        let hits = search_community(&all, None, None, SortOrder::Rating);
        assert_eq!(ids(&hits), vec!["tie-many", "tie-few", "low"]);
    }

    #[test]
    fn test_sort_downloads_treats_absent_as_zero() {
        let unmeasured = prompt("none", "none", "2024-01-01T00:00:00Z");
        let all = vec![unmeasured, measured("x", 1.0, 5), measured("y", 2.0, 5)];
        let hits = search_community(&all, None, None, SortOrder::Downloads);
        assert_eq!(ids(&hits), vec!["y", "x", "none"]);
    }

    #[test]
    fn test_recommended_only_measured_top_twelve() {
        let mut all: Vec<Prompt> = (0..15)
            .map(|i| measured(&format!("m{}", i), i as f64 / 10.0, i))
            .collect();
        all.push(prompt("unmeasured", "u", "2024-01-01T00:00:00Z"));
        let rec = recommended(&all);
        assert_eq!(rec.len(), RECOMMENDED_LIMIT);
        assert_eq!(rec[0].id.as_str(), "m14");
        assert!(rec.iter().all(|p| p.is_measured()));
    }

    #[test]
    fn test_filter_personal_favorites() {
        let mut a = prompt("a", "A", "2024-01-01T00:00:00Z");
        a.is_favorite = true;
        let b = prompt("b", "B", "2024-01-01T00:00:00Z");
        let all = vec![a, b];
        assert_eq!(filter_personal(&all, ListFilter::All).len(), 2);
        assert_eq!(ids(&filter_personal(&all, ListFilter::Favorites)), vec!["a"]);
    }

    #[test]
    fn test_dashboard_counts_and_first_four_favorites() {
        let mut all: Vec<Prompt> = (0..6)
            .map(|i| {
                let mut p = prompt(&format!("f{}", i), "F", "2024-01-01T00:00:00Z");
                p.is_favorite = true;
                p
            })
            .collect();
        let mut travel = prompt("t", "T", "2024-01-01T00:00:00Z");
        travel.category = Category::Travel;
        all.push(travel);
        let summary = dashboard(&all);
        assert_eq!(summary.total, 7);
        assert_eq!(
            summary.by_category,
            vec![(Category::Coding, 6), (Category::Travel, 1)]
        );
        assert_eq!(ids(&summary.favorites), vec!["f0", "f1", "f2", "f3"]);
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(download_file_name("My Prompt: v2!"), "my_prompt__v2_.txt");
        assert_eq!(download_file_name("Diseño"), "dise_o.txt");
        assert_eq!(download_file_name(""), ".txt");
    }
}

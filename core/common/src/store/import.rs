//! インポート JSON の検証とデコード
//!
//! 入力は Prompt の配列（エクスポートと同じ形）。必須フィールドが欠けた要素や
//! Prompt として解釈できない要素は捨て、残りに既定値を補ってから返す。

use crate::domain::Prompt;
use crate::error::Error;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// 必須フィールド。null・空文字・false は欠落扱い
const REQUIRED_FIELDS: [&str; 4] = ["id", "title", "content", "category"];

/// importPrompts の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// 追加件数と、既存 id と重複して捨てた件数
    Imported { added: usize, duplicates: usize },
    /// 配列だったが有効な要素が 0 件
    NoValidPrompts,
    /// パース失敗・配列でない
    Failed { reason: String },
}

/// 生テキストを検証済み Prompt 列にする。配列として読めなければ Err
pub fn decode_import(raw: &str, now: DateTime<Utc>) -> Result<Vec<Prompt>, Error> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::validation(format!("Import file is not valid JSON: {}", e)))?;
    let Value::Array(items) = value else {
        return Err(Error::validation(
            "Invalid format: the file must contain an array of prompts.",
        ));
    };
    let created_at = timestamp_text(now);
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(obj) if has_required_fields(&obj) => Some(obj),
            _ => None,
        })
        .filter_map(|obj| decode_entry(obj, &created_at))
        .collect())
}

fn has_required_fields(obj: &Map<String, Value>) -> bool {
    REQUIRED_FIELDS
        .iter()
        .all(|k| obj.get(*k).map(is_present).unwrap_or(false))
}

fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// 欠けた createdAt に入れる文字列（ミリ秒精度の RFC 3339）
pub(super) fn timestamp_text(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 既定値を補って 1 件を Prompt にする。解釈できなければ None
pub(super) fn decode_entry(mut obj: Map<String, Value>, created_at: &str) -> Option<Prompt> {
    fill_missing(&mut obj, "createdAt", Value::String(created_at.to_string()));
    fill_missing(&mut obj, "isFavorite", Value::Bool(false));
    fill_missing(&mut obj, "isPublished", Value::Bool(false));
    serde_json::from_value(Value::Object(obj)).ok()
}

fn fill_missing(obj: &mut Map<String, Value>, key: &str, default: Value) {
    let absent = obj.get(key).map(Value::is_null).unwrap_or(true);
    if absent {
        obj.insert(key.to_string(), default);
    }
}

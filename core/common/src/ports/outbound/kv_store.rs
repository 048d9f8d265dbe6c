//! 端末ローカルの永続キー・バリューストレージ Outbound ポート
//!
//! コレクションは JSON 配列、クレジットは整数文字列、テーマは "light"/"dark" として
//! それぞれ固定キーに保存される。

use crate::error::Error;

/// キー・バリューストレージ抽象（Outbound ポート）
///
/// 実装は `common::adapter::FileKeyValueStore`（1 キー 1 ファイル）や
/// `MemoryKeyValueStore`（テスト・一時実行用）。
pub trait KeyValueStore: Send + Sync {
    /// 値を読む。キーが存在しなければ Ok(None)
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    /// 値を上書き保存する
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
}

//! ファイルシステム Outbound ポート
//!
//! キー・バリューストレージ、ログ、設定、インポート/エクスポート/ダウンロードは
//! この trait 経由でのみファイルに触れる。

use crate::error::Error;
use std::io::Write;
use std::path::Path;

/// ファイル I/O 抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdFileSystem`。エラーメッセージには対象パスを含める。
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;

    /// 上書き保存する。親ディレクトリは作らない
    fn write(&self, path: &Path, contents: &str) -> Result<(), Error>;

    /// 同一ディレクトリ内での置き換え（一時ファイル → 本体）に使う
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error>;

    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;

    /// 通常ファイルとして存在するか。ディレクトリや読めないパスは false
    fn is_file(&self, path: &Path) -> bool;

    /// 追記用に開く（無ければ作成）。返した Writer を drop すると閉じる
    fn open_append(&self, path: &Path) -> Result<Box<dyn Write + Send>, Error>;
}

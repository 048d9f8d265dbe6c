//! ファイルへ JSONL で追記する Log 実装
//!
//! ログの出力先はファイルのみ。ユーザー向けの通知表示とは別。

use crate::error::Error;
use crate::ports::outbound::{FileSystem, Log, LogRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let mut w = self.fs.open_append(&self.path)?;
        let line = serde_json::to_string(record)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }
}

/// 内側の Log に書いたうえで stderr にも 1 行出す（--verbose 用）
pub struct StderrMirrorLog {
    inner: Arc<dyn Log>,
}

impl StderrMirrorLog {
    pub fn new(inner: Arc<dyn Log>) -> Self {
        Self { inner }
    }
}

impl Log for StderrMirrorLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Ok(line) = serde_json::to_string(record) {
            eprintln!("[log] {}", line);
        }
        self.inner.log(record)
    }
}

/// 何も出力しない Log 実装（テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

//! 1 キー 1 ファイルで保存する KeyValueStore 実装
//!
//! `<dir>/<key>` に値をそのまま書く。書き込みは一時ファイル + rename で置き換える。

use crate::error::Error;
use crate::ports::outbound::{FileSystem, KeyValueStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// ファイルベースの KeyValueStore
pub struct FileKeyValueStore {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, Error> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

/// キーはファイル名としてそのまま使うため、英数字と `_` `-` `.` のみ許可する（`.` 始まりは不可）
fn validate_key(key: &str) -> Result<(), Error> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if ok {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!("Invalid storage key: '{}'", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.path_for(key)?;
        if !self.fs.is_file(&path) {
            return Ok(None);
        }
        self.fs.read_to_string(&path).map(Some)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path_for(key)?;
        self.fs.create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{}.tmp", key));
        self.fs.write(&tmp, value)?;
        self.fs.rename(&tmp, &path)
    }
}

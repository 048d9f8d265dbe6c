//! ファイル入出力を伴う操作（エクスポート・インポート・ダウンロード・コンテキスト読み込み）
//!
//! ファイルの読み書きは FileSystem ポート経由。store への反映と通知はここでまとめる。

use super::generate::FileContext;
use super::library::download_file_name;
use common::domain::{NotificationKind, PromptId};
use common::error::Error;
use common::ports::outbound::FileSystem;
use common::store::{ImportOutcome, PromptStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct TransferUseCase {
    fs: Arc<dyn FileSystem>,
}

impl TransferUseCase {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// 個人ライブラリ全体を整形済み JSON として書き出す
    pub fn export_to(&self, store: &mut PromptStore, path: &Path) -> Result<(), Error> {
        let json = store.export_prompts()?;
        self.fs.write(path, &json)?;
        store.show_notification("All prompts exported successfully!", NotificationKind::Success);
        Ok(())
    }

    /// ファイル全体を読み、そのまま importPrompts に渡す
    pub fn import_from(&self, store: &mut PromptStore, path: &Path) -> Result<ImportOutcome, Error> {
        let raw = self.read_or_notify(store, path)?;
        Ok(store.import_prompts(&raw))
    }

    /// プロンプト本文を dir/<title>.txt に書き出す。コミュニティのエントリはダウンロード数も増やす
    pub fn download(
        &self,
        store: &mut PromptStore,
        id: &PromptId,
        personal: bool,
        dir: &Path,
    ) -> Result<PathBuf, Error> {
        let found = if personal {
            store.find_personal(id)
        } else {
            store.find_community(id)
        };
        let prompt = found.ok_or_else(|| {
            let library = if personal { "personal" } else { "community" };
            Error::invalid_argument(format!("No prompt with id '{}' in the {} library.", id, library))
        })?;
        let path = dir.join(download_file_name(&prompt.title));
        self.fs.write(&path, &prompt.content)?;
        if !personal {
            store.increment_downloads(id);
        }
        Ok(path)
    }

    /// テキストファイルを生成のコンテキストとして読む
    pub fn read_context(&self, store: &mut PromptStore, path: &Path) -> Result<FileContext, Error> {
        let content = self.read_or_notify(store, path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        store.show_notification("File loaded as context.", NotificationKind::Success);
        Ok(FileContext { name, content })
    }

    /// refine 対象の本文をファイルから読む
    pub fn read_prompt_file(&self, store: &mut PromptStore, path: &Path) -> Result<String, Error> {
        self.read_or_notify(store, path)
    }

    fn read_or_notify(&self, store: &mut PromptStore, path: &Path) -> Result<String, Error> {
        self.fs.read_to_string(path).map_err(|e| {
            store.show_notification("Error reading the file.", NotificationKind::Error);
            Error::io_msg(format!("{}: {}", path.display(), e))
        })
    }
}

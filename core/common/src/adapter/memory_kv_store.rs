//! メモリ上の KeyValueStore 実装（テスト・--ephemeral 実行用）
//!
//! 読み書きの失敗を注入でき、ストレージ障害時の挙動を検証できる。

use crate::error::Error;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値つきで作成する
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(map),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 失敗注入を無視して現在値を覗く
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|m| m.get(key).cloned())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::io_msg(format!("Simulated read failure for '{}'", key)));
        }
        let map = self
            .entries
            .lock()
            .map_err(|_| Error::system("memory storage lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::io_msg(format!("Simulated write failure for '{}'", key)));
        }
        let mut map = self
            .entries
            .lock()
            .map_err(|_| Error::system("memory storage lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

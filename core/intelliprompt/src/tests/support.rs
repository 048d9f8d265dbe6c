//! テスト用のスタブとメモリ上の store

use crate::adapter::AssumeYesConfirmation;
use common::adapter::{MemoryKeyValueStore, NoopLog, StdClock, StdIdGenerator};
use common::domain::{HomeDir, Theme};
use common::error::Error;
use common::ports::outbound::{EnvResolver, GenerateRequest, PromptGenerator, RefineRequest};
use common::store::{PromptStore, StoreDeps, StoreSettings, KEY_CREDITS};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// シードデータから始まるメモリ上の store
pub fn memory_store() -> (PromptStore, Arc<MemoryKeyValueStore>) {
    store_on(Arc::new(MemoryKeyValueStore::new()))
}

pub fn memory_store_with_credits(credits: u32) -> (PromptStore, Arc<MemoryKeyValueStore>) {
    store_on(Arc::new(MemoryKeyValueStore::with_entries([(
        KEY_CREDITS,
        credits.to_string(),
    )])))
}

fn store_on(kv: Arc<MemoryKeyValueStore>) -> (PromptStore, Arc<MemoryKeyValueStore>) {
    let clock = Arc::new(StdClock);
    let store = PromptStore::hydrate(
        StoreDeps {
            kv: kv.clone(),
            clock: clock.clone(),
            ids: Arc::new(StdIdGenerator::new(clock)),
            confirmation: Arc::new(AssumeYesConfirmation),
            log: Arc::new(NoopLog),
        },
        StoreSettings::default(),
    );
    (store, kv)
}

/// 決まった応答を返し、受け取ったリクエストを記録する生成クライアント
pub struct StubGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_generate: Mutex<Option<GenerateRequest>>,
    last_refine: Mutex<Option<RefineRequest>>,
}

impl StubGenerator {
    pub fn ok(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn err(message: &str) -> Self {
        Self::with_reply(Err(message.to_string()))
    }

    fn with_reply(reply: Result<String, String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_generate: Mutex::new(None),
            last_refine: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_generate(&self) -> Option<GenerateRequest> {
        self.last_generate.lock().unwrap().clone()
    }

    pub fn last_refine(&self) -> Option<RefineRequest> {
        self.last_refine.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(Error::http)
    }
}

impl PromptGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    fn generate(&self, req: &GenerateRequest) -> Result<String, Error> {
        *self.last_generate.lock().unwrap() = Some(req.clone());
        self.answer()
    }

    fn refine(&self, req: &RefineRequest) -> Result<String, Error> {
        *self.last_refine.lock().unwrap() = Some(req.clone());
        self.answer()
    }
}

/// 環境変数を読まない EnvResolver
pub struct FixedEnv {
    pub home: HomeDir,
    pub theme: Option<Theme>,
    pub api_key: Option<String>,
}

impl FixedEnv {
    pub fn at(home: &std::path::Path) -> Self {
        Self {
            home: HomeDir::new(home),
            theme: None,
            api_key: None,
        }
    }
}

impl EnvResolver for FixedEnv {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        Ok(self.home.clone())
    }

    fn preferred_theme(&self) -> Option<Theme> {
        self.theme
    }

    fn api_key(&self) -> Option<String> {
        self.api_key.clone()
    }
}

//! Outbound ポート: アプリが外界（ストレージ・FS・時刻・生成サービス・確認 等）を使うための trait

pub mod clock;
pub mod confirmation;
pub mod env_resolver;
pub mod fs;
pub mod generator;
pub mod id_generator;
pub mod kv_store;
pub mod log;
pub mod store_observer;

pub use clock::Clock;
pub use confirmation::{Approval, Confirmation};
pub use env_resolver::EnvResolver;
pub use fs::FileSystem;
pub use generator::{GenerateRequest, PromptGenerator, RefineRequest};
pub use id_generator::IdGenerator;
pub use kv_store::KeyValueStore;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use store_observer::{StoreEvent, StoreObserver};

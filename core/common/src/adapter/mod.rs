//! アダプター（外界の I/O を Outbound ポートの trait で実装する）
//!
//! store・usecase はポートの trait 経由でのみストレージ・ファイル・時刻に触れる。
//! 実装は標準実装（Std*）やテスト用のメモリ実装を注入する。

pub mod file_json_log;
pub mod file_kv_store;
pub mod memory_kv_store;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;
pub mod std_id_generator;

pub use file_json_log::{FileJsonLog, NoopLog, StderrMirrorLog};
pub use file_kv_store::FileKeyValueStore;
pub use memory_kv_store::MemoryKeyValueStore;
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use std_id_generator::StdIdGenerator;

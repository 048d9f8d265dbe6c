//! Prompt ID 生成 Outbound ポート
//!
//! store は IdGenerator を注入し、テストでは連番 ID を返す実装を渡せる。

use crate::domain::PromptId;

/// PromptId を生成する抽象（Outbound ポート）
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> PromptId;
}

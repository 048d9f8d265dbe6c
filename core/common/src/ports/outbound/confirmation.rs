//! 確認 Outbound ポート（削除など取り消せない操作の前の確認）
//!
//! store はこの trait 経由で承認を取得し、対話の具体実装（stdin/stderr）は adapter 層に置く。

use crate::error::Error;

/// 承認結果（Approved: 実行許可、Denied: 拒否）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    /// ユーザーが実行を許可した
    Approved,
    /// ユーザーが実行を拒否した
    Denied,
}

/// 破壊的操作の承認を得る Outbound ポート（adapter で実装）
pub trait Confirmation: Send + Sync {
    /// message を提示して承認を求める。入力が読めなかった場合は Err
    fn confirm(&self, message: &str) -> Result<Approval, Error>;
}

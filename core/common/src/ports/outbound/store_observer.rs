//! Store の変更を購読する Outbound ポート
//!
//! 表示層は store のフィールドを直接触らず、このイベントで通知・テーマ変更を受け取る。

use crate::domain::{Notification, Theme};

/// PromptStore から observer へ流すイベント
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// 通知スロットが置き換えられた
    Notification(Notification),
    /// テーマが切り替わった（表示層のグローバルなフラグを更新する）
    ThemeChanged(Theme),
    /// 個人ライブラリが変更された
    PersonalChanged,
    /// コミュニティライブラリが変更された
    CommunityChanged,
    /// 残り生成回数が変わった
    CreditsChanged(u32),
}

/// イベントを受け取る observer（Outbound ポート）
pub trait StoreObserver: Send + Sync {
    fn on_event(&self, ev: &StoreEvent);
}

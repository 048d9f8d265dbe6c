//! UI 通知スロット
//!
//! 表示から NOTIFICATION_TTL_MS 経過すると読み出し側からは消えたものとして扱う。

/// 通知の表示期間（ミリ秒）
pub const NOTIFICATION_TTL_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    /// この時刻（Unix epoch ms）以降は期限切れ
    pub expires_at_ms: u64,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind, now_ms: u64) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at_ms: now_ms.saturating_add(NOTIFICATION_TTL_MS),
        }
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

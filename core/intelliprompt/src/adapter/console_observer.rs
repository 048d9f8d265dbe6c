//! store の通知を端末に表示する observer

use common::domain::NotificationKind;
use common::ports::outbound::{StoreEvent, StoreObserver};
use std::io::{self, Write};
use std::sync::Mutex;

/// 通知とテーマ変更を 1 行ずつ書き出す（既定は stderr）
pub struct ConsoleObserver {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleObserver {
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(io::stderr()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

/// 表示する行。コレクション・残り回数の変更は表示しない
pub fn render(ev: &StoreEvent) -> Option<String> {
    match ev {
        StoreEvent::Notification(n) => {
            let mark = match n.kind {
                NotificationKind::Success => "✔",
                NotificationKind::Error => "✖",
            };
            Some(format!("{} {}", mark, n.message))
        }
        StoreEvent::ThemeChanged(theme) => Some(format!("Theme set to {}.", theme)),
        StoreEvent::PersonalChanged
        | StoreEvent::CommunityChanged
        | StoreEvent::CreditsChanged(_) => None,
    }
}

impl StoreObserver for ConsoleObserver {
    fn on_event(&self, ev: &StoreEvent) {
        let Some(line) = render(ev) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
            let _ = out.flush();
        }
    }
}

//! Prompt Store
//!
//! 個人・コミュニティの 2 コレクション、残り生成回数、通知スロット、テーマを所有する唯一の状態。
//! 変更操作のたびに影響したキーだけを同期的に KeyValueStore へ書き出す。
//! 書き込み失敗はログに残すのみで、メモリ上の状態は巻き戻さない。

mod import;
mod seed;
#[cfg(test)]
mod tests;

pub use import::{decode_import, ImportOutcome};
pub use seed::{
    is_seed_id, seed_catalog, seed_community, seed_personal, LEGACY_SEED_AUTHOR, SEED_AUTHOR,
};

use crate::domain::{NewPrompt, Notification, NotificationKind, Prompt, PromptId, Theme};
use crate::error::Error;
use crate::ports::outbound::{
    Approval, Clock, Confirmation, IdGenerator, KeyValueStore, Log, LogLevel, LogRecord,
    StoreEvent, StoreObserver,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

pub const KEY_PERSONAL: &str = "geniusPrompt_userPrompts";
pub const KEY_COMMUNITY: &str = "geniusPrompt_communityPrompts";
pub const KEY_CREDITS: &str = "geniusPrompt_generations";
pub const KEY_THEME: &str = "theme";

/// 端末ごとの無料生成回数の初期値
pub const FREE_GENERATIONS: u32 = 10;

/// 公開時に付ける現在ユーザーの作者ラベル（config の userLabel で上書き可）
pub const DEFAULT_USER_LABEL: &str = "You";

/// fresh_id が生成器に問い合わせる回数の上限
const ID_ATTEMPTS: usize = 16;

const DELETE_CONFIRM_MESSAGE: &str =
    "Are you sure you want to delete this prompt? This action cannot be undone.";

/// store が使う Outbound ポート一式（wiring が組み立てる）
pub struct StoreDeps {
    pub kv: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
    pub confirmation: Arc<dyn Confirmation>,
    pub log: Arc<dyn Log>,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub user_label: String,
    /// ホスト環境の light/dark の好み（ストレージに値が無いときだけ使う）
    pub preferred_theme: Option<Theme>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            user_label: DEFAULT_USER_LABEL.to_string(),
            preferred_theme: None,
        }
    }
}

/// deletePrompt の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// 確認で拒否された（エラーではなくキャンセル）
    Cancelled,
    NotFound,
}

pub struct PromptStore {
    deps: StoreDeps,
    user_label: String,
    personal: Vec<Prompt>,
    community: Vec<Prompt>,
    credits: u32,
    notification: Option<Notification>,
    theme: Theme,
    observers: Vec<Arc<dyn StoreObserver>>,
}

impl PromptStore {
    /// ストレージから状態を復元する。欠落・破損しているコレクションはシードで補う
    pub fn hydrate(deps: StoreDeps, settings: StoreSettings) -> Self {
        let mut store = Self {
            deps,
            user_label: settings.user_label,
            personal: Vec::new(),
            community: Vec::new(),
            credits: FREE_GENERATIONS,
            notification: None,
            theme: Theme::default(),
            observers: Vec::new(),
        };

        store.personal = store
            .load_collection(KEY_PERSONAL)
            .unwrap_or_else(seed_personal);
        store.community = store
            .load_collection(KEY_COMMUNITY)
            .unwrap_or_else(seed_community)
            .into_iter()
            .map(normalize_legacy_seed)
            .collect();

        match store.read_key(KEY_CREDITS).and_then(|s| s.trim().parse::<u32>().ok()) {
            Some(n) => store.credits = n,
            None => store.persist_credits(),
        }

        store.theme = store
            .read_key(KEY_THEME)
            .and_then(|s| Theme::parse(&s))
            .or(settings.preferred_theme)
            .unwrap_or_default();

        store
    }

    /// 変更イベントの購読者を追加する
    pub fn subscribe(&mut self, observer: Arc<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    // --- 読み出し

    pub fn personal(&self) -> &[Prompt] {
        &self.personal
    }

    pub fn community(&self) -> &[Prompt] {
        &self.community
    }

    pub fn find_personal(&self, id: &PromptId) -> Option<&Prompt> {
        self.personal.iter().find(|p| &p.id == id)
    }

    pub fn find_community(&self, id: &PromptId) -> Option<&Prompt> {
        self.community.iter().find(|p| &p.id == id)
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn user_label(&self) -> &str {
        &self.user_label
    }

    /// 期限内の通知のみ返す
    pub fn notification(&self) -> Option<&Notification> {
        let now = self.deps.clock.now_ms();
        self.notification.as_ref().filter(|n| !n.is_expired(now))
    }

    // --- 変更操作

    /// 個人ライブラリの先頭に追加し、新しい id を返す
    pub fn add_prompt(&mut self, input: NewPrompt) -> PromptId {
        let id = self.fresh_id();
        let prompt = Prompt {
            id: id.clone(),
            title: input.title,
            description: input.description,
            content: input.content,
            category: input.category,
            created_at: self.now(),
            author: None,
            rating: None,
            downloads: None,
            is_favorite: false,
            is_published: false,
        };
        self.personal.insert(0, prompt);
        self.persist_personal();
        self.emit(StoreEvent::PersonalChanged);
        self.show_notification("Prompt saved successfully!", NotificationKind::Success);
        id
    }

    /// 確認を経て個人ライブラリから削除する。コミュニティ側は触らない
    pub fn delete_prompt(&mut self, id: &PromptId) -> DeleteOutcome {
        let Some(pos) = self.personal.iter().position(|p| &p.id == id) else {
            return DeleteOutcome::NotFound;
        };
        match self.deps.confirmation.confirm(DELETE_CONFIRM_MESSAGE) {
            Ok(Approval::Approved) => {}
            Ok(Approval::Denied) => return DeleteOutcome::Cancelled,
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Warn, "confirmation failed; delete cancelled")
                        .layer("store")
                        .kind("confirmation")
                        .field("id", id.as_str())
                        .field("error", e.to_string()),
                );
                return DeleteOutcome::Cancelled;
            }
        }
        self.personal.remove(pos);
        self.persist_personal();
        self.emit(StoreEvent::PersonalChanged);
        self.show_notification("Prompt deleted.", NotificationKind::Error);
        DeleteOutcome::Deleted
    }

    /// isFavorite を反転し、反転後の値を返す。id が無ければ None
    pub fn toggle_favorite(&mut self, id: &PromptId) -> Option<bool> {
        let prompt = self.personal.iter_mut().find(|p| &p.id == id)?;
        prompt.is_favorite = !prompt.is_favorite;
        let now_favorite = prompt.is_favorite;
        self.persist_personal();
        self.emit(StoreEvent::PersonalChanged);
        Some(now_favorite)
    }

    /// 個人エントリを公開済みにし、コミュニティへコピーを入れる。
    /// 既に公開済み・id が無い場合は何もせず false
    pub fn publish_prompt(&mut self, id: &PromptId) -> bool {
        let label = self.user_label.clone();
        let Some(prompt) = self.personal.iter_mut().find(|p| &p.id == id) else {
            return false;
        };
        if prompt.is_published {
            return false;
        }
        prompt.is_published = true;
        prompt.author = Some(label);
        let published = prompt.clone();
        self.persist_personal();
        self.emit(StoreEvent::PersonalChanged);

        if self.find_community(id).is_none() {
            let copy = Prompt {
                rating: Some(0.0),
                downloads: Some(0),
                created_at: self.now(),
                ..published
            };
            self.community.insert(0, copy);
            self.persist_community();
            self.emit(StoreEvent::CommunityChanged);
        }
        self.show_notification("Prompt published to the community!", NotificationKind::Success);
        true
    }

    /// コミュニティエントリのダウンロード数を 1 増やし、増やした後の値を返す
    pub fn increment_downloads(&mut self, id: &PromptId) -> Option<u64> {
        let prompt = self.community.iter_mut().find(|p| &p.id == id)?;
        let downloads = prompt.downloads.unwrap_or(0).saturating_add(1);
        prompt.downloads = Some(downloads);
        self.persist_community();
        self.emit(StoreEvent::CommunityChanged);
        Some(downloads)
    }

    /// JSON 配列を取り込む。失敗しても状態は変えず、結果は通知と戻り値で伝える
    pub fn import_prompts(&mut self, raw: &str) -> ImportOutcome {
        let decoded = match decode_import(raw, self.now()) {
            Ok(v) => v,
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Warn, "import rejected")
                        .layer("store")
                        .kind("import")
                        .field("error", e.to_string()),
                );
                self.show_notification(
                    "Error importing the file. Make sure it is a valid JSON export from this app.",
                    NotificationKind::Error,
                );
                return ImportOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };
        if decoded.is_empty() {
            self.show_notification("No valid prompts found in the file.", NotificationKind::Error);
            return ImportOutcome::NoValidPrompts;
        }

        let mut seen: std::collections::HashSet<PromptId> =
            self.personal.iter().map(|p| p.id.clone()).collect();
        let mut duplicates = 0;
        let mut fresh = Vec::new();
        for prompt in decoded {
            if seen.insert(prompt.id.clone()) {
                fresh.push(prompt);
            } else {
                duplicates += 1;
            }
        }
        let added = fresh.len();
        if added > 0 {
            self.personal.extend(fresh);
            self.persist_personal();
            self.emit(StoreEvent::PersonalChanged);
        }
        let message = if duplicates > 0 {
            format!(
                "{} prompts imported successfully! {} duplicates skipped.",
                added, duplicates
            )
        } else {
            format!("{} prompts imported successfully!", added)
        };
        self.show_notification(message, NotificationKind::Success);
        ImportOutcome::Imported { added, duplicates }
    }

    /// 個人ライブラリを整形済み JSON として返す。空なら通知して Err
    pub fn export_prompts(&mut self) -> Result<String, Error> {
        if self.personal.is_empty() {
            self.show_notification("You have no prompts to export.", NotificationKind::Error);
            return Err(Error::validation("You have no prompts to export."));
        }
        serde_json::to_string_pretty(&self.personal).map_err(|e| Error::json(e.to_string()))
    }

    /// 残り生成回数を 1 減らす（0 未満にはしない）
    pub fn decrement_generations(&mut self) {
        self.credits = self.credits.saturating_sub(1);
        self.persist_credits();
        self.emit(StoreEvent::CreditsChanged(self.credits));
    }

    pub fn show_notification(&mut self, message: impl Into<String>, kind: NotificationKind) {
        let notification = Notification::new(message, kind, self.deps.clock.now_ms());
        self.notification = Some(notification.clone());
        self.emit(StoreEvent::Notification(notification));
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        let theme = self.theme;
        self.persist(KEY_THEME, Ok(theme.as_str().to_string()));
        self.emit(StoreEvent::ThemeChanged(theme));
        theme
    }

    // --- 内部

    fn now(&self) -> DateTime<Utc> {
        i64::try_from(self.deps.clock.now_ms())
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_default()
    }

    /// 個人ライブラリ内で未使用の id を払い出す。
    /// 生成器が衝突し続ける場合は最後の id に連番を付けて空きを探す
    fn fresh_id(&self) -> PromptId {
        let mut id = self.deps.ids.next_id();
        for _ in 1..ID_ATTEMPTS {
            if self.find_personal(&id).is_none() {
                return id;
            }
            id = self.deps.ids.next_id();
        }
        if self.find_personal(&id).is_none() {
            return id;
        }
        self.log(
            LogRecord::new(LogLevel::Warn, "id generator keeps colliding; suffixing")
                .layer("store")
                .kind("id")
                .field("id", id.as_str()),
        );
        let mut n: u64 = 1;
        loop {
            let candidate = PromptId::new(format!("{}-{}", id, n));
            if self.find_personal(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    fn emit(&self, ev: StoreEvent) {
        for observer in &self.observers {
            observer.on_event(&ev);
        }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.log.log(&record);
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.deps.kv.get(key) {
            Ok(v) => v,
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Warn, "storage read failed")
                        .layer("store")
                        .kind("persistence")
                        .field("key", key)
                        .field("error", e.to_string()),
                );
                None
            }
        }
    }

    /// 保存済みコレクションを読む。JSON 配列として読めなければ None（シードで補う）。
    /// 配列なら要素ごとに解釈し、解釈できない要素だけを捨てる
    fn load_collection(&self, key: &str) -> Option<Vec<Prompt>> {
        let raw = self.read_key(key)?;
        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                self.warn_unusable(key, "stored collection is not an array; using seed data", None);
                return None;
            }
            Err(e) => {
                self.warn_unusable(
                    key,
                    "stored collection unparsable; using seed data",
                    Some(e.to_string()),
                );
                return None;
            }
        };
        let created_at = import::timestamp_text(self.now());
        let mut prompts = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let id = item
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let decoded = match item {
                Value::Object(obj) => import::decode_entry(obj, &created_at),
                _ => None,
            };
            match decoded {
                Some(prompt) => prompts.push(prompt),
                None => self.log(
                    LogRecord::new(LogLevel::Warn, "stored prompt undecodable; dropped")
                        .layer("store")
                        .kind("persistence")
                        .field("key", key)
                        .field("index", index)
                        .field("id", id),
                ),
            }
        }
        Some(prompts)
    }

    fn warn_unusable(&self, key: &str, message: &str, error: Option<String>) {
        let mut record = LogRecord::new(LogLevel::Warn, message)
            .layer("store")
            .kind("persistence")
            .field("key", key);
        if let Some(error) = error {
            record = record.field("error", error);
        }
        self.log(record);
    }

    fn persist(&self, key: &str, value: Result<String, Error>) {
        let result = value.and_then(|v| self.deps.kv.set(key, &v));
        if let Err(e) = result {
            self.log(
                LogRecord::new(LogLevel::Warn, "storage write failed")
                    .layer("store")
                    .kind("persistence")
                    .field("key", key)
                    .field("error", e.to_string()),
            );
        }
    }

    fn persist_personal(&self) {
        self.persist(KEY_PERSONAL, serde_json::to_string(&self.personal).map_err(Error::from));
    }

    fn persist_community(&self) {
        self.persist(KEY_COMMUNITY, serde_json::to_string(&self.community).map_err(Error::from));
    }

    fn persist_credits(&self) {
        self.persist(KEY_CREDITS, Ok(self.credits.to_string()));
    }
}

/// 旧バージョンがシードに付けていたメトリクスを外す
fn normalize_legacy_seed(prompt: Prompt) -> Prompt {
    if is_seed_id(&prompt.id) && prompt.author.as_deref() == Some(LEGACY_SEED_AUTHOR) {
        prompt.without_metrics()
    } else {
        prompt
    }
}

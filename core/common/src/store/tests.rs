use super::*;
use crate::adapter::MemoryKeyValueStore;
use crate::domain::{Category, NOTIFICATION_TTL_MS};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

struct FixedClock(AtomicU64);

impl FixedClock {
    fn at(ms: u64) -> Arc<Self> {
        Arc::new(Self(AtomicU64::new(ms)))
    }

    fn advance(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct SeqIds(AtomicU64);

impl IdGenerator for SeqIds {
    fn next_id(&self) -> PromptId {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        PromptId::new(format!("id-{}", n))
    }
}

struct Answer(Result<Approval, ()>);

impl Confirmation for Answer {
    fn confirm(&self, _message: &str) -> Result<Approval, Error> {
        self.0.map_err(|_| Error::io_msg("stdin closed"))
    }
}

#[derive(Default)]
struct RecordingLog(Mutex<Vec<LogRecord>>);

impl RecordingLog {
    fn warnings(&self) -> Vec<LogRecord> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.level == LogLevel::Warn)
            .cloned()
            .collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.0.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingObserver(Mutex<Vec<StoreEvent>>);

impl StoreObserver for RecordingObserver {
    fn on_event(&self, ev: &StoreEvent) {
        self.0.lock().unwrap().push(ev.clone());
    }
}

struct Harness {
    kv: Arc<MemoryKeyValueStore>,
    clock: Arc<FixedClock>,
    log: Arc<RecordingLog>,
    approval: Result<Approval, ()>,
    settings: StoreSettings,
}

impl Harness {
    fn new() -> Self {
        Self::with_kv(MemoryKeyValueStore::new())
    }

    /// 個人 0 件・コミュニティ 0 件・10 回から始める
    fn empty() -> Self {
        Self::with_kv(MemoryKeyValueStore::with_entries([
            (KEY_PERSONAL, "[]"),
            (KEY_COMMUNITY, "[]"),
            (KEY_CREDITS, "10"),
        ]))
    }

    fn with_kv(kv: MemoryKeyValueStore) -> Self {
        Self {
            kv: Arc::new(kv),
            clock: FixedClock::at(1_720_000_000_000),
            log: Arc::new(RecordingLog::default()),
            approval: Ok(Approval::Approved),
            settings: StoreSettings::default(),
        }
    }

    fn store(&self) -> PromptStore {
        PromptStore::hydrate(
            StoreDeps {
                kv: self.kv.clone(),
                clock: self.clock.clone(),
                ids: Arc::new(SeqIds::default()),
                confirmation: Arc::new(Answer(self.approval)),
                log: self.log.clone(),
            },
            self.settings.clone(),
        )
    }
}

fn new_prompt(title: &str) -> NewPrompt {
    NewPrompt {
        title: title.to_string(),
        description: "D".to_string(),
        content: "C".to_string(),
        category: Category::Marketing,
    }
}

// --- 初期化

#[test]
fn test_hydrate_without_storage_uses_seed_and_writes_credits() {
    let h = Harness::new();
    let store = h.store();
    assert_eq!(store.personal(), seed_personal().as_slice());
    assert_eq!(store.community(), seed_community().as_slice());
    assert_eq!(store.credits(), FREE_GENERATIONS);
    assert_eq!(h.kv.peek(KEY_CREDITS).as_deref(), Some("10"));
    assert_eq!(store.theme(), Theme::Light);
}

#[test]
fn test_hydrate_reads_stored_state() {
    let h = Harness::with_kv(MemoryKeyValueStore::with_entries([
        (KEY_PERSONAL, "[]"),
        (KEY_COMMUNITY, "[]"),
        (KEY_CREDITS, "3"),
        (KEY_THEME, "dark"),
    ]));
    let store = h.store();
    assert!(store.personal().is_empty());
    assert!(store.community().is_empty());
    assert_eq!(store.credits(), 3);
    assert_eq!(store.theme(), Theme::Dark);
}

#[test]
fn test_hydrate_invalid_credits_resets_and_persists() {
    let h = Harness::with_kv(MemoryKeyValueStore::with_entries([(KEY_CREDITS, "lots")]));
    let store = h.store();
    assert_eq!(store.credits(), FREE_GENERATIONS);
    assert_eq!(h.kv.peek(KEY_CREDITS).as_deref(), Some("10"));
}

#[test]
fn test_hydrate_unparsable_collection_falls_back_to_seed() {
    let h = Harness::with_kv(MemoryKeyValueStore::with_entries([(KEY_PERSONAL, "{broken")]));
    let store = h.store();
    assert_eq!(store.personal(), seed_personal().as_slice());
    let warnings = h.log.warnings();
    assert!(warnings
        .iter()
        .any(|r| r.kind.as_deref() == Some("persistence")));
}

#[test]
fn test_hydrate_drops_only_undecodable_entries() {
    let stored = r#"[
        {"id":"mine-1","title":"Mine","description":"","content":"keep me","category":"Coding","createdAt":"2024-05-01T10:00:00.000Z","isFavorite":true,"isPublished":false},
        {"id":"mine-2","title":"Odd","description":"","content":"x","category":"Astrology","createdAt":"2024-05-01T10:00:00.000Z","isFavorite":false,"isPublished":false}
    ]"#;
    let h = Harness::with_kv(MemoryKeyValueStore::with_entries([(KEY_PERSONAL, stored)]));
    let mut store = h.store();
    let ids: Vec<&str> = store.personal().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["mine-1"]);
    assert!(store.personal()[0].is_favorite);

    let dropped: Vec<LogRecord> = h
        .log
        .warnings()
        .into_iter()
        .filter(|r| r.kind.as_deref() == Some("persistence"))
        .collect();
    assert_eq!(dropped.len(), 1);
    let fields = dropped[0].fields.as_ref().unwrap();
    assert_eq!(fields["id"], "mine-2");

    // 次の書き込みでも手元のエントリは残る
    store.add_prompt(new_prompt("New"));
    let persisted = h.kv.peek(KEY_PERSONAL).unwrap();
    assert!(persisted.contains("\"mine-1\""));
    assert!(!persisted.contains("ideal-1"));
}

#[test]
fn test_hydrate_non_array_collection_falls_back_to_seed() {
    let h = Harness::with_kv(MemoryKeyValueStore::with_entries([(KEY_PERSONAL, r#"{"id":"x"}"#)]));
    let store = h.store();
    assert_eq!(store.personal(), seed_personal().as_slice());
}

#[test]
fn test_hydrate_theme_falls_back_to_host_preference() {
    let mut h = Harness::new();
    h.settings.preferred_theme = Some(Theme::Dark);
    assert_eq!(h.store().theme(), Theme::Dark);

    h.kv.set(KEY_THEME, "light").unwrap();
    assert_eq!(h.store().theme(), Theme::Light);
}

#[test]
fn test_hydrate_clears_metrics_of_legacy_seed_entries() {
    let legacy = Prompt {
        author: Some(LEGACY_SEED_AUTHOR.to_string()),
        ..seed_catalog()[0].clone()
    };
    let published_by_user = Prompt {
        id: PromptId::new("mine"),
        author: Some("You".to_string()),
        rating: Some(0.0),
        downloads: Some(2),
        ..seed_catalog()[1].clone()
    };
    let json = serde_json::to_string(&vec![legacy, published_by_user]).unwrap();
    let h = Harness::with_kv(MemoryKeyValueStore::with_entries([(KEY_COMMUNITY, json)]));
    let store = h.store();
    assert!(!store.community()[0].is_measured());
    assert!(store.community()[1].is_measured());
}

#[test]
fn test_hydrate_read_failure_is_logged_not_fatal() {
    let kv = MemoryKeyValueStore::new();
    kv.set_fail_reads(true);
    let h = Harness::with_kv(kv);
    let store = h.store();
    assert_eq!(store.credits(), FREE_GENERATIONS);
    assert!(!h.log.warnings().is_empty());
}

// --- addPrompt

#[test]
fn test_add_prompt_prepends_with_unique_ids() {
    let h = Harness::empty();
    let mut store = h.store();
    let a = store.add_prompt(new_prompt("A"));
    let b = store.add_prompt(new_prompt("B"));
    let c = store.add_prompt(new_prompt("C"));
    let ids: Vec<_> = store.personal().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec![c, b, a]);
}

#[test]
fn test_add_prompt_skips_ids_already_in_use() {
    let h = Harness::with_kv(MemoryKeyValueStore::with_entries([(
        KEY_PERSONAL,
        r#"[{"id":"id-1","title":"T","content":"C","category":"Coding","createdAt":"2024-01-01T00:00:00Z"}]"#,
    )]));
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("New"));
    assert_eq!(id.as_str(), "id-2");
}

struct StuckIds;

impl IdGenerator for StuckIds {
    fn next_id(&self) -> PromptId {
        PromptId::new("stuck")
    }
}

#[test]
fn test_add_prompt_terminates_when_generator_repeats() {
    let h = Harness::empty();
    let mut store = PromptStore::hydrate(
        StoreDeps {
            kv: h.kv.clone(),
            clock: h.clock.clone(),
            ids: Arc::new(StuckIds),
            confirmation: Arc::new(Answer(Ok(Approval::Approved))),
            log: h.log.clone(),
        },
        StoreSettings::default(),
    );
    let first = store.add_prompt(new_prompt("A"));
    let second = store.add_prompt(new_prompt("B"));
    let third = store.add_prompt(new_prompt("C"));
    assert_eq!(first.as_str(), "stuck");
    assert_eq!(second.as_str(), "stuck-1");
    assert_eq!(third.as_str(), "stuck-2");
    assert!(h.log.warnings().iter().any(|r| r.kind.as_deref() == Some("id")));
}

#[test]
fn test_add_prompt_persists_and_notifies() {
    let h = Harness::empty();
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("T"));
    let stored: Vec<Prompt> = serde_json::from_str(&h.kv.peek(KEY_PERSONAL).unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    let n = store.notification().unwrap();
    assert_eq!(n.kind, NotificationKind::Success);
}

// --- 一連のシナリオ

#[test]
fn test_add_publish_download_scenario() {
    let h = Harness::empty();
    let mut store = h.store();
    assert_eq!(store.credits(), 10);

    let id = store.add_prompt(NewPrompt {
        title: "T".to_string(),
        description: "D".to_string(),
        content: "C".to_string(),
        category: Category::Marketing,
    });
    assert!(!id.is_empty());
    assert_eq!(store.personal().len(), 1);
    let added = &store.personal()[0];
    assert!(!added.is_favorite);
    assert!(!added.is_published);
    assert!(added.author.is_none());

    assert!(store.publish_prompt(&id));
    let personal = store.find_personal(&id).unwrap();
    assert!(personal.is_published);
    assert_eq!(personal.author.as_deref(), Some(DEFAULT_USER_LABEL));
    assert_eq!(store.community().len(), 1);
    let shared = &store.community()[0];
    assert_eq!(shared.rating, Some(0.0));
    assert_eq!(shared.downloads, Some(0));
    assert_eq!(shared.author.as_deref(), Some(DEFAULT_USER_LABEL));

    assert_eq!(store.increment_downloads(&id), Some(1));
    assert_eq!(store.find_community(&id).unwrap().downloads, Some(1));
}

// --- publishPrompt

#[test]
fn test_publish_twice_yields_single_community_entry() {
    let h = Harness::empty();
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("T"));
    assert!(store.publish_prompt(&id));
    assert!(!store.publish_prompt(&id));
    let count = store.community().iter().filter(|p| p.id == id).count();
    assert_eq!(count, 1);
}

#[test]
fn test_publish_does_not_duplicate_existing_community_id() {
    let h = Harness::new();
    let mut store = h.store();
    let id = store.personal()[0].id.clone();
    let before = store.community().len();
    assert!(store.publish_prompt(&id));
    assert_eq!(store.community().len(), before);
    assert!(store.find_personal(&id).unwrap().is_published);
}

#[test]
fn test_publish_uses_configured_label_and_fresh_timestamp() {
    let mut h = Harness::empty();
    h.settings.user_label = "Ana".to_string();
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("T"));
    let created = store.find_personal(&id).unwrap().created_at;
    h.clock.advance(60_000);
    store.publish_prompt(&id);
    let shared = store.find_community(&id).unwrap();
    assert_eq!(shared.author.as_deref(), Some("Ana"));
    assert!(shared.created_at > created);
}

#[test]
fn test_publish_unknown_id_is_noop() {
    let h = Harness::empty();
    let mut store = h.store();
    assert!(!store.publish_prompt(&PromptId::new("ghost")));
    assert!(store.community().is_empty());
    assert!(store.notification().is_none());
}

// --- deletePrompt

#[test]
fn test_delete_requires_confirmation() {
    let mut h = Harness::empty();
    h.approval = Ok(Approval::Denied);
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("T"));
    let before = store.notification().cloned();
    assert_eq!(store.delete_prompt(&id), DeleteOutcome::Cancelled);
    assert_eq!(store.personal().len(), 1);
    assert_eq!(store.notification().cloned(), before);
}

#[test]
fn test_delete_confirmation_error_is_cancel() {
    let mut h = Harness::empty();
    h.approval = Err(());
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("T"));
    assert_eq!(store.delete_prompt(&id), DeleteOutcome::Cancelled);
    assert_eq!(store.personal().len(), 1);
    assert!(h
        .log
        .warnings()
        .iter()
        .any(|r| r.kind.as_deref() == Some("confirmation")));
}

#[test]
fn test_delete_removes_personal_only_with_error_styled_notice() {
    let h = Harness::empty();
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("T"));
    store.publish_prompt(&id);
    assert_eq!(store.delete_prompt(&id), DeleteOutcome::Deleted);
    assert!(store.find_personal(&id).is_none());
    assert!(store.find_community(&id).is_some());
    let n = store.notification().unwrap();
    assert!(n.is_error());
    assert_eq!(n.message, "Prompt deleted.");
}

#[test]
fn test_delete_unknown_id() {
    let h = Harness::empty();
    let mut store = h.store();
    assert_eq!(store.delete_prompt(&PromptId::new("nope")), DeleteOutcome::NotFound);
}

// --- toggleFavorite / incrementDownloads

#[test]
fn test_toggle_favorite() {
    let h = Harness::empty();
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("T"));
    assert_eq!(store.toggle_favorite(&id), Some(true));
    assert_eq!(store.toggle_favorite(&id), Some(false));
    assert_eq!(store.toggle_favorite(&PromptId::new("x")), None);
}

#[test]
fn test_increment_downloads_defaults_absent_to_zero() {
    let h = Harness::new();
    let mut store = h.store();
    let id = store.community()[0].id.clone();
    assert!(store.community()[0].downloads.is_none());
    assert_eq!(store.increment_downloads(&id), Some(1));
    assert_eq!(store.increment_downloads(&id), Some(2));
    let stored: Vec<Prompt> = serde_json::from_str(&h.kv.peek(KEY_COMMUNITY).unwrap()).unwrap();
    assert_eq!(stored[0].downloads, Some(2));
}

#[test]
fn test_increment_downloads_unknown_id() {
    let h = Harness::empty();
    let mut store = h.store();
    assert_eq!(store.increment_downloads(&PromptId::new("x")), None);
}

// --- importPrompts

#[test]
fn test_import_empty_array() {
    let h = Harness::new();
    let mut store = h.store();
    let before = store.personal().to_vec();
    assert_eq!(store.import_prompts("[]"), ImportOutcome::NoValidPrompts);
    assert_eq!(store.personal(), before.as_slice());
    let n = store.notification().unwrap();
    assert!(n.is_error());
    assert_eq!(n.message, "No valid prompts found in the file.");
}

#[test]
fn test_import_malformed_json_leaves_state_untouched() {
    let h = Harness::new();
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("T"));
    let stored_before = h.kv.peek(KEY_PERSONAL);
    let before = store.personal().to_vec();
    assert!(matches!(
        store.import_prompts("{not json"),
        ImportOutcome::Failed { .. }
    ));
    assert_eq!(store.personal(), before.as_slice());
    assert_eq!(h.kv.peek(KEY_PERSONAL), stored_before);
    assert!(store.notification().unwrap().is_error());
    assert!(store.find_personal(&id).is_some());
}

#[test]
fn test_import_non_array_fails() {
    let h = Harness::empty();
    let mut store = h.store();
    assert!(matches!(
        store.import_prompts(r#"{"id":"a","title":"A","content":"x","category":"Coding"}"#),
        ImportOutcome::Failed { .. }
    ));
    assert!(store.personal().is_empty());
}

#[test]
fn test_import_own_export_adds_nothing() {
    let h = Harness::new();
    let mut store = h.store();
    store.add_prompt(new_prompt("Extra"));
    let exported = store.export_prompts().unwrap();
    let before = store.personal().to_vec();
    let outcome = store.import_prompts(&exported);
    assert_eq!(
        outcome,
        ImportOutcome::Imported {
            added: 0,
            duplicates: before.len()
        }
    );
    assert_eq!(store.personal(), before.as_slice());
}

#[test]
fn test_import_appends_new_and_keeps_existing_on_conflict() {
    let h = Harness::empty();
    let mut store = h.store();
    let id = store.add_prompt(new_prompt("Original"));
    let raw = format!(
        r#"[
            {{"id":"{}","title":"Imported copy","content":"x","category":"Coding"}},
            {{"id":"new-1","title":"N1","content":"x","category":"Coding"}},
            {{"id":"new-1","title":"N1 again","content":"x","category":"Coding"}},
            {{"title":"missing id","content":"x","category":"Coding"}}
        ]"#,
        id
    );
    let outcome = store.import_prompts(&raw);
    assert_eq!(
        outcome,
        ImportOutcome::Imported {
            added: 1,
            duplicates: 2
        }
    );
    assert_eq!(store.personal().len(), 2);
    assert_eq!(store.personal()[0].title, "Original");
    assert_eq!(store.personal()[1].id.as_str(), "new-1");
    assert!(!store.personal()[1].is_favorite);
    let n = store.notification().unwrap();
    assert_eq!(n.kind, NotificationKind::Success);
    assert!(n.message.starts_with("1 prompts imported"));
}

// --- export

#[test]
fn test_export_empty_collection_is_refused() {
    let h = Harness::empty();
    let mut store = h.store();
    assert!(store.export_prompts().is_err());
    assert!(store.notification().unwrap().is_error());
}

#[test]
fn test_export_is_pretty_printed_array() {
    let h = Harness::new();
    let mut store = h.store();
    let json = store.export_prompts().unwrap();
    assert!(json.starts_with("[\n"));
    let parsed: Vec<Prompt> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, store.personal());
}

// --- decrementGenerations

#[test]
fn test_decrement_generations_floors_at_zero() {
    let h = Harness::with_kv(MemoryKeyValueStore::with_entries([(KEY_CREDITS, "1")]));
    let mut store = h.store();
    store.decrement_generations();
    assert_eq!(store.credits(), 0);
    store.decrement_generations();
    assert_eq!(store.credits(), 0);
    assert_eq!(h.kv.peek(KEY_CREDITS).as_deref(), Some("0"));
}

// --- 通知・テーマ

#[test]
fn test_notification_expires() {
    let h = Harness::empty();
    let mut store = h.store();
    store.show_notification("hello", NotificationKind::Success);
    h.clock.advance(NOTIFICATION_TTL_MS - 1);
    assert_eq!(store.notification().unwrap().message, "hello");
    h.clock.advance(1);
    assert!(store.notification().is_none());
}

#[test]
fn test_show_notification_replaces_slot() {
    let h = Harness::empty();
    let mut store = h.store();
    store.show_notification("first", NotificationKind::Success);
    store.show_notification("second", NotificationKind::Error);
    let n = store.notification().unwrap();
    assert_eq!(n.message, "second");
    assert!(n.is_error());
}

#[test]
fn test_toggle_theme_persists_and_emits() {
    let h = Harness::empty();
    let mut store = h.store();
    let observer = Arc::new(RecordingObserver::default());
    store.subscribe(observer.clone());
    assert_eq!(store.toggle_theme(), Theme::Dark);
    assert_eq!(h.kv.peek(KEY_THEME).as_deref(), Some("dark"));
    let events = observer.0.lock().unwrap().clone();
    assert_eq!(events, vec![StoreEvent::ThemeChanged(Theme::Dark)]);
}

// --- 永続化の失敗

#[test]
fn test_write_failure_keeps_memory_state_and_logs() {
    let h = Harness::empty();
    let mut store = h.store();
    h.kv.set_fail_writes(true);
    let id = store.add_prompt(new_prompt("T"));
    assert!(store.find_personal(&id).is_some());
    assert_eq!(h.kv.peek(KEY_PERSONAL).as_deref(), Some("[]"));
    let warnings = h.log.warnings();
    assert!(warnings.iter().any(|r| {
        r.layer.as_deref() == Some("store") && r.kind.as_deref() == Some("persistence")
    }));
    assert_eq!(store.notification().unwrap().kind, NotificationKind::Success);
}

#[test]
fn test_observer_sees_personal_change_and_notification() {
    let h = Harness::empty();
    let mut store = h.store();
    let observer = Arc::new(RecordingObserver::default());
    store.subscribe(observer.clone());
    store.add_prompt(new_prompt("T"));
    let events = observer.0.lock().unwrap().clone();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], StoreEvent::PersonalChanged);
    assert!(matches!(events[1], StoreEvent::Notification(_)));
}

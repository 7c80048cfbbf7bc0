use chrono::NaiveDate;
use vleben_core::{
    Category, DocumentKind, DocumentStore, FixedClock, Journal, LevelState, MemoryStore,
    XP_PER_LEVEL_STEP,
};

fn journal_with(store: MemoryStore) -> Journal<MemoryStore, FixedClock> {
    let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
    Journal::open_with_clock(store, clock).unwrap()
}

#[test]
fn five_task_additions_follow_the_level_up_loop() {
    let mut journal = journal_with(MemoryStore::new());
    let mut observed = Vec::new();
    for index in 0..5 {
        let _ = journal
            .add_task(&format!("task {index}"), Category::General, None)
            .unwrap();
        observed.push(journal.level());
    }

    assert_eq!(
        observed,
        vec![
            LevelState { xp: 5, level: 1 },
            LevelState { xp: 10, level: 1 },
            LevelState { xp: 15, level: 1 },
            LevelState { xp: 0, level: 2 },
            LevelState { xp: 5, level: 2 },
        ]
    );
}

#[test]
fn invariant_holds_after_every_grant() {
    let mut state = LevelState::default();
    for amount in [2, 5, 10, 2, 2, 10, 5, 5, 10, 10, 2, 5].iter().cycle().take(300) {
        let report = state.grant(*amount);
        assert_eq!(report.state, state);
        assert!(state.level >= 1);
        assert!(state.xp < state.level * XP_PER_LEVEL_STEP, "{state:?}");
    }
}

#[test]
fn thought_grants_two_xp_and_persists_level() {
    let mut journal = journal_with(MemoryStore::new());
    let grant = journal
        .add_thought("feeling focused")
        .unwrap()
        .applied()
        .unwrap();

    assert_eq!(grant.amount, 2);
    assert_eq!(grant.levels_gained, 0);
    let raw = journal.store().read(DocumentKind::Level).unwrap().unwrap();
    let stored: LevelState = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, LevelState { xp: 2, level: 1 });
}

#[test]
fn externally_edited_level_is_normalized_on_open() {
    let store = MemoryStore::new();
    store
        .write(DocumentKind::Level, r#"{"xp": 70, "level": 1}"#)
        .unwrap();
    let journal = journal_with(store);
    // 70 - 20 = 50, 50 - 40 = 10 < 60
    assert_eq!(journal.level(), LevelState { xp: 10, level: 3 });
}

#[test]
fn maximum_level_document_opens_without_overflow() {
    let store = MemoryStore::new();
    store
        .write(DocumentKind::Level, r#"{"xp": 4294967295, "level": 4294967295}"#)
        .unwrap();
    let mut journal = journal_with(store);
    assert_eq!(journal.level().level, u32::MAX);

    let _ = journal.add_thought("still counting").unwrap();
    assert_eq!(journal.level().level, u32::MAX);
}

#[test]
fn status_reports_xp_to_next_level() {
    let mut journal = journal_with(MemoryStore::new());
    let _ = journal.add_task("a", Category::Work, None).unwrap();
    let _ = journal.add_thought("b").unwrap();

    let status = journal.status();
    assert_eq!(status.level, 1);
    assert_eq!(status.xp, 7);
    assert_eq!(status.xp_to_next_level, 13);
    assert_eq!(status.task_count, 1);
    assert_eq!(status.thought_count, 1);
}

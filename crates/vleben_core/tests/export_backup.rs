use chrono::NaiveDate;
use std::fs;
use vleben_core::{
    Category, DocumentKind, DocumentStore, FileStore, FixedClock, Journal, MemoryStore,
};

fn clock() -> FixedClock {
    FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
}

#[test]
fn export_writes_task_rows_then_thought_rows() {
    let temp = tempfile::tempdir().unwrap();
    let mut journal = Journal::open_with_clock(MemoryStore::new(), clock()).unwrap();
    let _ = journal.add_task("Buy milk", Category::General, None).unwrap();
    let _ = journal.add_thought("Feeling good").unwrap();

    let path = temp.path().join("journal.csv");
    let report = journal.export_csv(&path).unwrap();
    assert_eq!(report.task_rows, 1);
    assert_eq!(report.thought_rows, 1);

    let csv = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = csv.split_terminator("\r\n").collect();
    assert_eq!(
        lines,
        [
            "Type,Text,Category,Deadline",
            "Task,Buy milk,General,",
            "Thought,Feeling good,,",
        ]
    );
}

#[test]
fn export_includes_deadlines() {
    let mut journal = Journal::open_with_clock(MemoryStore::new(), clock()).unwrap();
    let _ = journal
        .add_task("exam", Category::School, NaiveDate::from_ymd_opt(2026, 12, 3))
        .unwrap();
    let csv = vleben_core::render_csv(journal.tasks(), journal.thoughts());
    assert!(csv.contains("Task,exam,School,2026-12-03\r\n"));
}

#[test]
fn export_to_missing_directory_reports_error() {
    let temp = tempfile::tempdir().unwrap();
    let journal = Journal::open_with_clock(MemoryStore::new(), clock()).unwrap();
    let path = temp.path().join("missing").join("out.csv");

    let err = journal.export_csv(&path).unwrap_err();
    assert_eq!(err.path, path);
    assert!(err.to_string().contains("export to"));
    assert!(!path.exists());
}

#[test]
fn backup_copies_existing_documents_verbatim() {
    let temp = tempfile::tempdir().unwrap();
    let mut journal =
        Journal::open_with_clock(FileStore::open(temp.path()).unwrap(), clock()).unwrap();
    let _ = journal.add_task("backup me", Category::Work, None).unwrap();
    let _ = journal.add_thought("and me").unwrap();

    let report = journal.backup().unwrap();
    assert_eq!(
        report.copied,
        vec![DocumentKind::Tasks, DocumentKind::Thoughts, DocumentKind::Level]
    );
    assert_eq!(report.skipped, vec![DocumentKind::Goal]);

    let backup_dir = temp.path().join("backup");
    assert_eq!(report.directory.as_deref(), Some(backup_dir.as_path()));
    for name in ["tasks.json", "thoughts.json", "level.json"] {
        assert_eq!(
            fs::read(backup_dir.join(name)).unwrap(),
            fs::read(temp.path().join(name)).unwrap(),
            "{name} should be copied byte-for-byte"
        );
    }
    assert!(!backup_dir.join("goal.json").exists());
}

#[test]
fn backup_overwrites_previous_copies() {
    let temp = tempfile::tempdir().unwrap();
    let mut journal =
        Journal::open_with_clock(FileStore::open(temp.path()).unwrap(), clock()).unwrap();
    let _ = journal.add_thought("first").unwrap();
    journal.backup().unwrap();
    let _ = journal.add_thought("second").unwrap();
    journal.backup().unwrap();

    let copy = fs::read_to_string(temp.path().join("backup").join("thoughts.json")).unwrap();
    assert!(copy.contains("second"));
}

#[test]
fn memory_store_backup_snapshots_documents() {
    let mut journal = Journal::open_with_clock(MemoryStore::new(), clock()).unwrap();
    let _ = journal.set_goal("walk").unwrap();
    let report = journal.backup().unwrap();

    assert_eq!(report.directory, None);
    assert_eq!(report.copied, vec![DocumentKind::Goal]);
    assert_eq!(
        journal.store().backup_contents(DocumentKind::Goal),
        journal.store().read(DocumentKind::Goal).unwrap()
    );
}

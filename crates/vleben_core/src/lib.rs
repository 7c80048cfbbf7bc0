//! Core domain logic for the Virtuelles Leben journal.
//! This crate is the single source of truth for journal invariants.

pub mod clock;
pub mod export;
pub mod journal;
pub mod logging;
pub mod model;
pub mod motivation;
pub mod service;
pub mod stats;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use export::{render_csv, write_csv, ExportError, ExportReport};
pub use journal::{Journal, JournalError, JournalResult, TaskAdded};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::goal::{DailyGoal, GoalView};
pub use model::level::{LevelState, XpGrant, XP_PER_LEVEL_STEP};
pub use model::task::{
    parse_date, parse_deadline, Category, CategoryParseError, DeadlineParseError, Task, TaskId,
};
pub use model::thought::Thought;
pub use motivation::random_quote;
pub use service::outcome::{Ignored, Mutation};
pub use service::progression::Reward;
pub use service::task_ledger::{TaskEdit, TaskFilter};
pub use stats::{JournalStats, StatusSummary};
pub use store::{BackupReport, DocumentKind, DocumentStore, FileStore, MemoryStore, StoreError};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

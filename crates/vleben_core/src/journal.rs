//! Journal controller: application state plus persistence.
//!
//! # Responsibility
//! - Load the four journal documents into one explicit state struct.
//! - Route each user action to its component and persist the touched documents.
//! - Grant XP for rewarded actions through the progression engine.
//!
//! # Invariants
//! - Every applied mutation is persisted before the call returns.
//! - Ignored mutations write nothing.
//! - Documents are independent; no write spans more than one document except
//!   the reward pair (changed document first, then `level.json`).

use crate::clock::{Clock, SystemClock};
use crate::export::{write_csv, ExportError, ExportReport};
use crate::model::goal::{DailyGoal, GoalDocument, GoalView};
use crate::model::level::{LevelState, XpGrant};
use crate::model::task::{assign_missing_ids, Category, Task, TaskId};
use crate::model::thought::Thought;
use crate::service::goal_tracker::GoalTracker;
use crate::service::outcome::{Ignored, Mutation};
use crate::service::progression::{Progression, Reward};
use crate::service::task_ledger::{TaskEdit, TaskFilter, TaskLedger};
use crate::service::thought_log::ThoughtLog;
use crate::stats::{JournalStats, StatusSummary};
use crate::store::{load, save, BackupReport, DocumentKind, DocumentStore, StoreError};
use chrono::NaiveDate;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Debug)]
pub enum JournalError {
    Store(StoreError),
    Export(ExportError),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<StoreError> for JournalError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ExportError> for JournalError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Applied task creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskAdded {
    pub id: TaskId,
    pub grant: XpGrant,
}

/// Single-user journal state owned by one controller.
pub struct Journal<S: DocumentStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    ledger: TaskLedger,
    thoughts: ThoughtLog,
    goal: GoalTracker,
    progression: Progression,
}

impl<S: DocumentStore> Journal<S, SystemClock> {
    /// Opens the journal with the host's local date as "today".
    pub fn open(store: S) -> JournalResult<Self> {
        Self::open_with_clock(store, SystemClock)
    }
}

impl<S: DocumentStore, C: Clock> Journal<S, C> {
    /// Loads all four documents; missing documents start from their defaults.
    ///
    /// Tasks stored without an id get one, and the tasks document is
    /// rewritten once so those ids survive the next open.
    ///
    /// # Errors
    /// - Returns `StoreError::Malformed` for documents that are not valid JSON
    ///   of the expected shape.
    /// - Returns `StoreError::InvalidData` for a zero level or an unreadable
    ///   goal date.
    pub fn open_with_clock(store: S, clock: C) -> JournalResult<Self> {
        let mut tasks: Vec<Task> = load(&store, DocumentKind::Tasks)?.unwrap_or_default();
        let assigned = assign_missing_ids(&mut tasks);
        if assigned > 0 {
            save(&store, DocumentKind::Tasks, &tasks)?;
            info!("event=task_ids_assigned module=journal status=ok count={assigned}");
        }
        let thoughts: Vec<Thought> = load(&store, DocumentKind::Thoughts)?.unwrap_or_default();
        let level: LevelState = load(&store, DocumentKind::Level)?.unwrap_or_default();
        if level.level == 0 {
            return Err(StoreError::InvalidData {
                kind: DocumentKind::Level,
                message: "level must be at least 1".to_string(),
            }
            .into());
        }
        let goal = match load::<GoalDocument, _>(&store, DocumentKind::Goal)? {
            Some(document) => document.into_goal().map_err(|err| StoreError::InvalidData {
                kind: DocumentKind::Goal,
                message: err.to_string(),
            })?,
            None => None,
        };

        info!(
            "event=journal_open module=journal status=ok tasks={} thoughts={} level={} goal_set={}",
            tasks.len(),
            thoughts.len(),
            level.level,
            goal.is_some()
        );

        Ok(Self {
            store,
            clock,
            ledger: TaskLedger::new(tasks),
            thoughts: ThoughtLog::new(thoughts),
            goal: GoalTracker::new(goal),
            progression: Progression::new(level),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ---- tasks ----

    pub fn tasks(&self) -> &[Task] {
        self.ledger.tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.ledger.get(id)
    }

    /// Lazy, restartable filtered view in ledger order.
    pub fn filter_tasks(&self, filter: TaskFilter) -> impl Iterator<Item = &Task> + Clone + '_ {
        self.ledger.filter(filter)
    }

    /// Appends a task and grants the task reward.
    pub fn add_task(
        &mut self,
        text: &str,
        category: Category,
        deadline: Option<NaiveDate>,
    ) -> JournalResult<Mutation<TaskAdded>> {
        let id = match self.ledger.add(text, category, deadline) {
            Mutation::Applied(id) => id,
            Mutation::Ignored(reason) => return Ok(self.skipped("task_add", reason)),
        };
        self.save_tasks()?;
        info!(
            "event=task_add module=journal status=ok task_id={id} category={} has_deadline={}",
            category,
            deadline.is_some()
        );
        let grant = self.reward(Reward::TaskAdded)?;
        Ok(Mutation::Applied(TaskAdded { id, grant }))
    }

    /// Replaces a task addressed by stable id.
    pub fn edit_task(&mut self, id: TaskId, edit: &TaskEdit) -> JournalResult<Mutation<TaskId>> {
        let outcome = self.ledger.edit(id, edit);
        self.after_task_change("task_edit", outcome)
    }

    /// Replaces the task at `index` (zero-based) of the filtered view.
    pub fn edit_task_at(
        &mut self,
        filter: TaskFilter,
        index: usize,
        edit: &TaskEdit,
    ) -> JournalResult<Mutation<TaskId>> {
        let outcome = self.ledger.edit_at(filter, index, edit);
        self.after_task_change("task_edit", outcome)
    }

    /// Removes a task addressed by stable id.
    pub fn delete_task(&mut self, id: TaskId) -> JournalResult<Mutation<Task>> {
        let outcome = self.ledger.delete(id);
        self.after_task_removal(outcome)
    }

    /// Removes the task at `index` (zero-based) of the filtered view.
    ///
    /// Confirmation belongs to the caller.
    pub fn delete_task_at(
        &mut self,
        filter: TaskFilter,
        index: usize,
    ) -> JournalResult<Mutation<Task>> {
        let outcome = self.ledger.delete_at(filter, index);
        self.after_task_removal(outcome)
    }

    // ---- thoughts ----

    pub fn thoughts(&self) -> &[Thought] {
        self.thoughts.all()
    }

    pub fn latest_thought(&self) -> Option<&Thought> {
        self.thoughts.latest()
    }

    /// Appends a thought and grants the thought reward.
    pub fn add_thought(&mut self, text: &str) -> JournalResult<Mutation<XpGrant>> {
        if let Mutation::Ignored(reason) = self.thoughts.add(text) {
            return Ok(self.skipped("thought_add", reason));
        }
        save(&self.store, DocumentKind::Thoughts, self.thoughts.all())?;
        info!(
            "event=thought_add module=journal status=ok thoughts={}",
            self.thoughts.len()
        );
        let grant = self.reward(Reward::ThoughtAdded)?;
        Ok(Mutation::Applied(grant))
    }

    // ---- daily goal ----

    /// Stored goal, even if it belongs to another day.
    pub fn current_goal(&self) -> Option<&DailyGoal> {
        self.goal.current()
    }

    pub fn goal_view(&self) -> GoalView {
        self.goal.view(self.clock.today())
    }

    /// Replaces the goal with an open goal for today.
    pub fn set_goal(&mut self, text: &str) -> JournalResult<Mutation<()>> {
        let today = self.clock.today();
        if let Mutation::Ignored(reason) = self.goal.set(today, text) {
            return Ok(self.skipped("goal_set", reason));
        }
        self.save_goal()?;
        info!("event=goal_set module=journal status=ok date={today}");
        Ok(Mutation::Applied(()))
    }

    /// Marks today's open goal done and grants the goal reward.
    pub fn complete_goal(&mut self) -> JournalResult<Mutation<XpGrant>> {
        let today = self.clock.today();
        if let Mutation::Ignored(reason) = self.goal.complete(today) {
            return Ok(self.skipped("goal_complete", reason));
        }
        self.save_goal()?;
        info!("event=goal_complete module=journal status=ok date={today}");
        let grant = self.reward(Reward::GoalCompleted)?;
        Ok(Mutation::Applied(grant))
    }

    // ---- progression, reporting, files ----

    pub fn level(&self) -> LevelState {
        self.progression.state()
    }

    pub fn stats(&self) -> JournalStats {
        JournalStats::compute(self.ledger.tasks(), self.thoughts.all())
    }

    pub fn status(&self) -> StatusSummary {
        StatusSummary::new(self.progression.state(), self.ledger.len(), self.thoughts.len())
    }

    /// Copies the current documents into the store's backup location.
    pub fn backup(&self) -> JournalResult<BackupReport> {
        Ok(self.store.backup()?)
    }

    /// Writes the CSV export; failures are returned for the caller to report.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<ExportReport, ExportError> {
        write_csv(path, self.ledger.tasks(), self.thoughts.all())
    }

    fn reward(&mut self, reward: Reward) -> JournalResult<XpGrant> {
        let grant = self.progression.reward(reward);
        save(&self.store, DocumentKind::Level, &self.progression.state())?;
        Ok(grant)
    }

    fn save_tasks(&self) -> JournalResult<()> {
        save(&self.store, DocumentKind::Tasks, self.ledger.tasks())?;
        Ok(())
    }

    fn save_goal(&self) -> JournalResult<()> {
        let document = GoalDocument::from_goal(self.goal.current());
        save(&self.store, DocumentKind::Goal, &document)?;
        Ok(())
    }

    fn after_task_change(
        &self,
        event: &str,
        outcome: Mutation<TaskId>,
    ) -> JournalResult<Mutation<TaskId>> {
        match outcome {
            Mutation::Applied(id) => {
                self.save_tasks()?;
                info!("event={event} module=journal status=ok task_id={id}");
                Ok(Mutation::Applied(id))
            }
            Mutation::Ignored(reason) => Ok(self.skipped(event, reason)),
        }
    }

    fn after_task_removal(&self, outcome: Mutation<Task>) -> JournalResult<Mutation<Task>> {
        match outcome {
            Mutation::Applied(task) => {
                self.save_tasks()?;
                info!(
                    "event=task_delete module=journal status=ok task_id={} tasks={}",
                    task.id,
                    self.ledger.len()
                );
                Ok(Mutation::Applied(task))
            }
            Mutation::Ignored(reason) => Ok(self.skipped("task_delete", reason)),
        }
    }

    fn skipped<T>(&self, event: &str, reason: Ignored) -> Mutation<T> {
        debug!("event={event} module=journal status=skip reason=\"{reason}\"");
        Mutation::Ignored(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::Journal;
    use crate::clock::FixedClock;
    use crate::model::level::LevelState;
    use crate::model::task::Category;
    use crate::store::{DocumentKind, DocumentStore, MemoryStore, StoreError};
    use crate::JournalError;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
    }

    #[test]
    fn open_on_empty_store_uses_defaults() {
        let journal = Journal::open_with_clock(MemoryStore::new(), clock()).unwrap();
        assert!(journal.tasks().is_empty());
        assert!(journal.latest_thought().is_none());
        assert!(journal.current_goal().is_none());
        assert_eq!(journal.level(), LevelState::default());
    }

    #[test]
    fn open_rejects_zero_level() {
        let store = MemoryStore::new();
        store
            .write(DocumentKind::Level, r#"{"xp": 3, "level": 0}"#)
            .unwrap();
        let err = Journal::open_with_clock(store, clock()).err().unwrap();
        assert!(matches!(
            err,
            JournalError::Store(StoreError::InvalidData {
                kind: DocumentKind::Level,
                ..
            })
        ));
    }

    #[test]
    fn ignored_add_writes_nothing() {
        let mut journal = Journal::open_with_clock(MemoryStore::new(), clock()).unwrap();
        let outcome = journal.add_task("   ", Category::Work, None).unwrap();
        assert!(!outcome.is_applied());
        assert_eq!(journal.store().read(DocumentKind::Tasks).unwrap(), None);
        assert_eq!(journal.store().read(DocumentKind::Level).unwrap(), None);
    }
}

//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose journal actions to Dart via FRB as flat response envelopes.
//! - Map validation no-ops and store failures to `ok=false` with a message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Entry calls are serialized; each one opens, mutates and persists the
//!   journal before returning.
//! - Task ids cross the boundary as hyphenated UUID strings.

use chrono::NaiveDate;
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use vleben_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_date,
    parse_deadline, ping as ping_inner, Category, FileStore, GoalView, Journal, JournalError,
    Mutation, Task, TaskEdit, TaskFilter, TaskId,
};

const ENTRY_DATA_DIR_NAME: &str = "vleben_data";
static ENTRY_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static ENTRY_LOCK: Mutex<()> = Mutex::new(());

type EntryJournal = Journal<FileStore>;

/// Health-check call for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling log files.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the same `level + log_dir` is accepted.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.trim()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether the action changed state (or, for reads, found something).
    pub ok: bool,
    /// Affected task id, for task actions.
    pub task_id: Option<String>,
    /// Human-readable message for the UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, task_id: Option<TaskId>) -> Self {
        Self {
            ok: true,
            task_id: task_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// One row of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTaskItem {
    pub task_id: String,
    pub text: String,
    /// English category label.
    pub category: String,
    /// `YYYY-MM-DD`, absent for undated tasks.
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTaskListResponse {
    pub ok: bool,
    pub items: Vec<EntryTaskItem>,
    pub message: String,
}

/// Level, counts and today's goal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryStatusResponse {
    pub ok: bool,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub task_count: u32,
    pub thought_count: u32,
    /// Today's goal text, absent when none is set for today.
    pub goal: Option<String>,
    pub goal_done: bool,
    pub message: String,
}

/// Adds a task (+5 XP).
///
/// `category` accepts English or German names; blank means `General`.
/// `deadline` must be `YYYY-MM-DD` or blank.
///
/// # FFI contract
/// - Sync call, file-backed; writes `tasks.json` then `level.json`.
/// - Never panics.
/// - Returns the new task id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_task(
    text: String,
    category: Option<String>,
    deadline: Option<String>,
) -> EntryActionResponse {
    let input = parse_category_arg(category.as_deref())
        .and_then(|category| Ok((category, parse_deadline_arg(deadline.as_deref())?)));
    let (category, deadline) = match input {
        Ok(parsed) => parsed,
        Err(message) => return EntryActionResponse::failure(message),
    };
    action("entry_add_task", |journal| {
        Ok(match journal.add_task(&text, category, deadline)? {
            Mutation::Applied(added) => EntryActionResponse::success(
                format!("Task added. {}", grant_message(added.grant)),
                Some(added.id),
            ),
            Mutation::Ignored(reason) => EntryActionResponse::failure(reason.to_string()),
        })
    })
}

/// Lists tasks in ledger order, optionally filtered by category and cutoff.
///
/// A cutoff hides tasks without a deadline.
///
/// # FFI contract
/// - Sync call, read-only.
/// - Never panics.
/// - Item ids stay valid for later edit/delete calls.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_list_tasks(category: Option<String>, due_by: Option<String>) -> EntryTaskListResponse {
    let filter = parse_filter(category.as_deref(), due_by.as_deref());
    let response = filter.and_then(|filter| {
        with_journal(|journal| {
            Ok(journal
                .filter_tasks(filter)
                .map(to_task_item)
                .collect::<Vec<_>>())
        })
        .map_err(|err| format!("entry_list_tasks failed: {err}"))
    });
    match response {
        Ok(items) => {
            let message = if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("Found {} task(s).", items.len())
            };
            EntryTaskListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(message) => EntryTaskListResponse {
            ok: false,
            items: Vec::new(),
            message,
        },
    }
}

/// Edits a task by id. `None` fields (and a blank category) keep their
/// current value; a blank `deadline` clears it.
///
/// # FFI contract
/// - Sync call, file-backed.
/// - Never panics.
/// - Unknown or malformed ids return `ok=false`; no XP is granted.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_edit_task(
    task_id: String,
    text: Option<String>,
    category: Option<String>,
    deadline: Option<String>,
) -> EntryActionResponse {
    let id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => return EntryActionResponse::failure(message),
    };
    let new_category = match category.as_deref().filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => match parse_category_arg(Some(raw)) {
            Ok(category) => Some(category),
            Err(message) => return EntryActionResponse::failure(message),
        },
        None => None,
    };
    let new_deadline = match deadline.as_deref() {
        Some(raw) => match parse_deadline_arg(Some(raw)) {
            Ok(deadline) => Some(deadline),
            Err(message) => return EntryActionResponse::failure(message),
        },
        None => None,
    };

    action("entry_edit_task", |journal| {
        let Some(current) = journal.task(id) else {
            return Ok(EntryActionResponse::failure(format!("task not found: {id}")));
        };
        let edit = TaskEdit {
            text: text.clone().unwrap_or_else(|| current.text.clone()),
            category: new_category.unwrap_or(current.category),
            deadline: new_deadline.unwrap_or(current.deadline),
        };
        Ok(match journal.edit_task(id, &edit)? {
            Mutation::Applied(id) => EntryActionResponse::success("Task updated.", Some(id)),
            Mutation::Ignored(reason) => EntryActionResponse::failure(reason.to_string()),
        })
    })
}

/// Deletes a task by id. Confirmation is the UI's responsibility.
///
/// # FFI contract
/// - Sync call, file-backed.
/// - Never panics.
/// - Returns the removed task id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_task(task_id: String) -> EntryActionResponse {
    let id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => return EntryActionResponse::failure(message),
    };
    action("entry_delete_task", |journal| {
        Ok(match journal.delete_task(id)? {
            Mutation::Applied(task) => EntryActionResponse::success("Task deleted.", Some(task.id)),
            Mutation::Ignored(reason) => EntryActionResponse::failure(reason.to_string()),
        })
    })
}

/// Records a thought (+2 XP).
///
/// # FFI contract
/// - Sync call, file-backed.
/// - Never panics.
/// - Blank text returns `ok=false` and writes nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_thought(text: String) -> EntryActionResponse {
    action("entry_add_thought", |journal| {
        Ok(match journal.add_thought(&text)? {
            Mutation::Applied(grant) => {
                EntryActionResponse::success(format!("Thought saved. {}", grant_message(grant)), None)
            }
            Mutation::Ignored(reason) => EntryActionResponse::failure(reason.to_string()),
        })
    })
}

/// Returns the latest thought as the message; `ok=false` when none exist.
///
/// # FFI contract
/// - Sync call, read-only.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_latest_thought() -> EntryActionResponse {
    action("entry_latest_thought", |journal| {
        Ok(match journal.latest_thought() {
            Some(thought) => EntryActionResponse::success(thought.text.clone(), None),
            None => EntryActionResponse::failure("No thoughts yet."),
        })
    })
}

/// Sets today's goal, replacing any previous one.
///
/// # FFI contract
/// - Sync call, file-backed.
/// - Never panics.
/// - Blank text returns `ok=false` and keeps the previous goal.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_set_goal(text: String) -> EntryActionResponse {
    action("entry_set_goal", |journal| {
        Ok(match journal.set_goal(&text)? {
            Mutation::Applied(()) => EntryActionResponse::success("Daily goal set.", None),
            Mutation::Ignored(reason) => EntryActionResponse::failure(reason.to_string()),
        })
    })
}

/// Completes today's open goal (+10 XP). Repeated calls are no-ops.
///
/// # FFI contract
/// - Sync call, file-backed.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_complete_goal() -> EntryActionResponse {
    action("entry_complete_goal", |journal| {
        Ok(match journal.complete_goal()? {
            Mutation::Applied(grant) => EntryActionResponse::success(
                format!("Daily goal done. {}", grant_message(grant)),
                None,
            ),
            Mutation::Ignored(reason) => EntryActionResponse::failure(reason.to_string()),
        })
    })
}

/// Level, XP and counts plus today's goal.
///
/// # FFI contract
/// - Sync call, read-only.
/// - Never panics; failures return `ok=false` with zeroed fields.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_status() -> EntryStatusResponse {
    let response = with_journal(|journal| {
        let summary = journal.status();
        let (goal, goal_done) = match journal.goal_view() {
            GoalView::None => (None, false),
            GoalView::Open(text) => (Some(text), false),
            GoalView::Done(text) => (Some(text), true),
        };
        Ok(EntryStatusResponse {
            ok: true,
            level: summary.level,
            xp: summary.xp,
            xp_to_next_level: summary.xp_to_next_level,
            task_count: saturating_u32(summary.task_count),
            thought_count: saturating_u32(summary.thought_count),
            goal,
            goal_done,
            message: format!("Level {} | XP {}", summary.level, summary.xp),
        })
    });
    response.unwrap_or_else(|err| EntryStatusResponse {
        message: format!("entry_status failed: {err}"),
        ..EntryStatusResponse::default()
    })
}

/// Copies the data files into `<data dir>/backup`.
///
/// # FFI contract
/// - Sync call, file-backed; copies each existing document verbatim.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_backup() -> EntryActionResponse {
    action("entry_backup", |journal| {
        let report = journal.backup()?;
        Ok(EntryActionResponse::success(
            format!("Backup saved ({} file(s)).", report.copied.len()),
            None,
        ))
    })
}

/// Writes tasks and thoughts as CSV to `path`.
///
/// # FFI contract
/// - Sync call; replaces any file at `path`.
/// - Never panics.
/// - I/O failures return `ok=false` with the error message.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_export_csv(path: String) -> EntryActionResponse {
    let path = path.trim().to_string();
    if path.is_empty() {
        return EntryActionResponse::failure("export path is empty");
    }
    action("entry_export_csv", |journal| {
        let report = journal.export_csv(&path)?;
        Ok(EntryActionResponse::success(
            format!(
                "Exported {} task(s) and {} thought(s).",
                report.task_rows, report.thought_rows
            ),
            None,
        ))
    })
}

fn resolve_entry_data_dir() -> PathBuf {
    ENTRY_DATA_DIR
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("VLEBEN_DATA_DIR") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ENTRY_DATA_DIR_NAME)
        })
        .clone()
}

/// Opens the journal under the entry lock and runs `f` against it.
fn with_journal<T>(
    f: impl FnOnce(&mut EntryJournal) -> Result<T, JournalError>,
) -> Result<T, JournalError> {
    let _guard = ENTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let store = FileStore::open(resolve_entry_data_dir())?;
    let mut journal = Journal::open(store)?;
    f(&mut journal)
}

fn action(
    name: &str,
    f: impl FnOnce(&mut EntryJournal) -> Result<EntryActionResponse, JournalError>,
) -> EntryActionResponse {
    with_journal(f).unwrap_or_else(|err| {
        warn!("event={name} module=ffi status=error error_kind={}", error_kind(&err));
        EntryActionResponse::failure(format!("{name} failed: {err}"))
    })
}

fn error_kind(err: &JournalError) -> &'static str {
    match err {
        JournalError::Store(_) => "store",
        JournalError::Export(_) => "export",
    }
}

fn parse_filter(category: Option<&str>, due_by: Option<&str>) -> Result<TaskFilter, String> {
    let category = match category.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => Some(raw.parse::<Category>().map_err(|err| err.to_string())?),
        None => None,
    };
    let due_by = match due_by.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => Some(parse_date(raw).map_err(|err| err.to_string())?),
        None => None,
    };
    Ok(TaskFilter { category, due_by })
}

fn parse_category_arg(raw: Option<&str>) -> Result<Category, String> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => raw.parse::<Category>().map_err(|err| err.to_string()),
        None => Ok(Category::default()),
    }
}

fn parse_deadline_arg(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    parse_deadline(raw.unwrap_or_default()).map_err(|err| err.to_string())
}

fn parse_task_id(raw: &str) -> Result<TaskId, String> {
    TaskId::parse_str(raw.trim()).map_err(|_| format!("invalid task id `{}`", raw.trim()))
}

fn to_task_item(task: &Task) -> EntryTaskItem {
    EntryTaskItem {
        task_id: task.id.to_string(),
        text: task.text.clone(),
        category: task.category.label().to_string(),
        deadline: task.deadline.map(|date| date.to_string()),
    }
}

fn grant_message(grant: vleben_core::XpGrant) -> String {
    let mut message = format!(
        "+{} XP (Level {} | XP {})",
        grant.amount, grant.state.level, grant.state.xp
    );
    if grant.levels_gained > 0 {
        message.push_str(" Level up!");
    }
    message
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

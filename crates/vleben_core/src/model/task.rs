//! Task domain model.
//!
//! # Responsibility
//! - Define the task record stored in the ledger document.
//! - Parse user-facing category and deadline input at the boundary.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and never empty after creation.
//! - `deadline` is omitted from the wire shape when unset.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Canonical wire/display format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date shape regex"));

/// Stable identifier assigned to a task at creation.
pub type TaskId = Uuid;

/// Fixed set of task categories.
///
/// German labels are accepted both on load and as user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(alias = "Allgemein")]
    General,
    #[serde(alias = "Schule")]
    School,
    #[serde(alias = "Arbeit")]
    Work,
    #[serde(alias = "Privat")]
    Private,
    #[serde(alias = "Sonstiges")]
    Other,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 5] = [
        Category::General,
        Category::School,
        Category::Work,
        Category::Private,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::School => "School",
            Self::Work => "Work",
            Self::Private => "Private",
            Self::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl Display for CategoryParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let known = Category::ALL
            .iter()
            .map(|category| category.label())
            .collect::<Vec<_>>()
            .join("|");
        write!(f, "unknown category `{}`; expected {known}", self.0)
    }
}

impl Error for CategoryParseError {}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "general" | "allgemein" => Ok(Self::General),
            "school" | "schule" => Ok(Self::School),
            "work" | "arbeit" => Ok(Self::Work),
            "private" | "privat" => Ok(Self::Private),
            "other" | "sonstiges" => Ok(Self::Other),
            _ => Err(CategoryParseError(value.to_string())),
        }
    }
}

/// Deadline input that is not a `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineParseError(pub String);

impl Display for DeadlineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date `{}`; expected YYYY-MM-DD", self.0)
    }
}

impl Error for DeadlineParseError {}

/// Parses optional deadline input.
///
/// Blank input means "no deadline" and yields `Ok(None)`.
pub fn parse_deadline(input: &str) -> Result<Option<NaiveDate>, DeadlineParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_date(trimmed).map(Some)
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DeadlineParseError> {
    let trimmed = input.trim();
    // chrono alone accepts single-digit month/day; the stored format does not.
    if !DATE_SHAPE_RE.is_match(trimmed) {
        return Err(DeadlineParseError(input.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DeadlineParseError(input.to_string()))
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Nil for documents written before ids existed; see [`assign_missing_ids`].
    #[serde(default = "Uuid::nil")]
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub category: Category,
    /// Older documents may carry `""` for "no deadline".
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_deadline"
    )]
    pub deadline: Option<NaiveDate>,
}

fn deserialize_deadline<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_deadline(&raw).map_err(D::Error::custom),
        None => Ok(None),
    }
}

/// Gives every task loaded without an id a fresh one.
///
/// Returns how many ids were assigned; callers persist the ledger when this
/// is non-zero so the ids stay stable across loads.
pub fn assign_missing_ids(tasks: &mut [Task]) -> usize {
    let mut assigned = 0;
    for task in tasks.iter_mut().filter(|task| task.id.is_nil()) {
        task.id = Uuid::new_v4();
        assigned += 1;
    }
    assigned
}

impl Task {
    /// Creates a task with a fresh id.
    ///
    /// Returns `None` when `text` is blank after trimming.
    pub fn new(
        text: &str,
        category: Category,
        deadline: Option<NaiveDate>,
    ) -> Option<Self> {
        Self::with_id(Uuid::new_v4(), text, category, deadline)
    }

    /// Creates a task that keeps a caller-provided id (edit path).
    pub fn with_id(
        id: TaskId,
        text: &str,
        category: Category,
        deadline: Option<NaiveDate>,
    ) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id,
            text: text.to_string(),
            category,
            deadline,
        })
    }

    /// Deadline rendered in the stored format, or an empty string.
    pub fn deadline_label(&self) -> String {
        self.deadline
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{assign_missing_ids, parse_date, parse_deadline, Category, Task};
    use chrono::NaiveDate;

    #[test]
    fn new_trims_text_and_rejects_blank() {
        let task = Task::new("  buy milk  ", Category::General, None).expect("valid task");
        assert_eq!(task.text, "buy milk");
        assert!(Task::new("   ", Category::Work, None).is_none());
    }

    #[test]
    fn assign_missing_ids_only_touches_nil_ids() {
        let kept = Task::new("kept", Category::Work, None).unwrap();
        let mut tasks: Vec<Task> =
            serde_json::from_str(r#"[{"text":"a"},{"text":"b"}]"#).unwrap();
        tasks.push(kept.clone());

        assert_eq!(assign_missing_ids(&mut tasks), 2);
        assert!(tasks.iter().all(|task| !task.id.is_nil()));
        assert_ne!(tasks[0].id, tasks[1].id);
        assert_eq!(tasks[2].id, kept.id);
        assert_eq!(assign_missing_ids(&mut tasks), 0);
    }

    #[test]
    fn category_parses_english_and_german_labels() {
        assert_eq!("work".parse::<Category>().unwrap(), Category::Work);
        assert_eq!("Arbeit".parse::<Category>().unwrap(), Category::Work);
        assert_eq!(" Sonstiges ".parse::<Category>().unwrap(), Category::Other);
        assert!("hobby".parse::<Category>().is_err());
    }

    #[test]
    fn parse_deadline_treats_blank_as_none() {
        assert_eq!(parse_deadline("  ").unwrap(), None);
        assert_eq!(
            parse_deadline("2026-10-17").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 17)
        );
    }

    #[test]
    fn parse_date_requires_zero_padded_shape() {
        assert!(parse_date("2026-1-5").is_err());
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("17.10.2026").is_err());
    }

    #[test]
    fn wire_shape_omits_missing_deadline_and_defaults_legacy_fields() {
        let task = Task::new("read", Category::School, None).unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["category"], "School");
        assert!(json.get("deadline").is_none());

        let legacy: Task =
            serde_json::from_str(r#"{"text":"alt","category":"Privat","deadline":"2025-03-01"}"#)
                .unwrap();
        assert!(legacy.id.is_nil());
        assert_eq!(legacy.category, Category::Private);
        assert_eq!(legacy.deadline_label(), "2025-03-01");

        let bare: Task = serde_json::from_str(r#"{"text":"no category"}"#).unwrap();
        assert_eq!(bare.category, Category::General);

        let blank: Task = serde_json::from_str(r#"{"text":"x","deadline":""}"#).unwrap();
        assert_eq!(blank.deadline, None);
        assert!(serde_json::from_str::<Task>(r#"{"text":"x","deadline":"soon"}"#).is_err());
    }
}

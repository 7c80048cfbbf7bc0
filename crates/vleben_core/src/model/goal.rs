//! Daily goal model.
//!
//! # Invariants
//! - At most one goal exists at a time.
//! - `done` only moves from `false` to `true`.
//! - The on-disk "no goal" shape is `{"date": "", "goal": "", "done": false}`.

use super::task::{parse_date, DeadlineParseError, DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The current daily goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyGoal {
    pub date: NaiveDate,
    pub goal: String,
    pub done: bool,
}

impl DailyGoal {
    /// Returns `None` when `text` is blank after trimming.
    pub fn new(date: NaiveDate, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            date,
            goal: text.to_string(),
            done: false,
        })
    }

    pub fn is_for(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

/// What the presentation layer shows for "today's goal".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalView {
    /// No goal, or the stored goal belongs to another day.
    None,
    Open(String),
    Done(String),
}

/// Wire shape of `goal.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoalDocument {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub done: bool,
}

impl GoalDocument {
    pub fn from_goal(goal: Option<&DailyGoal>) -> Self {
        match goal {
            Some(goal) => Self {
                date: goal.date.format(DATE_FORMAT).to_string(),
                goal: goal.goal.clone(),
                done: goal.done,
            },
            None => Self::default(),
        }
    }

    /// Converts the wire shape into the domain goal.
    ///
    /// An empty date or empty goal text is the "no goal" placeholder.
    pub fn into_goal(self) -> Result<Option<DailyGoal>, DeadlineParseError> {
        if self.date.trim().is_empty() || self.goal.trim().is_empty() {
            return Ok(None);
        }
        let date = parse_date(&self.date)?;
        Ok(Some(DailyGoal {
            date,
            goal: self.goal,
            done: self.done,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{DailyGoal, GoalDocument};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn placeholder_document_means_no_goal() {
        let doc: GoalDocument =
            serde_json::from_str(r#"{"date": "", "goal": "", "done": false}"#).unwrap();
        assert_eq!(doc.into_goal().unwrap(), None);
    }

    #[test]
    fn document_roundtrips_goal() {
        let mut goal = DailyGoal::new(day(17), " run 5k ").unwrap();
        goal.done = true;
        let doc = GoalDocument::from_goal(Some(&goal));
        assert_eq!(doc.date, "2026-10-17");
        assert_eq!(doc.goal, "run 5k");
        assert_eq!(doc.into_goal().unwrap(), Some(goal));
    }

    #[test]
    fn invalid_stored_date_is_rejected() {
        let doc = GoalDocument {
            date: "yesterday".to_string(),
            goal: "x".to_string(),
            done: false,
        };
        assert!(doc.into_goal().is_err());
    }
}

//! Daily goal tracker.
//!
//! # Invariants
//! - Setting a goal replaces the previous one regardless of its state.
//! - Completion only applies to an open goal dated `today`.
//! - A stale goal is hidden from the view but kept until replaced.

use crate::model::goal::{DailyGoal, GoalView};
use crate::service::outcome::{Ignored, Mutation};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalTracker {
    goal: Option<DailyGoal>,
}

impl GoalTracker {
    pub fn new(goal: Option<DailyGoal>) -> Self {
        Self { goal }
    }

    /// Stored goal, including a stale one from another day.
    pub fn current(&self) -> Option<&DailyGoal> {
        self.goal.as_ref()
    }

    pub fn set(&mut self, today: NaiveDate, text: &str) -> Mutation<()> {
        match DailyGoal::new(today, text) {
            Some(goal) => {
                self.goal = Some(goal);
                Mutation::Applied(())
            }
            None => Mutation::Ignored(Ignored::EmptyText),
        }
    }

    pub fn complete(&mut self, today: NaiveDate) -> Mutation<()> {
        match self.goal.as_mut() {
            Some(goal) if goal.is_for(today) && !goal.done => {
                goal.done = true;
                Mutation::Applied(())
            }
            _ => Mutation::Ignored(Ignored::NothingToComplete),
        }
    }

    pub fn view(&self, today: NaiveDate) -> GoalView {
        match &self.goal {
            Some(goal) if goal.is_for(today) && goal.done => GoalView::Done(goal.goal.clone()),
            Some(goal) if goal.is_for(today) => GoalView::Open(goal.goal.clone()),
            _ => GoalView::None,
        }
    }
}

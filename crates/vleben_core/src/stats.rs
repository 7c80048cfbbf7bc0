//! Journal statistics and status summary.

use crate::model::level::LevelState;
use crate::model::task::{Category, Task};
use crate::model::thought::Thought;

/// Counts shown by the statistics view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalStats {
    pub total_tasks: usize,
    pub total_thoughts: usize,
    /// Task counts per category in first-seen ledger order; zero counts omitted.
    pub per_category: Vec<(Category, usize)>,
}

impl JournalStats {
    pub fn compute(tasks: &[Task], thoughts: &[Thought]) -> Self {
        let mut per_category: Vec<(Category, usize)> = Vec::new();
        for task in tasks {
            match per_category
                .iter_mut()
                .find(|(category, _)| *category == task.category)
            {
                Some((_, count)) => *count += 1,
                None => per_category.push((task.category, 1)),
            }
        }
        Self {
            total_tasks: tasks.len(),
            total_thoughts: thoughts.len(),
            per_category,
        }
    }

    /// Largest per-category count, used to scale bar charts.
    pub fn max_category_count(&self) -> usize {
        self.per_category
            .iter()
            .map(|(_, count)| *count)
            .max()
            .unwrap_or(0)
    }
}

/// Level and counts shown by the status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSummary {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub task_count: usize,
    pub thought_count: usize,
}

impl StatusSummary {
    pub fn new(state: LevelState, task_count: usize, thought_count: usize) -> Self {
        Self {
            level: state.level,
            xp: state.xp,
            xp_to_next_level: state.xp_to_next_level(),
            task_count,
            thought_count,
        }
    }
}

//! Task ledger: ordered task list with filtered views.
//!
//! # Responsibility
//! - Append, replace and remove tasks.
//! - Produce category/deadline filtered views in ledger order.
//! - Resolve positions in a filtered view to stable task ids.
//!
//! # Invariants
//! - Ledger order is insertion order; edits keep a task's position and id.
//! - Filtered-view positions resolve by id, so duplicate texts never alias.

use crate::model::task::{Category, Task, TaskId};
use crate::service::outcome::{Ignored, Mutation};
use chrono::NaiveDate;

/// Filter applied to the ledger.
///
/// With `due_by` set, tasks without a deadline are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub category: Option<Category>,
    pub due_by: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(category) = self.category {
            if task.category != category {
                return false;
            }
        }
        match (self.due_by, task.deadline) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(cutoff), Some(deadline)) => deadline <= cutoff,
        }
    }
}

/// Full replacement values for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub text: String,
    pub category: Category,
    /// `None` drops the deadline.
    pub deadline: Option<NaiveDate>,
}

/// In-memory task ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskLedger {
    tasks: Vec<Task>,
}

impl TaskLedger {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends a task; ignored when `text` is blank.
    pub fn add(
        &mut self,
        text: &str,
        category: Category,
        deadline: Option<NaiveDate>,
    ) -> Mutation<TaskId> {
        let Some(task) = Task::new(text, category, deadline) else {
            return Mutation::Ignored(Ignored::EmptyText);
        };
        let id = task.id;
        self.tasks.push(task);
        Mutation::Applied(id)
    }

    /// Lazy, restartable view over matching tasks in ledger order.
    pub fn filter(&self, filter: TaskFilter) -> impl Iterator<Item = &Task> + Clone + '_ {
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    /// Maps a zero-based position in the filtered view to a task id.
    pub fn resolve(&self, filter: TaskFilter, index: usize) -> Result<TaskId, Ignored> {
        let view = self.filter(filter);
        let len = view.clone().count();
        view.map(|task| task.id)
            .nth(index)
            .ok_or(Ignored::IndexOutOfRange { index, len })
    }

    /// Replaces a task wholesale, keeping its id and position.
    pub fn edit(&mut self, id: TaskId, edit: &TaskEdit) -> Mutation<TaskId> {
        let Some(position) = self.position(id) else {
            return Mutation::Ignored(Ignored::UnknownTask(id));
        };
        let Some(replacement) = Task::with_id(id, &edit.text, edit.category, edit.deadline) else {
            return Mutation::Ignored(Ignored::EmptyText);
        };
        self.tasks[position] = replacement;
        Mutation::Applied(id)
    }

    /// Edits the task at `index` of the filtered view.
    pub fn edit_at(&mut self, filter: TaskFilter, index: usize, edit: &TaskEdit) -> Mutation<TaskId> {
        if edit.text.trim().is_empty() {
            return Mutation::Ignored(Ignored::EmptyText);
        }
        match self.resolve(filter, index) {
            Ok(id) => self.edit(id, edit),
            Err(reason) => Mutation::Ignored(reason),
        }
    }

    /// Removes a task by id and returns it.
    pub fn delete(&mut self, id: TaskId) -> Mutation<Task> {
        match self.position(id) {
            Some(position) => Mutation::Applied(self.tasks.remove(position)),
            None => Mutation::Ignored(Ignored::UnknownTask(id)),
        }
    }

    /// Removes the task at `index` of the filtered view.
    pub fn delete_at(&mut self, filter: TaskFilter, index: usize) -> Mutation<Task> {
        match self.resolve(filter, index) {
            Ok(id) => self.delete(id),
            Err(reason) => Mutation::Ignored(reason),
        }
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

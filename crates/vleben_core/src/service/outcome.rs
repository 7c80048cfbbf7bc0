//! Mutation outcome shared by all journal components.

use crate::model::task::TaskId;
use std::fmt::{Display, Formatter};

/// Why a mutating call left state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Input text was empty after trimming.
    EmptyText,
    /// Index into the filtered view does not exist.
    IndexOutOfRange { index: usize, len: usize },
    UnknownTask(TaskId),
    /// No open goal for today.
    NothingToComplete,
}

impl Display for Ignored {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => f.write_str("text is empty"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range ({len} listed)")
            }
            Self::UnknownTask(id) => write!(f, "task not found: {id}"),
            Self::NothingToComplete => f.write_str("no goal set for today or already done"),
        }
    }
}

/// Result of a mutating call that may be a validation no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Mutation<T> {
    Applied(T),
    Ignored(Ignored),
}

impl<T> Mutation<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Ignored(_) => None,
        }
    }

    pub fn ignored(&self) -> Option<Ignored> {
        match self {
            Self::Applied(_) => None,
            Self::Ignored(reason) => Some(*reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mutation<U> {
        match self {
            Self::Applied(value) => Mutation::Applied(f(value)),
            Self::Ignored(reason) => Mutation::Ignored(reason),
        }
    }
}

//! Journal domain model.
//!
//! # Responsibility
//! - Define the records persisted in the four journal documents.
//! - Keep wire shapes compatible with existing data directories.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Level state always satisfies `xp < level * XP_PER_LEVEL_STEP`.

pub mod goal;
pub mod level;
pub mod task;
pub mod thought;

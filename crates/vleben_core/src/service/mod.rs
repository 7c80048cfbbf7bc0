//! In-memory journal components.
//!
//! # Responsibility
//! - Own one document each and apply its mutation rules.
//! - Report validation no-ops as `Mutation::Ignored` instead of errors.
//!
//! # Invariants
//! - Components never touch storage; the journal persists after mutations.
//! - An ignored mutation leaves component state unchanged.

pub mod goal_tracker;
pub mod outcome;
pub mod progression;
pub mod task_ledger;
pub mod thought_log;

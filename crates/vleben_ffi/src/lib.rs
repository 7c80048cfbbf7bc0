//! Flutter-facing bindings for the vleben journal.

pub mod api;

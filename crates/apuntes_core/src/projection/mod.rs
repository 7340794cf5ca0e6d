//! Observable projections handed to UI layers.
//!
//! # Invariants
//! - Projections never compute; they relay full snapshots as given.
//! - Notification is synchronous on the caller's thread.

pub mod notes;

//! Owned repositories over the store adapter.
//!
//! # Responsibility
//! - Hold each widget collection in memory in user-defined order.
//! - Mirror every mutation to the store before returning.
//!
//! # Invariants
//! - Callers never touch the backing `Vec`; all writes go through
//!   repository operations.
//! - Reordering accepts only an exact permutation of the current ids.

pub mod alarm_repo;
pub mod bookmark_repo;
pub mod collection;
pub mod note_repo;
pub mod settings_repo;
pub mod task_repo;

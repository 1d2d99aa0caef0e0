//! Time-driven use cases: reminders, alarms and the ringing controller.
//!
//! # Responsibility
//! - Decide what fires on a tick given the current local time.
//! - Route side effects through `platform` traits.
//!
//! # Invariants
//! - A tick runs to completion; nothing here sleeps or spawns.

pub mod alarm_service;
pub mod reminder_service;
pub mod ringing;

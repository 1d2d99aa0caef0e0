//! Due-task reminder poller.
//!
//! # Responsibility
//! - Fire one notification per task when its due minute arrives.
//!
//! # Invariants
//! - Fires only while `0 <= now - due < window`; a tick missed past the
//!   window (device asleep) drops that reminder for good.
//! - `reminded` is irreversible, so later ticks never fire again.

use crate::config::REMINDER_WINDOW;
use crate::model::task::Task;
use crate::platform::{notify, Notifier};
use crate::repo::collection::RepoResult;
use crate::repo::task_repo::TaskRepository;
use crate::store::KeyValueStore;
use chrono::{Duration, NaiveDateTime};
use log::info;

pub const REMINDER_TITLE: &str = "Task due";

/// Whether `task` is armed and `now` falls inside its reminder window.
pub fn should_fire_reminder(task: &Task, now: &NaiveDateTime, window: Duration) -> bool {
    if !task.is_armed() {
        return false;
    }
    let Some(due) = task.due_at() else {
        return false;
    };
    let elapsed = *now - due;
    elapsed >= Duration::zero() && elapsed < window
}

#[derive(Debug, Clone, Copy)]
pub struct ReminderPoller {
    window: Duration,
}

impl Default for ReminderPoller {
    fn default() -> Self {
        Self {
            window: Duration::seconds(REMINDER_WINDOW.as_secs() as i64),
        }
    }
}

impl ReminderPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Runs one poll. Returns how many reminders fired.
    ///
    /// The task list is written back only when something fired.
    pub fn tick<S: KeyValueStore>(
        &self,
        tasks: &mut TaskRepository<S>,
        notifier: &dyn Notifier,
        now: NaiveDateTime,
    ) -> RepoResult<usize> {
        let window = self.window;
        let fired = tasks.mark_reminded(
            |task| should_fire_reminder(task, &now, window),
            |task| {
                notify(notifier, REMINDER_TITLE, &task.text);
                info!(
                    "event=reminder_fire module=service status=ok task_id={}",
                    task.id
                );
            },
        )?;
        Ok(fired)
    }
}

//! Task repository.
//!
//! # Invariants
//! - Task text is trimmed; blank input adds nothing.
//! - `reminded` only changes through `mark_reminded`.

use super::collection::{Collection, Record, RepoResult};
use crate::clock::ClockTime;
use crate::config::TASKS_KEY;
use crate::model::task::{Priority, Task, TaskId};
use crate::model::EntityId;
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use log::{debug, info};

impl Record for Task {
    const STORE_KEY: &'static str = TASKS_KEY;

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Input for `TaskRepository::add_task`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<ClockTime>,
}

impl NewTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

pub struct TaskRepository<S> {
    tasks: Collection<Task, S>,
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn load(store: S) -> RepoResult<Self> {
        Ok(Self {
            tasks: Collection::load(store)?,
        })
    }

    pub fn reload(&mut self) -> RepoResult<()> {
        self.tasks.reload()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.items()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Appends a task. Returns `None` without writing when the text is blank.
    pub fn add_task(&mut self, new_task: NewTask) -> RepoResult<Option<TaskId>> {
        let text = new_task.text.trim();
        if text.is_empty() {
            debug!("event=task_add module=repo status=skip reason=empty_text");
            return Ok(None);
        }

        let mut task = Task::new(text, new_task.priority);
        task.due_date = new_task.due_date;
        task.due_time = new_task.due_time;
        let id = task.id;
        self.tasks.push(task)?;
        info!("event=task_add module=repo status=ok task_id={id}");
        Ok(Some(id))
    }

    /// Flips completion and returns the new `done` value.
    pub fn toggle_done(&mut self, id: TaskId) -> RepoResult<bool> {
        self.tasks.update(id, |task| {
            task.done = !task.done;
            task.done
        })
    }

    pub fn edit_text(&mut self, id: TaskId, text: &str) -> RepoResult<()> {
        let text = text.trim().to_string();
        self.tasks.update(id, |task| task.text = text)
    }

    pub fn remove(&mut self, id: TaskId) -> RepoResult<Task> {
        self.tasks.remove(id)
    }

    pub fn reorder(&mut self, ids: &[TaskId]) -> RepoResult<()> {
        self.tasks.reorder(ids)
    }

    /// Sets `reminded` on every task accepted by `is_due`, calling `on_fire`
    /// for each one, then persists once if anything changed.
    pub fn mark_reminded<P, F>(&mut self, mut is_due: P, mut on_fire: F) -> RepoResult<usize>
    where
        P: FnMut(&Task) -> bool,
        F: FnMut(&Task),
    {
        self.tasks.update_each(|task| {
            if !is_due(task) {
                return false;
            }
            on_fire(task);
            task.reminded = true;
            true
        })
    }
}

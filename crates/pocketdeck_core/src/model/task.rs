//! To-do record.
//!
//! # Invariants
//! - `reminded` is only ever set by the reminder poller once the due moment
//!   has been reached.
//! - Done tasks are never armed.

use super::EntityId;
use crate::clock::ClockTime;
use crate::config::DEFAULT_DUE_TIME;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = EntityId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Case-insensitive parse used by text front ends.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_time: Option<ClockTime>,
    #[serde(default)]
    pub reminded: bool,
}

impl Task {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            done: false,
            priority,
            due_date: None,
            due_time: None,
            reminded: false,
        }
    }

    /// Local due moment; a date without time is due at 09:00.
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        let date = self.due_date?;
        let time = self.due_time.unwrap_or(DEFAULT_DUE_TIME);
        Some(date.and_time(time.to_naive_time()))
    }

    /// Has a due date, is open, and has not reminded yet.
    pub fn is_armed(&self) -> bool {
        self.due_date.is_some() && !self.done && !self.reminded
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task};
    use chrono::NaiveDate;

    #[test]
    fn due_at_defaults_to_nine_am() {
        let mut task = Task::new("water plants", Priority::Low);
        assert_eq!(task.due_at(), None);

        task.due_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(
            task.due_at(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
        );

        task.due_time = Some("18:30".parse().unwrap());
        assert_eq!(
            task.due_at(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(18, 30, 0)
        );
    }

    #[test]
    fn decodes_records_with_null_due_fields() {
        let raw = r#"{"id":"6f1c1f5e-4c7b-4d8e-9a51-2f0f7e1f4a10","text":"Pay rent",
            "done":false,"priority":"High","dueDate":null,"dueTime":null,"reminded":false}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.priority, Priority::High);
        assert!(task.due_date.is_none());
        assert!(!task.is_armed());
    }

    #[test]
    fn encodes_camel_case_fields() {
        let mut task = Task::new("Pay rent", Priority::Medium);
        task.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        task.due_time = Some("09:00".parse().unwrap());
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], "2024-01-01");
        assert_eq!(value["dueTime"], "09:00");
        assert_eq!(value["priority"], "Medium");
    }
}

//! Alarm record and repeat rules.
//!
//! # Invariants
//! - `time` has minute granularity; seconds never take part in matching.
//! - A fired `once` alarm is deactivated, never deleted.

use super::{non_empty, EntityId};
use crate::clock::ClockTime;
use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AlarmId = EntityId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    #[default]
    Once,
    Daily,
    Weekdays,
    Weekends,
}

impl Repeat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Daily => "daily",
            Self::Weekdays => "weekdays",
            Self::Weekends => "weekends",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "once" => Some(Self::Once),
            "daily" => Some(Self::Daily),
            "weekdays" => Some(Self::Weekdays),
            "weekends" => Some(Self::Weekends),
            _ => None,
        }
    }

    /// Whether the rule allows firing on `day`. `once` ignores the weekday.
    pub fn allows(self, day: Weekday) -> bool {
        let weekend = matches!(day, Weekday::Sat | Weekday::Sun);
        match self {
            Self::Once | Self::Daily => true,
            Self::Weekdays => !weekend,
            Self::Weekends => weekend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: AlarmId,
    pub time: ClockTime,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub active: bool,
    /// Embedded sound as a data URL; the default sound plays when absent.
    #[serde(default)]
    pub sound_data_url: Option<String>,
}

impl Alarm {
    /// New alarms start active.
    pub fn new(time: ClockTime, label: Option<String>, repeat: Repeat) -> Self {
        Self {
            id: Uuid::new_v4(),
            time,
            label: non_empty(label),
            repeat,
            active: true,
            sound_data_url: None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.trim().is_empty())
    }

    /// Active, same minute of day, and allowed on this weekday.
    pub fn is_due(&self, now: &NaiveDateTime) -> bool {
        self.active && self.time == ClockTime::of(now) && self.repeat.allows(now.weekday())
    }

    /// Text shown in the ringing popup.
    pub fn popup_text(&self) -> String {
        match self.label() {
            Some(label) => label.to_string(),
            None => format!("Alarm at {}", self.time),
        }
    }

    /// Body of the notification sent when the alarm starts ringing.
    pub fn notification_body(&self) -> String {
        match self.label() {
            Some(label) => format!("{label} ({})", self.time),
            None => format!("Alarm at {}", self.time),
        }
    }
}

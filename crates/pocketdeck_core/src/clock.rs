//! Wall-clock access and the `HH:MM` time-of-day value.
//!
//! Pollers never read the system clock directly; they take a `Clock` so
//! tests can pin "now" to an exact local date-time.

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

/// Source of the current local date-time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Moves the clock forward. Durations beyond chrono's range saturate at
    /// the current value.
    pub fn advance(&self, by: Duration) {
        let current = self.now.get();
        let next = chrono::Duration::from_std(by)
            .ok()
            .and_then(|delta| current.checked_add_signed(delta))
            .unwrap_or(current);
        self.now.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// Minute-granularity time of day, serialized as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockTimeError {
    Malformed(String),
    OutOfRange { hour: u32, minute: u32 },
}

impl Display for ClockTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "expected HH:MM, got `{value}`"),
            Self::OutOfRange { hour, minute } => {
                write!(f, "time {hour:02}:{minute:02} is out of range")
            }
        }
    }
}

impl Error for ClockTimeError {}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ClockTimeError> {
        if hour > 23 || minute > 59 {
            return Err(ClockTimeError::OutOfRange { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Constant constructor for compile-time defaults. Callers pass literals
    /// within range.
    pub const fn from_hm_const(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Truncates a date-time to its minute of day.
    pub fn of(datetime: &NaiveDateTime) -> Self {
        Self {
            hour: datetime.hour() as u8,
            minute: datetime.minute() as u8,
        }
    }

    pub fn hour(self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.minute)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let malformed = || ClockTimeError::Malformed(trimmed.to_string());
        let (hour, minute) = trimmed.split_once(':').ok_or_else(malformed)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(malformed());
        }
        let hour = hour.parse::<u32>().map_err(|_| malformed())?;
        let minute = minute.parse::<u32>().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

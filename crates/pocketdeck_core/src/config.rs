//! Built-in defaults for storage keys, poll cadence and the offline cache.
//!
//! Callers that need different values build `CacheConfig` / `PollConfig`
//! explicitly; everything else reads the constants directly.

use crate::clock::ClockTime;
use std::time::Duration;

/// Store key for the ordered task list.
pub const TASKS_KEY: &str = "todos";
/// Store key for the ordered note list.
pub const NOTES_KEY: &str = "notes";
/// Store key for the ordered bookmark list.
pub const BOOKMARKS_KEY: &str = "bookmarks";
/// Store key for the ordered alarm list.
pub const ALARMS_KEY: &str = "alarms";
/// Store key for the settings record.
pub const SETTINGS_KEY: &str = "settings";

pub const REMINDER_POLL_PERIOD: Duration = Duration::from_secs(30);
pub const ALARM_POLL_PERIOD: Duration = Duration::from_secs(1);
/// A due reminder only fires while `now - due` is below this window.
pub const REMINDER_WINDOW: Duration = Duration::from_secs(60);
pub const SNOOZE_DELAY: Duration = Duration::from_secs(5 * 60);
pub const SNOOZE_LABEL: &str = "Snoozed";

/// Due time assumed for tasks that only carry a due date.
pub const DEFAULT_DUE_TIME: ClockTime = ClockTime::from_hm_const(9, 0);

/// Sound played by alarms without an embedded payload.
pub const DEFAULT_ALARM_SOUND: &str = "assets/alarm.mp3";
/// Vibration pattern in milliseconds: on, off, on.
pub const VIBRATION_PATTERN_MS: &[u64] = &[300, 100, 300];

/// Current cache bucket name. Bumping it invalidates every older bucket.
pub const CACHE_NAME: &str = "pwa-prod-cache-v2";
/// Document served for navigation requests.
pub const SHELL_DOCUMENT: &str = "/index.html";
/// Assets pre-cached on install.
pub const CORE_ASSETS: &[&str] = &[
    "/",
    SHELL_DOCUMENT,
    "/style.css",
    "/script.js",
    "/manifest.json",
    "/assets/alarm.mp3",
    "/icons/icon-192.png",
    "/icons/icon-512.png",
];

/// Offline cache controller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Version-tagged bucket name.
    pub cache_name: String,
    /// URLs fetched and stored during install.
    pub assets: Vec<String>,
    /// Cached document used for navigation requests.
    pub shell: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_name: CACHE_NAME.to_string(),
            assets: CORE_ASSETS.iter().map(|asset| asset.to_string()).collect(),
            shell: SHELL_DOCUMENT.to_string(),
        }
    }
}

impl CacheConfig {
    /// Default manifest under a different bucket name.
    pub fn with_cache_name(cache_name: impl Into<String>) -> Self {
        Self {
            cache_name: cache_name.into(),
            ..Self::default()
        }
    }
}

/// Poller cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub reminder_period: Duration,
    pub alarm_period: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            reminder_period: REMINDER_POLL_PERIOD,
            alarm_period: ALARM_POLL_PERIOD,
        }
    }
}

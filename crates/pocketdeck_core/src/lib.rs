//! Core logic for PocketDeck: to-dos, notes, bookmarks and alarms kept in
//! local device storage, plus the offline cache for the app shell.
//! Front ends own rendering and device side effects; this crate owns
//! persistence, polling decisions and cache policy.

pub mod cache;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod platform;
pub mod repo;
pub mod service;
pub mod store;

pub use cache::{
    CacheController, CacheError, CacheStorage, DirectoryOrigin, Network, NetworkError,
    OfflineNetwork, Request, RequestMode, Response, SqliteCacheStorage,
};
pub use clock::{Clock, ClockTime, ClockTimeError, FixedClock, SystemClock};
pub use config::{CacheConfig, PollConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::alarm::{Alarm, AlarmId, Repeat};
pub use model::bookmark::{Bookmark, BookmarkId};
pub use model::note::{Note, NoteId};
pub use model::settings::{Settings, Theme};
pub use model::task::{Priority, Task, TaskId};
pub use model::EntityId;
pub use platform::{
    notify, AlarmDevice, NoNotifier, NotificationPermission, Notifier, NotifyError,
    PlaybackError, SoundHandle, SoundSource,
};
pub use repo::alarm_repo::{AlarmRepository, NewAlarm};
pub use repo::bookmark_repo::BookmarkRepository;
pub use repo::collection::{Collection, Record, RepoError, RepoResult};
pub use repo::note_repo::NoteRepository;
pub use repo::settings_repo::SettingsRepository;
pub use repo::task_repo::{NewTask, TaskRepository};
pub use service::alarm_service::{delete_alarm, snooze, AlarmPoller};
pub use service::reminder_service::{should_fire_reminder, ReminderPoller};
pub use service::ringing::RingingController;
pub use store::{JsonStore, KeyValueStore, SqliteKvStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

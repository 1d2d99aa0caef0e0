//! Device side effects consumed by the pollers.
//!
//! # Responsibility
//! - Describe notifications, sound playback, haptics and the alarm popup
//!   as traits so front ends plug in their own devices.
//! - Keep every side effect best-effort: failures are logged at debug
//!   level and never reach the caller.

use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Notification permission as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    /// Not asked yet.
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError(pub String);

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification failed: {}", self.0)
    }
}

impl Error for NotifyError {}

/// System notification channel.
pub trait Notifier {
    fn permission(&self) -> NotificationPermission;

    /// Asks the user for permission. Devices without a prompt report the
    /// current state unchanged.
    fn request_permission(&self) -> NotificationPermission {
        self.permission()
    }

    fn show(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Sends a notification if permission was granted. Never fails.
pub fn notify(notifier: &dyn Notifier, title: &str, body: &str) {
    if notifier.permission() != NotificationPermission::Granted {
        debug!("event=notify module=platform status=skip reason=permission");
        return;
    }
    if let Err(err) = notifier.show(title, body) {
        debug!("event=notify module=platform status=error error={err}");
    }
}

/// Notifier for devices without a notification channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNotifier;

impl Notifier for NoNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Denied
    }

    fn show(&self, _title: &str, _body: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// What an alarm plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// Sound embedded in the alarm record as a data URL.
    Embedded(String),
    /// Bundled default sound at a path.
    Default(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackError(pub String);

impl Display for PlaybackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "playback failed: {}", self.0)
    }
}

impl Error for PlaybackError {}

/// Loaded sound ready to play.
pub trait SoundHandle {
    fn set_looping(&mut self, looping: bool);
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    /// Resets playback position to the start.
    fn rewind(&mut self);
}

/// Audio output, haptics and popup of the device that rings alarms.
pub trait AlarmDevice {
    type Sound: SoundHandle;

    fn load_sound(&mut self, source: &SoundSource) -> Self::Sound;

    /// Vibrates with an on/off pattern in milliseconds. Devices without
    /// haptics keep the default no-op.
    fn vibrate(&mut self, _pattern_ms: &[u64]) {}

    /// Sets the popup text and opens the modal popup if it is closed.
    fn show_popup(&mut self, text: &str);

    fn close_popup(&mut self);
}

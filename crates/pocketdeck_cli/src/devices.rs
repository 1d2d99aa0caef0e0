//! Console stand-ins for the device side effects the pollers drive.

use pocketdeck_core::{
    AlarmDevice, NotificationPermission, Notifier, NotifyError, PlaybackError, SoundHandle,
    SoundSource,
};
use std::io::Write;

/// Prints notifications to stdout. Permission follows `--no-notify`.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    granted: bool,
}

impl ConsoleNotifier {
    pub fn new(granted: bool) -> Self {
        Self { granted }
    }
}

impl Notifier for ConsoleNotifier {
    fn permission(&self) -> NotificationPermission {
        if self.granted {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        }
    }

    fn show(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "[{title}] {body}").map_err(|err| NotifyError(err.to_string()))
    }
}

/// Terminal bell as the alarm sound.
#[derive(Debug)]
pub struct BellSound {
    source: SoundSource,
    looping: bool,
    playing: bool,
}

impl BellSound {
    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Rings the bell again while a looping sound is playing.
    pub fn repeat(&mut self) {
        if self.playing && self.looping {
            let _ = ring_bell();
        }
    }
}

impl SoundHandle for BellSound {
    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if let SoundSource::Default(path) = &self.source {
            log::debug!("event=sound_play module=cli status=start source=default path={path}");
        }
        ring_bell().map_err(|err| PlaybackError(err.to_string()))?;
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {}
}

fn ring_bell() -> std::io::Result<()> {
    let mut err = std::io::stderr().lock();
    err.write_all(b"\x07")?;
    err.flush()
}

/// Rings with the terminal bell and prints the popup inline.
#[derive(Debug, Default)]
pub struct TerminalDevice {
    popup_text: Option<String>,
}

impl TerminalDevice {
    pub fn popup_open(&self) -> bool {
        self.popup_text.is_some()
    }

    #[cfg(test)]
    pub fn popup_text(&self) -> Option<&str> {
        self.popup_text.as_deref()
    }
}

impl AlarmDevice for TerminalDevice {
    type Sound = BellSound;

    fn load_sound(&mut self, source: &SoundSource) -> BellSound {
        BellSound {
            source: source.clone(),
            looping: false,
            playing: false,
        }
    }

    /// Replaces the popup text; an open popup is updated in place.
    fn show_popup(&mut self, text: &str) {
        if self.popup_text.as_deref() == Some(text) {
            return;
        }
        self.popup_text = Some(text.to_string());
        println!("*** {text} ***  (type `stop` or `snooze`)");
    }

    fn close_popup(&mut self) {
        if self.popup_text.take().is_some() {
            println!("alarm closed");
        }
    }
}

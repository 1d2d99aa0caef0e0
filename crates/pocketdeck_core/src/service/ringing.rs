//! Ringing controller: the one alarm currently sounding.
//!
//! # Invariants
//! - At most one alarm rings at a time; `play` stops the previous one
//!   before starting the next.
//! - Playback failures are swallowed. Ringing state then says "ringing"
//!   even though nothing is audible.

use crate::config::{DEFAULT_ALARM_SOUND, VIBRATION_PATTERN_MS};
use crate::model::alarm::{Alarm, AlarmId};
use crate::platform::{notify, AlarmDevice, Notifier, SoundHandle, SoundSource};
use log::{debug, info};

pub const ALARM_TITLE: &str = "Alarm";

struct Ringing<H> {
    alarm_id: AlarmId,
    sound: H,
}

pub struct RingingController<D: AlarmDevice> {
    device: D,
    current: Option<Ringing<D::Sound>>,
}

impl<D: AlarmDevice> RingingController<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            current: None,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Id of the alarm currently ringing, if any.
    pub fn ringing_id(&self) -> Option<AlarmId> {
        self.current.as_ref().map(|ringing| ringing.alarm_id)
    }

    pub fn is_ringing(&self) -> bool {
        self.current.is_some()
    }

    /// Sound of the ringing alarm, for devices that drive looping by hand.
    pub fn sound_mut(&mut self) -> Option<&mut D::Sound> {
        self.current.as_mut().map(|ringing| &mut ringing.sound)
    }

    /// Starts looped playback for `alarm`, replacing whatever was ringing.
    pub fn play(&mut self, alarm: &Alarm, notifier: &dyn Notifier) {
        if self.current.is_some() {
            self.stop();
        }

        let source = sound_source(alarm);
        let mut sound = self.device.load_sound(&source);
        sound.set_looping(true);
        if let Err(err) = sound.play() {
            debug!(
                "event=alarm_play module=service status=error alarm_id={} error={err}",
                alarm.id
            );
        }
        self.device.vibrate(VIBRATION_PATTERN_MS);
        self.current = Some(Ringing {
            alarm_id: alarm.id,
            sound,
        });
        info!(
            "event=alarm_play module=service status=ok alarm_id={} embedded_sound={}",
            alarm.id,
            matches!(source, SoundSource::Embedded(_))
        );

        notify(notifier, ALARM_TITLE, &alarm.notification_body());
    }

    /// Plays `alarm` and shows its popup.
    pub fn ring(&mut self, alarm: &Alarm, notifier: &dyn Notifier) {
        self.play(alarm, notifier);
        self.device.show_popup(&alarm.popup_text());
    }

    /// Halts playback, rewinds, and clears ringing state.
    pub fn stop(&mut self) {
        if let Some(mut ringing) = self.current.take() {
            ringing.sound.pause();
            ringing.sound.rewind();
            info!(
                "event=alarm_stop module=service status=ok alarm_id={}",
                ringing.alarm_id
            );
        }
    }

    /// Stop button: stop ringing and close the popup.
    pub fn dismiss(&mut self) {
        self.stop();
        self.device.close_popup();
    }
}

fn sound_source(alarm: &Alarm) -> SoundSource {
    match alarm
        .sound_data_url
        .as_deref()
        .filter(|payload| !payload.is_empty())
    {
        Some(payload) => SoundSource::Embedded(payload.to_string()),
        None => SoundSource::Default(DEFAULT_ALARM_SOUND.to_string()),
    }
}

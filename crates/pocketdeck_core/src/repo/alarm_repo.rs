//! Alarm repository.

use super::collection::{Collection, Record, RepoResult};
use crate::clock::ClockTime;
use crate::config::{ALARMS_KEY, SNOOZE_LABEL};
use crate::model::alarm::{Alarm, AlarmId, Repeat};
use crate::model::{non_empty, EntityId};
use crate::store::KeyValueStore;
use log::info;

impl Record for Alarm {
    const STORE_KEY: &'static str = ALARMS_KEY;

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Input for `AlarmRepository::add_alarm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlarm {
    pub time: ClockTime,
    pub label: Option<String>,
    pub repeat: Repeat,
    /// Already-encoded sound payload (data URL).
    pub sound_data_url: Option<String>,
}

impl NewAlarm {
    pub fn new(time: ClockTime, repeat: Repeat) -> Self {
        Self {
            time,
            label: None,
            repeat,
            sound_data_url: None,
        }
    }
}

pub struct AlarmRepository<S> {
    alarms: Collection<Alarm, S>,
}

impl<S: KeyValueStore> AlarmRepository<S> {
    pub fn load(store: S) -> RepoResult<Self> {
        Ok(Self {
            alarms: Collection::load(store)?,
        })
    }

    pub fn reload(&mut self) -> RepoResult<()> {
        self.alarms.reload()
    }

    pub fn alarms(&self) -> &[Alarm] {
        self.alarms.items()
    }

    pub fn get(&self, id: AlarmId) -> Option<&Alarm> {
        self.alarms.get(id)
    }

    /// Appends an active alarm.
    pub fn add_alarm(&mut self, new_alarm: NewAlarm) -> RepoResult<AlarmId> {
        let mut alarm = Alarm::new(new_alarm.time, new_alarm.label, new_alarm.repeat);
        alarm.sound_data_url = non_empty(new_alarm.sound_data_url);
        let id = alarm.id;
        self.alarms.push(alarm)?;
        info!(
            "event=alarm_add module=repo status=ok alarm_id={id} repeat={}",
            new_alarm.repeat.as_str()
        );
        Ok(id)
    }

    /// Appends the one-shot alarm created by a snooze.
    pub fn add_snooze(&mut self, time: ClockTime) -> RepoResult<AlarmId> {
        self.add_alarm(NewAlarm {
            time,
            label: Some(SNOOZE_LABEL.to_string()),
            repeat: Repeat::Once,
            sound_data_url: None,
        })
    }

    pub fn set_active(&mut self, id: AlarmId, active: bool) -> RepoResult<()> {
        self.alarms.update(id, |alarm| alarm.active = active)
    }

    pub fn remove(&mut self, id: AlarmId) -> RepoResult<Alarm> {
        self.alarms.remove(id)
    }

    pub fn reorder(&mut self, ids: &[AlarmId]) -> RepoResult<()> {
        self.alarms.reorder(ids)
    }
}

//! Alarm poller plus the snooze and delete flows that touch ringing state.
//!
//! # Invariants
//! - Matching is per minute of local time; a repeating alarm fires once per
//!   matching minute even though the poller ticks every second.
//! - `once` alarms are deactivated (not deleted) right after firing.

use crate::clock::ClockTime;
use crate::config::SNOOZE_DELAY;
use crate::model::alarm::{Alarm, AlarmId, Repeat};
use crate::platform::{AlarmDevice, Notifier};
use crate::repo::alarm_repo::AlarmRepository;
use crate::repo::collection::RepoResult;
use crate::service::ringing::RingingController;
use crate::store::KeyValueStore;
use chrono::{Duration, NaiveDateTime, Timelike};
use log::{error, info};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct AlarmPoller {
    /// Minute in which each alarm last fired.
    fired_in_minute: HashMap<AlarmId, NaiveDateTime>,
}

impl AlarmPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rings every due alarm. Returns the ids fired on this tick, in list
    /// order.
    ///
    /// # Errors
    /// - The first failed `once` deactivation. Every due alarm has still
    ///   been rung and recorded as fired for this minute.
    pub fn tick<S, D>(
        &mut self,
        alarms: &mut AlarmRepository<S>,
        ringing: &mut RingingController<D>,
        notifier: &dyn Notifier,
        now: NaiveDateTime,
    ) -> RepoResult<Vec<AlarmId>>
    where
        S: KeyValueStore,
        D: AlarmDevice,
    {
        let minute = truncate_to_minute(now);
        self.fired_in_minute.retain(|_, fired| *fired == minute);

        let due: Vec<Alarm> = alarms
            .alarms()
            .iter()
            .filter(|alarm| alarm.is_due(&now))
            .filter(|alarm| !self.fired_in_minute.contains_key(&alarm.id))
            .cloned()
            .collect();

        let mut fired = Vec::with_capacity(due.len());
        let mut first_error = None;
        for alarm in due {
            ringing.ring(&alarm, notifier);
            self.fired_in_minute.insert(alarm.id, minute);
            info!(
                "event=alarm_fire module=service status=ok alarm_id={} repeat={}",
                alarm.id,
                alarm.repeat.as_str()
            );
            if alarm.repeat == Repeat::Once {
                if let Err(err) = alarms.set_active(alarm.id, false) {
                    error!(
                        "event=alarm_deactivate module=service status=error alarm_id={} error={err}",
                        alarm.id
                    );
                    first_error.get_or_insert(err);
                }
            }
            fired.push(alarm.id);
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(fired),
        }
    }
}

/// Snooze button: stop ringing, close the popup, and schedule a one-shot
/// "Snoozed" alarm five minutes from `now`.
pub fn snooze<S, D>(
    alarms: &mut AlarmRepository<S>,
    ringing: &mut RingingController<D>,
    now: NaiveDateTime,
) -> RepoResult<AlarmId>
where
    S: KeyValueStore,
    D: AlarmDevice,
{
    ringing.dismiss();
    let delay = Duration::seconds(SNOOZE_DELAY.as_secs() as i64);
    let at = ClockTime::of(&(now + delay));
    let id = alarms.add_snooze(at)?;
    info!("event=alarm_snooze module=service status=ok alarm_id={id} time={at}");
    Ok(id)
}

/// Deletes an alarm, silencing it first when it is the one ringing.
pub fn delete_alarm<S, D>(
    alarms: &mut AlarmRepository<S>,
    ringing: &mut RingingController<D>,
    id: AlarmId,
) -> RepoResult<Alarm>
where
    S: KeyValueStore,
    D: AlarmDevice,
{
    if ringing.ringing_id() == Some(id) {
        ringing.stop();
    }
    alarms.remove(id)
}

fn truncate_to_minute(now: NaiveDateTime) -> NaiveDateTime {
    now.with_second(0)
        .and_then(|at| at.with_nanosecond(0))
        .unwrap_or(now)
}

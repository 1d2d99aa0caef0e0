//! Alarm commands.

use crate::common::{parse_repeat, resolve_id, resolve_ids, short_id, CliResult, Context};
use crate::devices::{ConsoleNotifier, TerminalDevice};
use clap::Subcommand;
use pocketdeck_core::{
    delete_alarm, Alarm, AlarmRepository, ClockTime, NewAlarm, Repeat, RingingController,
    SqliteKvStore,
};

#[derive(Subcommand)]
pub enum AlarmAction {
    /// Add an active alarm
    Add {
        /// Time as HH:MM
        time: ClockTime,
        #[arg(long)]
        label: Option<String>,
        /// once|daily|weekdays|weekends
        #[arg(long, value_parser = parse_repeat, default_value = "once")]
        repeat: Repeat,
        /// Encoded sound payload (data URL); the default sound plays otherwise
        #[arg(long)]
        sound_data_url: Option<String>,
    },
    /// List alarms in display order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Turn an alarm on
    Enable { id: String },
    /// Turn an alarm off
    Disable { id: String },
    /// Delete an alarm
    Rm { id: String },
    /// Reorder alarms; pass every id in the new order
    Reorder {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Ring an alarm now until Enter is pressed
    Test { id: String },
}

pub fn run(ctx: &Context, action: AlarmAction) -> CliResult {
    let conn = ctx.open_db()?;
    let mut alarms = AlarmRepository::load(SqliteKvStore::new(&conn))?;
    let known = || alarms.alarms().iter().map(|alarm| alarm.id).collect::<Vec<_>>();

    match action {
        AlarmAction::Add {
            time,
            label,
            repeat,
            sound_data_url,
        } => {
            let id = alarms.add_alarm(NewAlarm {
                time,
                label,
                repeat,
                sound_data_url,
            })?;
            println!("Alarm added: {}", short_id(id));
        }
        AlarmAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(alarms.alarms())?);
            } else if alarms.alarms().is_empty() {
                println!("No alarms");
            } else {
                for alarm in alarms.alarms() {
                    println!("{}", format_alarm(alarm));
                }
            }
        }
        AlarmAction::Enable { id } => {
            let id = resolve_id(&id, known())?;
            alarms.set_active(id, true)?;
            println!("Alarm on: {}", short_id(id));
        }
        AlarmAction::Disable { id } => {
            let id = resolve_id(&id, known())?;
            alarms.set_active(id, false)?;
            println!("Alarm off: {}", short_id(id));
        }
        AlarmAction::Rm { id } => {
            let id = resolve_id(&id, known())?;
            let mut ringing = RingingController::new(TerminalDevice::default());
            delete_alarm(&mut alarms, &mut ringing, id)?;
            println!("Alarm deleted: {}", short_id(id));
        }
        AlarmAction::Reorder { ids } => {
            let ids = resolve_ids(&ids, known())?;
            alarms.reorder(&ids)?;
            println!("Order saved");
        }
        AlarmAction::Test { id } => {
            let id = resolve_id(&id, known())?;
            let alarm = alarms.get(id).cloned().ok_or("alarm vanished")?;
            let mut ringing = RingingController::new(TerminalDevice::default());
            ringing.ring(&alarm, &ConsoleNotifier::new(true));
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            ringing.dismiss();
        }
    }
    Ok(())
}

fn format_alarm(alarm: &Alarm) -> String {
    let state = if alarm.active { "on " } else { "off" };
    let mut line = format!(
        "{}  {}  [{state}]  {}",
        short_id(alarm.id),
        alarm.time,
        alarm.repeat.as_str()
    );
    if let Some(label) = alarm.label() {
        line.push_str("  ");
        line.push_str(label);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_labelled_alarm() {
        let time: ClockTime = "07:05".parse().unwrap();
        let alarm = Alarm::new(time, Some("Gym".to_string()), Repeat::Weekdays);
        assert!(format_alarm(&alarm).ends_with("07:05  [on ]  weekdays  Gym"));
    }

    #[test]
    fn formats_inactive_alarm_without_label() {
        let time: ClockTime = "23:00".parse().unwrap();
        let mut alarm = Alarm::new(time, None, Repeat::Once);
        alarm.active = false;
        assert!(format_alarm(&alarm).ends_with("23:00  [off]  once"));
    }
}

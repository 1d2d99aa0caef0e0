//! Foreground poller host: reminder and alarm ticks on one current-thread
//! runtime, with `stop`/`snooze` read from stdin.

use crate::common::{short_id, CliResult, Context};
use crate::devices::{ConsoleNotifier, TerminalDevice};
use clap::Args;
use log::{error, info, warn};
use pocketdeck_core::{
    snooze, AlarmPoller, AlarmRepository, Clock, KeyValueStore, Notifier, PollConfig,
    ReminderPoller, RepoResult, RingingController, SqliteKvStore, SystemClock, TaskRepository,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};

#[derive(Args)]
pub struct RunArgs {
    /// Deny notification permission; reminders are still marked as sent
    #[arg(long)]
    no_notify: bool,
}

/// Command typed while the pollers run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Stop,
    Snooze,
    Quit,
}

impl Input {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "stop" | "s" => Some(Self::Stop),
            "snooze" | "z" => Some(Self::Snooze),
            "quit" | "q" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Periodic timer driving one poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Reminder,
    Alarm,
}

impl Timer {
    fn as_str(self) -> &'static str {
        match self {
            Self::Reminder => "reminder",
            Self::Alarm => "alarm",
        }
    }
}

struct Pollers<S> {
    tasks: TaskRepository<S>,
    alarms: AlarmRepository<S>,
    reminder: ReminderPoller,
    alarm: AlarmPoller,
    ringing: RingingController<TerminalDevice>,
}

impl<S: KeyValueStore + Copy> Pollers<S> {
    fn load(store: S) -> RepoResult<Self> {
        Ok(Self {
            tasks: TaskRepository::load(store)?,
            alarms: AlarmRepository::load(store)?,
            reminder: ReminderPoller::new(),
            alarm: AlarmPoller::new(),
            ringing: RingingController::new(TerminalDevice::default()),
        })
    }

    fn reminder_tick(&mut self, notifier: &dyn Notifier, clock: &dyn Clock) -> RepoResult<()> {
        self.tasks.reload()?;
        self.reminder.tick(&mut self.tasks, notifier, clock.now())?;
        Ok(())
    }

    fn alarm_tick(&mut self, notifier: &dyn Notifier, clock: &dyn Clock) -> RepoResult<()> {
        if let Some(sound) = self.ringing.sound_mut() {
            sound.repeat();
        }
        self.alarms.reload()?;
        self.alarm
            .tick(&mut self.alarms, &mut self.ringing, notifier, clock.now())?;
        Ok(())
    }

    /// Runs one tick of `timer`. A failed tick is logged and reported as
    /// `false`; the timer keeps firing.
    fn on_timer(&mut self, timer: Timer, notifier: &dyn Notifier, clock: &dyn Clock) -> bool {
        let result = match timer {
            Timer::Reminder => self.reminder_tick(notifier, clock),
            Timer::Alarm => self.alarm_tick(notifier, clock),
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=poll_tick module=cli status=error poller={} error={err}",
                    timer.as_str()
                );
                false
            }
        }
    }

    /// Returns `false` when the loop should end.
    fn handle(&mut self, input: Input, clock: &dyn Clock) -> RepoResult<bool> {
        match input {
            Input::Stop => {
                if self.ringing.is_ringing() || self.ringing.device().popup_open() {
                    self.ringing.dismiss();
                } else {
                    println!("Nothing is ringing");
                }
            }
            Input::Snooze => {
                if self.ringing.is_ringing() {
                    self.alarms.reload()?;
                    let id = snooze(&mut self.alarms, &mut self.ringing, clock.now())?;
                    println!("Snoozed: {}", short_id(id));
                } else {
                    println!("Nothing is ringing");
                }
            }
            Input::Quit => return Ok(false),
        }
        Ok(true)
    }
}

pub fn run(ctx: &Context, args: RunArgs) -> CliResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_loop(ctx, args))
}

async fn run_loop(ctx: &Context, args: RunArgs) -> CliResult {
    let conn = ctx.open_db()?;
    let mut pollers = Pollers::load(SqliteKvStore::new(&conn))?;
    let notifier = ConsoleNotifier::new(!args.no_notify);
    let permission = notifier.request_permission();
    let clock = SystemClock;
    let poll = PollConfig::default();

    let mut reminder_timer = interval(poll.reminder_period);
    reminder_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut alarm_timer = interval(poll.alarm_period);
    alarm_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!(
        "event=run_start module=cli status=ok data_dir={} notifications={permission:?}",
        ctx.data_dir().display()
    );
    println!("Watching reminders and alarms. Type `stop`, `snooze` or `quit`.");

    loop {
        tokio::select! {
            _ = reminder_timer.tick() => {
                pollers.on_timer(Timer::Reminder, &notifier, &clock);
            }
            _ = alarm_timer.tick() => {
                pollers.on_timer(Timer::Alarm, &notifier, &clock);
            }
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => match Input::parse(&line) {
                    Some(input) => match pollers.handle(input, &clock) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(err) => {
                            error!("event=run_command module=cli status=error error={err}");
                            eprintln!("error: {err}");
                        }
                    },
                    None if line.trim().is_empty() => {}
                    None => println!("Unknown command `{}`", line.trim()),
                },
                None => {
                    warn!("event=run_stdin module=cli status=closed");
                    stdin_open = false;
                }
            },
            _ = &mut ctrl_c => break,
        }
    }

    pollers.ringing.dismiss();
    info!("event=run_stop module=cli status=ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pocketdeck_core::db::{open_db_in_memory, Connection};
    use pocketdeck_core::{FixedClock, NewTask, StoreResult};
    use std::cell::Cell;

    /// Reads from one database and writes to another whose table is gone.
    struct BrokenWrites<'conn> {
        reads: SqliteKvStore<'conn>,
        writes: SqliteKvStore<'conn>,
        attempts: Cell<usize>,
    }

    impl KeyValueStore for BrokenWrites<'_> {
        fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
            self.reads.get_raw(key)
        }

        fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
            self.attempts.set(self.attempts.get() + 1);
            self.writes.set_raw(key, value)
        }
    }

    fn due_task_db() -> Connection {
        let conn = open_db_in_memory().unwrap();
        let mut tasks = TaskRepository::load(SqliteKvStore::new(&conn)).unwrap();
        tasks
            .add_task(NewTask {
                due_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                due_time: Some("09:00".parse().unwrap()),
                ..NewTask::new("Pay rent")
            })
            .unwrap();
        conn
    }

    #[test]
    fn failed_reminder_write_keeps_both_timers_running() {
        let reads = due_task_db();
        let writes = open_db_in_memory().unwrap();
        writes.execute_batch("DROP TABLE kv_records;").unwrap();
        let store = BrokenWrites {
            reads: SqliteKvStore::new(&reads),
            writes: SqliteKvStore::new(&writes),
            attempts: Cell::new(0),
        };

        let mut pollers = Pollers::load(&store).unwrap();
        let notifier = ConsoleNotifier::new(false);
        let clock = FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 10)
                .unwrap(),
        );

        assert!(!pollers.on_timer(Timer::Reminder, &notifier, &clock));
        assert_eq!(store.attempts.get(), 1);
        assert!(pollers.on_timer(Timer::Alarm, &notifier, &clock));
        assert!(!pollers.on_timer(Timer::Reminder, &notifier, &clock));
        assert_eq!(store.attempts.get(), 2);
    }

    #[test]
    fn parses_commands_and_shortcuts() {
        assert_eq!(Input::parse(" STOP "), Some(Input::Stop));
        assert_eq!(Input::parse("z"), Some(Input::Snooze));
        assert_eq!(Input::parse("quit"), Some(Input::Quit));
        assert_eq!(Input::parse("later"), None);
    }
}

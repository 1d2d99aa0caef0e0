//! To-do list commands.

use crate::common::{parse_priority, resolve_id, resolve_ids, short_id, CliResult, Context};
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use pocketdeck_core::{ClockTime, NewTask, Priority, SqliteKvStore, Task, TaskRepository};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task; blank text is ignored
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// low|medium|high
        #[arg(long, value_parser = parse_priority, default_value = "medium")]
        priority: Priority,
        /// Due date as YYYY-MM-DD, or `today`
        #[arg(long, value_parser = parse_due_date)]
        due: Option<NaiveDate>,
        /// Due time as HH:MM (09:00 when only a date is set)
        #[arg(long)]
        at: Option<ClockTime>,
    },
    /// List tasks in display order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Toggle the done flag
    Done { id: String },
    /// Replace the task text
    Edit {
        id: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a task
    Rm { id: String },
    /// Reorder tasks; pass every id in the new order
    Reorder {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

pub fn run(ctx: &Context, action: TaskAction) -> CliResult {
    let conn = ctx.open_db()?;
    let mut tasks = TaskRepository::load(SqliteKvStore::new(&conn))?;
    let known = || tasks.tasks().iter().map(|task| task.id).collect::<Vec<_>>();

    match action {
        TaskAction::Add {
            text,
            priority,
            due,
            at,
        } => {
            let new_task = NewTask {
                text: text.join(" "),
                priority,
                due_date: due,
                due_time: at,
            };
            match tasks.add_task(new_task)? {
                Some(id) => println!("Task added: {}", short_id(id)),
                None => println!("Nothing to add"),
            }
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tasks.tasks())?);
            } else if tasks.tasks().is_empty() {
                println!("No tasks");
            } else {
                for task in tasks.tasks() {
                    println!("{}", format_task(task));
                }
            }
        }
        TaskAction::Done { id } => {
            let id = resolve_id(&id, known())?;
            let done = tasks.toggle_done(id)?;
            println!("{} {}", short_id(id), if done { "done" } else { "open" });
        }
        TaskAction::Edit { id, text } => {
            let id = resolve_id(&id, known())?;
            tasks.edit_text(id, &text.join(" "))?;
            println!("Task updated: {}", short_id(id));
        }
        TaskAction::Rm { id } => {
            let id = resolve_id(&id, known())?;
            tasks.remove(id)?;
            println!("Task deleted: {}", short_id(id));
        }
        TaskAction::Reorder { ids } => {
            let ids = resolve_ids(&ids, known())?;
            tasks.reorder(&ids)?;
            println!("Order saved");
        }
    }
    Ok(())
}

fn parse_due_date(value: &str) -> Result<NaiveDate, String> {
    if value.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    value
        .parse()
        .map_err(|err| format!("invalid date `{value}`: {err}"))
}

fn format_task(task: &Task) -> String {
    let mark = if task.done { "x" } else { " " };
    let mut line = format!(
        "{}  [{mark}] {}  ({})",
        short_id(task.id),
        task.text,
        task.priority.as_str()
    );
    if let Some(due_at) = task.due_at() {
        line.push_str(&format!("  due {}", due_at.format("%Y-%m-%d %H:%M")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_open_task_with_default_due_time() {
        let mut task = Task::new("Pay rent", Priority::High);
        task.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        let line = format_task(&task);
        assert!(line.contains("[ ] Pay rent  (High)"));
        assert!(line.ends_with("due 2024-01-01 09:00"));
    }

    #[test]
    fn formats_done_task_without_due() {
        let mut task = Task::new("Buy milk", Priority::Low);
        task.done = true;
        assert!(format_task(&task).ends_with("[x] Buy milk  (Low)"));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_due_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_due_date("2024-02-30").is_err());
    }
}

//! Habit management commands for CLI.

use std::path::Path;

use chrono::{NaiveDate, Weekday};
use clap::{Subcommand, ValueEnum};
use growbit_core::{Clock, HabitStatus, RecurrenceProgram, SlotTime, WeeklySchedule};
use serde::Serialize;

use super::{open_store, parse_date, print_json, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits, in-progress first
    List,
    /// Print one habit as JSON
    Show {
        /// Habit ID
        id: String,
    },
    /// Start tracking a habit from a template
    Acquire {
        /// Template ID (see `template list`)
        template_id: String,
    },
    /// Mark a slot done (or not done with --undo)
    Toggle {
        /// Habit ID
        id: String,
        /// Slot time (HH:MM)
        time: SlotTime,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Mark the slot not done
        #[arg(long)]
        undo: bool,
    },
    /// Change a habit's status
    Status {
        /// Habit ID
        id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Rename a habit
    Rename {
        /// Habit ID
        id: String,
        /// New title
        title: String,
    },
    /// Replace a habit's recurrence program
    Program {
        /// Habit ID
        id: String,
        #[command(subcommand)]
        program: ProgramArg,
    },
    /// Current streak of a habit
    Streak {
        /// Habit ID
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    InProgress,
    Acquired,
}

impl From<StatusArg> for HabitStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::InProgress => HabitStatus::InProgress,
            StatusArg::Acquired => HabitStatus::Acquired,
        }
    }
}

#[derive(Subcommand)]
pub enum ProgramArg {
    /// Same slots every day, e.g. `daily 08:00 20:00`
    Daily { times: Vec<String> },
    /// Slots per weekday, e.g. `weekly mon=07:00 fri=07:00,18:00`
    Weekly { days: Vec<String> },
}

impl ProgramArg {
    /// Build the program. Malformed times are skipped with a warning.
    fn build(self) -> Result<RecurrenceProgram, String> {
        match self {
            ProgramArg::Daily { times } => {
                let mut program = RecurrenceProgram::daily(Vec::new());
                for raw in &times {
                    if !program.add_slot(Weekday::Mon, raw) {
                        eprintln!("ignored slot: {raw}");
                    }
                }
                Ok(program)
            }
            ProgramArg::Weekly { days } => {
                let mut program = RecurrenceProgram::weekly(WeeklySchedule::new());
                for entry in &days {
                    let (day, times) = entry
                        .split_once('=')
                        .ok_or_else(|| format!("expected DAY=HH:MM[,HH:MM], got '{entry}'"))?;
                    let day: Weekday = day
                        .parse()
                        .map_err(|_| format!("invalid weekday '{day}'"))?;
                    for raw in times.split(',') {
                        if !program.add_slot(day, raw) {
                            eprintln!("ignored slot: {day} {raw}");
                        }
                    }
                }
                Ok(program)
            }
        }
    }
}

#[derive(Serialize)]
struct HabitRow<'a> {
    id: &'a str,
    title: &'a str,
    status: HabitStatus,
    program: String,
    streak: u32,
    today_complete: bool,
}

pub fn run(action: HabitAction, data_dir: Option<&Path>) -> CliResult {
    let mut store = open_store(data_dir)?;
    let today = store.clock().today();

    match action {
        HabitAction::List => {
            let rows: Vec<HabitRow> = store
                .habits_for_display()
                .into_iter()
                .map(|h| HabitRow {
                    id: &h.id,
                    title: &h.title,
                    status: h.status,
                    program: h.program.describe(),
                    streak: growbit_core::habit::compute_streak(h, today),
                    today_complete: growbit_core::habit::is_day_complete(h, today),
                })
                .collect();
            print_json(&rows)?;
        }
        HabitAction::Show { id } => match store.habit(&id) {
            Some(habit) => print_json(habit)?,
            None => return Err(format!("habit not found: {id}").into()),
        },
        HabitAction::Acquire { template_id } => {
            let habit = store.acquire_habit(&template_id)?;
            print_json(&habit)?;
        }
        HabitAction::Toggle {
            id,
            time,
            date,
            undo,
        } => {
            let date = date.unwrap_or(today);
            store.toggle_habit_slot(&id, date, time, !undo)?;
            let complete = store.is_habit_day_complete(&id, date)?;
            println!(
                "{date} {time} {}{}",
                if undo { "not done" } else { "done" },
                if complete { " (day complete)" } else { "" }
            );
        }
        HabitAction::Status { id, status } => {
            store.set_habit_status(&id, status.into())?;
            println!("ok");
        }
        HabitAction::Rename { id, title } => {
            store.update_habit_title(&id, &title)?;
            println!("ok");
        }
        HabitAction::Program { id, program } => {
            let program = program.build()?;
            let description = program.describe();
            store.update_habit_program(&id, program)?;
            println!("{description}");
        }
        HabitAction::Streak { id } => {
            println!("{}", store.habit_streak(&id)?);
        }
    }

    Ok(())
}

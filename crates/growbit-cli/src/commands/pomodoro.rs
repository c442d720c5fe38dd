use std::path::Path;

use chrono::Duration;
use clap::{Subcommand, ValueEnum};
use growbit_core::pomodoro::format_duration;
use growbit_core::{complete_phase_and_notify, Clock, PomodoroSession, SessionMode};
use serde_json::json;
use uuid::Uuid;

use super::reminders::LogScheduler;
use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Record a session that ended now
    Record {
        /// Length in minutes, defaults to the configured work length
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long, value_enum, default_value = "work")]
        mode: ModeArg,
    },
    /// Work totals for today and the current week
    Stats,
    /// Most recent sessions, newest first
    Recent {
        #[arg(short, long, default_value = "10")]
        count: usize,
    },
    /// Finish the current phase and advance the cycle, alerting when work ends
    Next,
    /// Print the cycle state
    Status,
    /// Start the current phase
    Start,
    /// Pause the current phase
    Pause,
    /// Switch between work and break without recording
    Switch,
    /// Back to an idle work phase
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Work,
    Break,
}

impl From<ModeArg> for SessionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Work => SessionMode::Work,
            ModeArg::Break => SessionMode::Break,
        }
    }
}

pub fn run(action: PomodoroAction, data_dir: Option<&Path>) -> CliResult {
    let mut store = open_store(data_dir)?;
    let mut cycle = store.load_cycle();
    let settings = store.settings().pomodoro.clone();

    match action {
        PomodoroAction::Record { minutes, mode } => {
            let duration_sec = match minutes {
                Some(m) => m.checked_mul(60).ok_or("minutes out of range")?,
                None => settings.work_sec,
            };
            let ended_at = store.clock().now();
            let session = PomodoroSession {
                id: Uuid::new_v4().to_string(),
                started_at: ended_at - Duration::seconds(i64::from(duration_sec)),
                ended_at,
                duration_sec,
                mode: mode.into(),
            };
            print_json(&session)?;
            store.add_pomodoro_session(session);
            return Ok(());
        }
        PomodoroAction::Stats => {
            let today = store.today_work_total();
            let week = store.weekly_summary();
            print_json(&json!({
                "today_sec": today,
                "today": format_duration(today),
                "week": week,
                "week_total": format_duration(week.total_sec),
                "week_average": format_duration(week.average_sec),
            }))?;
            return Ok(());
        }
        PomodoroAction::Recent { count } => {
            print_json(&store.sessions().recent(count))?;
            return Ok(());
        }
        PomodoroAction::Next => {
            let outcome = complete_phase_and_notify(&mut store, &mut cycle, &mut LogScheduler);
            print_json(&outcome)?;
        }
        PomodoroAction::Status => print_json(&cycle)?,
        PomodoroAction::Start => {
            cycle.start();
            print_json(&cycle)?;
        }
        PomodoroAction::Pause => {
            cycle.pause();
            print_json(&cycle)?;
        }
        PomodoroAction::Switch => {
            cycle.switch_mode(&settings, None);
            print_json(&cycle)?;
        }
        PomodoroAction::Reset => {
            cycle.reset(&settings);
            println!("{{\"type\": \"cycle_reset\"}}");
        }
    }

    store.save_cycle(&cycle)?;
    Ok(())
}

//! Habit reminder commands for CLI.
//!
//! A terminal has no OS alert center, so the scheduler here only logs what
//! it would schedule and hands out ids. GUI front ends plug in a real
//! [`NotificationScheduler`].

use std::path::Path;

use chrono::Weekday;
use clap::Subcommand;
use growbit_core::reminders::trigger_weekday;
use growbit_core::{sync_reminders, NotificationScheduler, SlotTime};
use uuid::Uuid;

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum RemindersAction {
    /// Reschedule reminders for every habit slot
    Sync {
        /// Turn reminders on before syncing
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        /// Turn reminders off and cancel them
        #[arg(long)]
        disable: bool,
    },
}

/// Scheduler that records alerts in the log.
pub struct LogScheduler;

impl NotificationScheduler for LogScheduler {
    fn ensure_permissions(&mut self) -> bool {
        true
    }

    fn schedule_daily(
        &mut self,
        time: SlotTime,
        title: &str,
        body: &str,
    ) -> growbit_core::Result<String> {
        let id = Uuid::new_v4().to_string();
        tracing::info!(%id, %time, title, body, "daily reminder");
        Ok(id)
    }

    fn schedule_weekly(
        &mut self,
        weekday: Weekday,
        time: SlotTime,
        title: &str,
        body: &str,
    ) -> growbit_core::Result<String> {
        let id = Uuid::new_v4().to_string();
        let weekday = trigger_weekday(weekday);
        tracing::info!(%id, weekday, %time, title, body, "weekly reminder");
        Ok(id)
    }

    fn notify_now(&mut self, title: &str, body: &str) -> growbit_core::Result<String> {
        let id = Uuid::new_v4().to_string();
        tracing::info!(%id, title, body, "alert");
        eprintln!("{title}: {body}");
        Ok(id)
    }

    fn cancel(&mut self, ids: &[String]) -> growbit_core::Result<()> {
        tracing::info!(count = ids.len(), "cancelled reminders");
        Ok(())
    }
}

pub fn run(action: RemindersAction, data_dir: Option<&Path>) -> CliResult {
    let mut store = open_store(data_dir)?;

    match action {
        RemindersAction::Sync { enable, disable } => {
            if enable {
                store.set_habit_reminders_enabled(true);
            } else if disable {
                store.set_habit_reminders_enabled(false);
            }
            let report = sync_reminders(&mut store, &mut LogScheduler);
            store.save()?;
            print_json(&report)?;
        }
    }
    Ok(())
}

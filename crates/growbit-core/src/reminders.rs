//! Habit reminders and Pomodoro alerts through an external notification
//! scheduler.
//!
//! Reminder delivery is best-effort. Permission denial, scheduling failures
//! and cancellation failures are logged and counted, never propagated, and
//! never undo a settings change.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::Result;
use crate::habit::{RecurrenceProgram, SlotTime};
use crate::pomodoro::{PhaseOutcome, PomodoroCycle};
use crate::storage::KeyValueStore;
use crate::store::AppStore;

/// Body text of every habit reminder.
pub const REMINDER_BODY: &str = "Scheduled time has arrived";

pub const POMODORO_END_TITLE: &str = "Pomodoro finished";
pub const POMODORO_END_BODY: &str = "Time for a break!";

/// OS-level scheduler of repeating local alerts.
pub trait NotificationScheduler {
    /// Ask for (or confirm) permission to post alerts.
    fn ensure_permissions(&mut self) -> bool;

    /// Repeat every day at `time`. Returns an opaque identifier.
    fn schedule_daily(&mut self, time: SlotTime, title: &str, body: &str) -> Result<String>;

    /// Repeat every week on `weekday` at `time`. Returns an opaque identifier.
    fn schedule_weekly(
        &mut self,
        weekday: Weekday,
        time: SlotTime,
        title: &str,
        body: &str,
    ) -> Result<String>;

    /// Post a one-shot alert right away. Returns an opaque identifier.
    fn notify_now(&mut self, title: &str, body: &str) -> Result<String>;

    fn cancel(&mut self, ids: &[String]) -> Result<()>;
}

/// Weekday number used by notification triggers: Sunday = 1 .. Saturday = 7.
pub fn trigger_weekday(day: Weekday) -> u8 {
    day.number_from_sunday() as u8
}

/// What a reminder sync did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReminderSync {
    pub scheduled: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub permission_denied: bool,
}

/// Bring scheduled reminders in line with the habits and the
/// `habit_reminders_enabled` setting.
///
/// Enabled: previously stored alerts are cancelled and one alert per slot
/// is scheduled, daily slots daily and weekly slots on their weekday.
/// Disabled: stored alerts are cancelled and the id list cleared. Without
/// permission nothing changes.
pub fn sync_reminders<S, C, N>(store: &mut AppStore<S, C>, scheduler: &mut N) -> ReminderSync
where
    S: KeyValueStore,
    C: Clock,
    N: NotificationScheduler,
{
    let mut report = ReminderSync::default();

    if store.settings().habit_reminders_enabled && !scheduler.ensure_permissions() {
        tracing::warn!("notification permission denied, reminders unchanged");
        report.permission_denied = true;
        return report;
    }

    let existing = store.habit_notification_ids().to_vec();
    if !existing.is_empty() {
        match scheduler.cancel(&existing) {
            Ok(()) => report.cancelled = existing.len(),
            Err(e) => tracing::warn!(error = %e, "failed to cancel reminders"),
        }
    }

    if !store.settings().habit_reminders_enabled {
        store.set_habit_notification_ids(Vec::new());
        return report;
    }

    let mut ids = Vec::new();
    for habit in store.habits() {
        let results: Vec<Result<String>> = match &habit.program {
            RecurrenceProgram::Daily { slots } => slots
                .iter()
                .map(|&time| scheduler.schedule_daily(time, &habit.title, REMINDER_BODY))
                .collect(),
            RecurrenceProgram::Weekly { schedule } => schedule
                .iter()
                .flat_map(|(day, slots)| slots.iter().map(move |&time| (day, time)))
                .map(|(day, time)| {
                    scheduler.schedule_weekly(day, time, &habit.title, REMINDER_BODY)
                })
                .collect(),
        };

        for result in results {
            match result {
                Ok(id) => ids.push(id),
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(habit_id = %habit.id, error = %e, "failed to schedule reminder");
                }
            }
        }
    }

    report.scheduled = ids.len();
    tracing::info!(scheduled = report.scheduled, failed = report.failed, "reminders synced");
    store.set_habit_notification_ids(ids);
    report
}

/// Finish the cycle's current phase and, when a work phase ended and
/// `notify_on_pomodoro_end` is on, post an immediate alert.
///
/// A failed alert is logged and leaves `notified` false; the phase is
/// completed either way.
pub fn complete_phase_and_notify<S, C, N>(
    store: &mut AppStore<S, C>,
    cycle: &mut PomodoroCycle,
    scheduler: &mut N,
) -> PhaseOutcome
where
    S: KeyValueStore,
    C: Clock,
    N: NotificationScheduler,
{
    let mut outcome = store.complete_pomodoro_phase(cycle);
    if outcome.session.is_none() || !store.settings().notify_on_pomodoro_end {
        return outcome;
    }

    match scheduler.notify_now(POMODORO_END_TITLE, POMODORO_END_BODY) {
        Ok(_) => outcome.notified = true,
        Err(e) => tracing::warn!(error = %e, "failed to post pomodoro alert"),
    }
    outcome
}

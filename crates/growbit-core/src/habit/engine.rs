//! Habit scheduling and completion engine.
//!
//! Pure functions over [`Habit`] values. Nothing here reads the wall clock:
//! the caller passes the relevant date, usually from a [`crate::Clock`].
//!
//! ## Streak rule
//!
//! Walking backward from today, days with no scheduled slots are skipped,
//! complete scheduled days extend the streak, and the first incomplete
//! scheduled day ends it. The walk covers at most [`STREAK_LOOKBACK_DAYS`]
//! days, so a habit with nothing scheduled in that window reports the full
//! bound.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::model::Habit;
use super::program::{RecurrenceProgram, WEEK};
use super::slot::SlotTime;
use crate::settings::WeekStart;

/// Fixed lookback bound for [`compute_streak`], today included.
pub const STREAK_LOOKBACK_DAYS: u64 = 365;

/// One slot of a habit, paired with the habit's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub time: SlotTime,
    pub title: String,
}

/// Every scheduled slot of one weekday, sorted by time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAgenda {
    pub weekday: Weekday,
    pub slots: Vec<ScheduledSlot>,
}

/// Cross-habit schedule for Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyProgram {
    pub days: Vec<DayAgenda>,
}

impl WeeklyProgram {
    pub fn day(&self, weekday: Weekday) -> &[ScheduledSlot] {
        self.days
            .iter()
            .find(|d| d.weekday == weekday)
            .map(|d| d.slots.as_slice())
            .unwrap_or(&[])
    }
}

/// Slots scheduled for `habit` on `date`, ascending.
pub fn slots_for_date(habit: &Habit, date: NaiveDate) -> Vec<SlotTime> {
    habit.program.slots_on(date.weekday()).iter().copied().collect()
}

/// Whether every slot scheduled on `date` is marked done.
///
/// Days with nothing scheduled are vacuously complete. Progress entries
/// for slots no longer in the program are ignored.
pub fn is_day_complete(habit: &Habit, date: NaiveDate) -> bool {
    habit
        .program
        .slots_on(date.weekday())
        .iter()
        .all(|&time| habit.is_slot_done(date, time))
}

/// Record `done` for `time` on `date`.
///
/// The slot is not checked against the program, so out-of-schedule or
/// stale slots can be recorded too.
pub fn toggle_slot(habit: &mut Habit, date: NaiveDate, time: SlotTime, done: bool) {
    habit
        .slot_progress
        .entry(date)
        .or_default()
        .insert(time, done);
}

/// Current streak as of `today`. See the module docs for the rule.
pub fn compute_streak(habit: &Habit, today: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_LOOKBACK_DAYS {
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        if habit.program.slots_on(date.weekday()).is_empty() {
            continue;
        }
        if !is_day_complete(habit, date) {
            break;
        }
        streak += 1;
    }
    streak
}

/// Replace the program wholesale. Recorded progress is kept as is.
pub fn update_program(habit: &mut Habit, program: RecurrenceProgram) {
    habit.program = program;
}

/// Collect every habit's slots per weekday, Monday first.
///
/// Daily habits contribute to all seven days. Within a day the list is
/// sorted by time; habits sharing a time keep their input order and are
/// not merged.
pub fn weekly_aggregate<'a, I>(habits: I) -> WeeklyProgram
where
    I: IntoIterator<Item = &'a Habit>,
    I::IntoIter: Clone,
{
    let habits = habits.into_iter();
    let days = WEEK
        .into_iter()
        .map(|weekday| DayAgenda {
            weekday,
            slots: agenda_for_weekday(habits.clone(), weekday),
        })
        .collect();
    WeeklyProgram { days }
}

/// Slots due across all habits on `date`, sorted by time, then title.
pub fn today_agenda<'a>(
    habits: impl IntoIterator<Item = &'a Habit>,
    date: NaiveDate,
) -> Vec<ScheduledSlot> {
    let mut slots = agenda_for_weekday(habits, date.weekday());
    slots.sort_by(|a, b| (a.time, &a.title).cmp(&(b.time, &b.title)));
    slots
}

fn agenda_for_weekday<'a>(
    habits: impl IntoIterator<Item = &'a Habit>,
    weekday: Weekday,
) -> Vec<ScheduledSlot> {
    let mut slots: Vec<ScheduledSlot> = habits
        .into_iter()
        .flat_map(|habit| {
            habit
                .program
                .slots_on(weekday)
                .iter()
                .map(move |&time| ScheduledSlot {
                    time,
                    title: habit.title.clone(),
                })
        })
        .collect();
    slots.sort_by_key(|s| s.time);
    slots
}

/// Half-open `[start, end)` date range of the week containing `today`.
pub fn week_bounds(today: NaiveDate, week_starts_on: WeekStart) -> (NaiveDate, NaiveDate) {
    let into_week = match week_starts_on {
        WeekStart::Sunday => today.weekday().num_days_from_sunday(),
        WeekStart::Monday => today.weekday().num_days_from_monday(),
    };
    let start = today - Days::new(u64::from(into_week));
    (start, start + Days::new(7))
}

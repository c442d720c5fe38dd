//! Recurrence programs: which slots apply on which days.
//!
//! A program is either `Daily` (one slot set for every calendar day) or
//! `Weekly` (a fixed Monday..Sunday record of slot sets). Slot sets are
//! ordered sets, so every day's list is unique and sorted ascending.

use std::collections::BTreeSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::slot::SlotTime;

/// Ordered, duplicate-free set of slot times for one day.
pub type SlotSet = BTreeSet<SlotTime>;

/// Monday-first order used for every week-wide view.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Slot sets for each weekday of a weekly program.
///
/// Days without slots are left empty and omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(rename = "Mon", default, skip_serializing_if = "BTreeSet::is_empty")]
    mon: SlotSet,
    #[serde(rename = "Tue", default, skip_serializing_if = "BTreeSet::is_empty")]
    tue: SlotSet,
    #[serde(rename = "Wed", default, skip_serializing_if = "BTreeSet::is_empty")]
    wed: SlotSet,
    #[serde(rename = "Thu", default, skip_serializing_if = "BTreeSet::is_empty")]
    thu: SlotSet,
    #[serde(rename = "Fri", default, skip_serializing_if = "BTreeSet::is_empty")]
    fri: SlotSet,
    #[serde(rename = "Sat", default, skip_serializing_if = "BTreeSet::is_empty")]
    sat: SlotSet,
    #[serde(rename = "Sun", default, skip_serializing_if = "BTreeSet::is_empty")]
    sun: SlotSet,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper that adds `times` to `day`.
    pub fn with_day(mut self, day: Weekday, times: impl IntoIterator<Item = SlotTime>) -> Self {
        self.day_mut(day).extend(times);
        self
    }

    pub fn day(&self, day: Weekday) -> &SlotSet {
        match day {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut SlotSet {
        match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }

    /// Days that carry at least one slot, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &SlotSet)> + '_ {
        WEEK.into_iter()
            .map(|day| (day, self.day(day)))
            .filter(|(_, slots)| !slots.is_empty())
    }
}

/// Recurrence rule of a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecurrenceProgram {
    /// The same slots on every calendar day.
    Daily { slots: SlotSet },
    /// Slots only on the weekdays listed in the schedule.
    Weekly { schedule: WeeklySchedule },
}

impl RecurrenceProgram {
    pub fn daily(times: impl IntoIterator<Item = SlotTime>) -> Self {
        Self::Daily {
            slots: times.into_iter().collect(),
        }
    }

    pub fn weekly(schedule: WeeklySchedule) -> Self {
        Self::Weekly { schedule }
    }

    /// Slots that apply on `day`. Daily programs ignore the weekday.
    pub fn slots_on(&self, day: Weekday) -> &SlotSet {
        match self {
            Self::Daily { slots } => slots,
            Self::Weekly { schedule } => schedule.day(day),
        }
    }

    /// Add a slot parsed from user text.
    ///
    /// Malformed text and duplicates are ignored and reported as `false`.
    /// `day` only matters for weekly programs.
    pub fn add_slot(&mut self, day: Weekday, raw: &str) -> bool {
        let Ok(time) = SlotTime::parse(raw) else {
            return false;
        };
        self.slots_on_mut(day).insert(time)
    }

    /// Remove a slot. Returns whether it was present.
    pub fn remove_slot(&mut self, day: Weekday, time: SlotTime) -> bool {
        self.slots_on_mut(day).remove(&time)
    }

    fn slots_on_mut(&mut self, day: Weekday) -> &mut SlotSet {
        match self {
            Self::Daily { slots } => slots,
            Self::Weekly { schedule } => schedule.day_mut(day),
        }
    }

    /// One-line human-readable summary.
    pub fn describe(&self) -> String {
        match self {
            Self::Daily { slots } => format!("Daily: {}", join_times(slots)),
            Self::Weekly { schedule } => {
                let days: Vec<String> = schedule
                    .iter()
                    .map(|(day, slots)| format!("{day} {}", join_times(slots)))
                    .collect();
                format!("Weekly: {}", days.join(" | "))
            }
        }
    }
}

fn join_times(slots: &SlotSet) -> String {
    slots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

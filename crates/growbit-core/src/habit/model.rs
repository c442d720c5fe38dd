use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::program::RecurrenceProgram;
use super::slot::SlotTime;

/// Per-date, per-slot completion flags. Absent entries mean "not done".
pub type SlotProgress = BTreeMap<NaiveDate, BTreeMap<SlotTime, bool>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Presentational status of a habit. Both states remain trackable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HabitStatus {
    InProgress,
    Acquired,
}

/// Catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    /// Icon name used by front ends.
    pub icon: String,
}

/// Read-only catalog entry a habit is acquired from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitTemplate {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub program: RecurrenceProgram,
}

/// A tracked habit.
///
/// The program is copied from the template at acquisition and edited
/// independently afterwards. `slot_progress` keeps entries for slots that
/// were later removed from the program; completion logic ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub template_id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub category_id: String,
    pub status: HabitStatus,
    pub created_at: DateTime<Utc>,
    pub program: RecurrenceProgram,
    #[serde(default)]
    pub slot_progress: SlotProgress,
}

impl Habit {
    /// Instantiate a habit from a template, copying program and descriptive fields.
    pub fn from_template(template: &HabitTemplate, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            template_id: template.id.clone(),
            title: template.title.clone(),
            difficulty: template.difficulty,
            category_id: template.category_id.clone(),
            status: HabitStatus::InProgress,
            created_at,
            program: template.program.clone(),
            slot_progress: SlotProgress::new(),
        }
    }

    /// Whether `time` on `date` has been marked done.
    pub fn is_slot_done(&self, date: NaiveDate, time: SlotTime) -> bool {
        self.slot_progress
            .get(&date)
            .and_then(|day| day.get(&time))
            .copied()
            .unwrap_or(false)
    }
}

//! Read-only catalog of habit templates and categories.
//!
//! The store only reads from the catalog when a habit is acquired; the
//! template's program and descriptive fields are copied into the new habit.

use chrono::Weekday;

use crate::habit::{
    Category, Difficulty, HabitTemplate, RecurrenceProgram, SlotTime, WeeklySchedule,
};

/// Static list of templates grouped by category.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    categories: Vec<Category>,
    templates: Vec<HabitTemplate>,
}

impl TemplateCatalog {
    pub fn new(categories: Vec<Category>, templates: Vec<HabitTemplate>) -> Self {
        Self {
            categories,
            templates,
        }
    }

    /// The seed catalog shipped with the application.
    pub fn builtin() -> Self {
        let category = |id: &str, title: &str, icon: &str| Category {
            id: id.into(),
            title: title.into(),
            icon: icon.into(),
        };
        let categories = vec![
            category("health", "Health", "heart-outline"),
            category("productivity", "Productivity", "checkmark-done-outline"),
            category("mind", "Mind", "book-outline"),
            category("social", "Social", "people-outline"),
            category("learning", "Learning", "school-outline"),
        ];

        let at = |hour: u8| SlotTime::new(hour, 0);
        let run_days = [Weekday::Mon, Weekday::Wed, Weekday::Fri]
            .into_iter()
            .fold(WeeklySchedule::new(), |schedule, day| {
                schedule.with_day(day, at(7))
            });

        let templates = vec![
            HabitTemplate {
                id: "water-8".into(),
                category_id: "health".into(),
                title: "8 Glasses of Water a Day".into(),
                difficulty: Difficulty::Easy,
                // 08:00 through 22:00, every two hours.
                program: RecurrenceProgram::daily((8..=22).step_by(2).filter_map(at)),
            },
            HabitTemplate {
                id: "run-3w".into(),
                category_id: "health".into(),
                title: "Run 3 Days a Week".into(),
                difficulty: Difficulty::Medium,
                program: RecurrenceProgram::weekly(run_days),
            },
            HabitTemplate {
                id: "deep-work".into(),
                category_id: "productivity".into(),
                title: "1 Hour of Deep Work Daily".into(),
                difficulty: Difficulty::Hard,
                program: RecurrenceProgram::daily(at(9)),
            },
            HabitTemplate {
                id: "read-20".into(),
                category_id: "mind".into(),
                title: "Read 20 Minutes Daily".into(),
                difficulty: Difficulty::Easy,
                program: RecurrenceProgram::daily(at(21)),
            },
        ];

        Self::new(categories, templates)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn templates(&self) -> &[HabitTemplate] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&HabitTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates belonging to `category_id`, in catalog order.
    pub fn templates_in<'a>(
        &'a self,
        category_id: &'a str,
    ) -> impl Iterator<Item = &'a HabitTemplate> + 'a {
        self.templates
            .iter()
            .filter(move |t| t.category_id == category_id)
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

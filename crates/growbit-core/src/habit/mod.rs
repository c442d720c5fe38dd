//! Habit entities, recurrence programs and the scheduling engine.

pub mod engine;
mod model;
mod program;
mod slot;

pub use engine::{
    compute_streak, is_day_complete, slots_for_date, today_agenda, toggle_slot, update_program,
    week_bounds, weekly_aggregate, DayAgenda, ScheduledSlot, WeeklyProgram, STREAK_LOOKBACK_DAYS,
};
pub use model::{Category, Difficulty, Habit, HabitStatus, HabitTemplate, SlotProgress};
pub use program::{RecurrenceProgram, SlotSet, WeeklySchedule, WEEK};
pub use slot::SlotTime;

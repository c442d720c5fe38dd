//! # Growbit Core Library
//!
//! Core logic for Growbit, a focus timer combined with a habit tracker.
//! Front ends (the `growbit` CLI, or any GUI) are thin layers over this
//! crate.
//!
//! ## Architecture
//!
//! - **Habit engine**: pure functions deciding which slots are due on a
//!   date, whether a day is complete, streaks and the week-wide program
//! - **Store**: a single-writer container that applies engine results and
//!   rewrites the persisted state after every mutation, best-effort
//! - **Storage**: key-value backends (SQLite or in-memory) holding the
//!   state as one JSON document
//! - **Pomodoro**: work/break cycle and the capped session log
//! - **Reminders**: scheduling habit alerts through an external notifier
//!
//! ## Key Components
//!
//! - [`AppStore`]: application state container
//! - [`Habit`] and [`RecurrenceProgram`]: tracked habits and their schedules
//! - [`TemplateCatalog`]: read-only habit templates
//! - [`Clock`]: injectable source of "today"

pub mod catalog;
pub mod clock;
pub mod error;
pub mod habit;
pub mod pomodoro;
pub mod reminders;
pub mod settings;
pub mod storage;
pub mod store;

pub use catalog::TemplateCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, Result, SettingsError};
pub use habit::{
    Category, Difficulty, Habit, HabitStatus, HabitTemplate, RecurrenceProgram, SlotTime,
    WeeklySchedule,
};
pub use pomodoro::{PomodoroCycle, PomodoroSession, SessionMode};
pub use reminders::{
    complete_phase_and_notify, sync_reminders, NotificationScheduler, ReminderSync,
};
pub use settings::{Settings, WeekStart};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use store::{AppStore, PersistedState};

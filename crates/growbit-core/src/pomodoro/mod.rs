//! Pomodoro focus sessions: the work/break cycle and the session log.

mod cycle;
mod session;

pub use cycle::{PhaseOutcome, PomodoroCycle};
pub use session::{
    format_duration, PomodoroSession, SessionLog, SessionMode, SessionSummary, MAX_SESSIONS,
};

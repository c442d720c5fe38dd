//! Work/break sequencing for the Pomodoro timer.
//!
//! The cycle does not count down by itself: the front end runs the
//! countdown and calls [`PomodoroCycle::complete_phase`] when it reaches
//! zero.
//!
//! ## Transitions
//!
//! ```text
//! Work -(complete)-> Break (long every `cycle_len` completed work phases)
//! Break -(complete)-> Work
//! ```
//!
//! With `auto_switch` disabled the cycle still advances to the next phase
//! but stops running.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::{PomodoroSession, SessionMode};
use crate::settings::PomodoroSettings;

/// Persistable state of the work/break cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroCycle {
    mode: SessionMode,
    /// Work phases completed since the last reset.
    completed_work: u32,
    /// Length of the current phase in seconds.
    phase_sec: u32,
    running: bool,
}

/// Result of finishing a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOutcome {
    /// Session to record; only work phases produce one.
    pub session: Option<PomodoroSession>,
    pub next_mode: SessionMode,
    pub next_phase_sec: u32,
    pub long_break: bool,
    pub running: bool,
    /// Whether an end-of-work alert was posted.
    #[serde(default)]
    pub notified: bool,
}

impl PomodoroCycle {
    /// Idle cycle at the start of a work phase.
    pub fn new(settings: &PomodoroSettings) -> Self {
        Self {
            mode: SessionMode::Work,
            completed_work: 0,
            phase_sec: settings.work_sec,
            running: false,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn completed_work(&self) -> u32 {
        self.completed_work
    }

    pub fn phase_sec(&self) -> u32 {
        self.phase_sec
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Manually switch to `next`, or to the other mode when `None`.
    ///
    /// Uses the short break duration; only completed work phases earn the
    /// long break.
    pub fn switch_mode(&mut self, settings: &PomodoroSettings, next: Option<SessionMode>) {
        let next = next.unwrap_or(match self.mode {
            SessionMode::Work => SessionMode::Break,
            SessionMode::Break => SessionMode::Work,
        });
        self.mode = next;
        self.phase_sec = match next {
            SessionMode::Work => settings.work_sec,
            SessionMode::Break => settings.break_sec,
        };
    }

    /// Finish the current phase at `ended_at` and advance.
    pub fn complete_phase(
        &mut self,
        settings: &PomodoroSettings,
        ended_at: DateTime<Utc>,
    ) -> PhaseOutcome {
        let mut long_break = false;
        let session = match self.mode {
            SessionMode::Work => {
                self.completed_work += 1;
                long_break =
                    settings.cycle_len > 0 && self.completed_work % settings.cycle_len == 0;
                self.mode = SessionMode::Break;
                self.phase_sec = if long_break {
                    settings.long_break_sec
                } else {
                    settings.break_sec
                };

                let duration_sec = settings.work_sec;
                Some(PomodoroSession {
                    id: Uuid::new_v4().to_string(),
                    started_at: ended_at - Duration::seconds(i64::from(duration_sec)),
                    ended_at,
                    duration_sec,
                    mode: SessionMode::Work,
                })
            }
            SessionMode::Break => {
                self.mode = SessionMode::Work;
                self.phase_sec = settings.work_sec;
                None
            }
        };

        if !settings.auto_switch {
            self.running = false;
        }

        PhaseOutcome {
            session,
            next_mode: self.mode,
            next_phase_sec: self.phase_sec,
            long_break,
            running: self.running,
            notified: false,
        }
    }

    /// Back to an idle work phase with the counter cleared.
    pub fn reset(&mut self, settings: &PomodoroSettings) {
        *self = Self::new(settings);
    }
}

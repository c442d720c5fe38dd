//! Completed Pomodoro sessions and their statistics.
//!
//! The log is newest-first and keeps at most [`MAX_SESSIONS`] entries;
//! appending beyond the cap evicts the oldest.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Upper bound on retained sessions.
pub const MAX_SESSIONS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Work,
    Break,
}

/// Record of one completed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_sec: u32,
    pub mode: SessionMode,
}

/// Aggregate over work sessions in a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionSummary {
    pub total_sec: u64,
    pub count: u64,
    /// Rounded mean, 0 when there are no sessions.
    pub average_sec: u64,
}

/// Capped, newest-first session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SessionLog {
    sessions: Vec<PomodoroSession>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a session, evicting the oldest beyond [`MAX_SESSIONS`].
    pub fn push(&mut self, session: PomodoroSession) {
        self.sessions.insert(0, session);
        self.sessions.truncate(MAX_SESSIONS);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PomodoroSession> {
        self.sessions.iter()
    }

    /// Up to `n` most recent sessions.
    pub fn recent(&self, n: usize) -> &[PomodoroSession] {
        &self.sessions[..n.min(self.sessions.len())]
    }

    /// Work sessions started in the half-open date range `[start, end)`,
    /// with start dates taken in `clock`'s time zone.
    pub fn summary(&self, start: NaiveDate, end: NaiveDate, clock: &impl Clock) -> SessionSummary {
        let (total_sec, count) = self
            .sessions
            .iter()
            .filter(|s| s.mode == SessionMode::Work)
            .filter(|s| {
                let day = clock.date_of(s.started_at);
                day >= start && day < end
            })
            .fold((0u64, 0u64), |(total, count), s| {
                (total + u64::from(s.duration_sec), count + 1)
            });

        let average_sec = if count == 0 {
            0
        } else {
            (total_sec + count / 2) / count
        };

        SessionSummary {
            total_sec,
            count,
            average_sec,
        }
    }

    /// Total work seconds started on `date`.
    pub fn work_total_on(&self, date: NaiveDate, clock: &impl Clock) -> u64 {
        match date.succ_opt() {
            Some(next) => self.summary(date, next, clock).total_sec,
            None => 0,
        }
    }
}

/// Format seconds as zero-padded `MM:SS`. Minutes are not wrapped at 60.
pub fn format_duration(sec: u64) -> String {
    format!("{:02}:{:02}", sec / 60, sec % 60)
}

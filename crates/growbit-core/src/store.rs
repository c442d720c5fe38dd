//! In-memory application state with write-through persistence.
//!
//! [`AppStore`] owns the habits, settings and session log, applies the pure
//! engine functions to them and rewrites the whole state after every
//! mutation. Saving is best-effort: a failed write is logged and the
//! in-memory state is kept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::TemplateCatalog;
use crate::clock::Clock;
use crate::error::{CoreError, Result};
use crate::habit::{
    self, Habit, HabitStatus, RecurrenceProgram, ScheduledSlot, SlotTime, WeeklyProgram,
};
use crate::pomodoro::{PhaseOutcome, PomodoroCycle, PomodoroSession, SessionLog, SessionSummary};
use crate::settings::{Settings, WeekStart};
use crate::storage::KeyValueStore;

/// Storage key of the persisted state document.
pub const STATE_KEY: &str = "growbit:app";
/// Storage key of the Pomodoro cycle, kept apart from the main document.
pub const CYCLE_KEY: &str = "growbit:pomodoro";

/// Everything that is persisted, as one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PersistedState {
    #[serde(default)]
    pub settings: Settings,
    /// Newest first.
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub pomodoro_sessions: SessionLog,
    #[serde(default)]
    pub habit_notification_ids: Vec<String>,
}

/// Single-writer container for the application state.
pub struct AppStore<S, C> {
    state: PersistedState,
    catalog: TemplateCatalog,
    storage: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> AppStore<S, C> {
    /// Load the state from `storage`, or start empty when nothing is stored.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read or holds a document
    /// that does not parse.
    pub fn load(storage: S, clock: C, catalog: TemplateCatalog) -> Result<Self> {
        let state = match storage.get(STATE_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => PersistedState::default(),
        };
        tracing::debug!(habits = state.habits.len(), "loaded application state");
        Ok(Self {
            state,
            catalog,
            storage,
            clock,
        })
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Write the full state to storage.
    ///
    /// # Errors
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.state)?;
        self.storage.set(STATE_KEY, &json)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "failed to persist application state");
        }
    }

    fn habit_mut(&mut self, id: &str) -> Result<&mut Habit> {
        self.state
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))
    }

    fn update_habit(&mut self, id: &str, f: impl FnOnce(&mut Habit)) -> Result<()> {
        f(self.habit_mut(id)?);
        self.persist();
        Ok(())
    }

    // -- habits ------------------------------------------------------------

    /// Create a habit from a catalog template and put it first in the list.
    ///
    /// # Errors
    /// Returns [`CoreError::TemplateNotFound`] for an unknown template id;
    /// the state is left untouched.
    pub fn acquire_habit(&mut self, template_id: &str) -> Result<Habit> {
        let template = self
            .catalog
            .template(template_id)
            .ok_or_else(|| CoreError::TemplateNotFound(template_id.to_string()))?;
        let habit = Habit::from_template(template, Uuid::new_v4().to_string(), self.clock.now());
        tracing::info!(habit_id = %habit.id, template_id, "acquired habit");

        self.state.habits.insert(0, habit.clone());
        self.persist();
        Ok(habit)
    }

    pub fn habits(&self) -> &[Habit] {
        &self.state.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.state.habits.iter().find(|h| h.id == id)
    }

    fn require_habit(&self, id: &str) -> Result<&Habit> {
        self.habit(id)
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))
    }

    /// In-progress habits first, then acquired ones; list order is kept
    /// within each group.
    pub fn habits_for_display(&self) -> Vec<&Habit> {
        let (in_progress, acquired): (Vec<&Habit>, Vec<&Habit>) = self
            .state
            .habits
            .iter()
            .partition(|h| h.status != HabitStatus::Acquired);
        in_progress.into_iter().chain(acquired).collect()
    }

    /// Mark one slot of a habit done or not done.
    ///
    /// # Errors
    /// Returns [`CoreError::HabitNotFound`] for an unknown habit id.
    pub fn toggle_habit_slot(
        &mut self,
        habit_id: &str,
        date: NaiveDate,
        time: SlotTime,
        done: bool,
    ) -> Result<()> {
        tracing::debug!(habit_id, %date, %time, done, "toggling slot");
        self.update_habit(habit_id, |h| habit::toggle_slot(h, date, time, done))
    }

    pub fn set_habit_status(&mut self, habit_id: &str, status: HabitStatus) -> Result<()> {
        self.update_habit(habit_id, |h| h.status = status)
    }

    pub fn update_habit_title(&mut self, habit_id: &str, title: &str) -> Result<()> {
        self.update_habit(habit_id, |h| h.title = title.to_string())
    }

    pub fn update_habit_program(
        &mut self,
        habit_id: &str,
        program: RecurrenceProgram,
    ) -> Result<()> {
        self.update_habit(habit_id, |h| habit::update_program(h, program))
    }

    /// Streak of a habit as of the clock's today.
    pub fn habit_streak(&self, habit_id: &str) -> Result<u32> {
        let h = self.require_habit(habit_id)?;
        Ok(habit::compute_streak(h, self.clock.today()))
    }

    pub fn is_habit_day_complete(&self, habit_id: &str, date: NaiveDate) -> Result<bool> {
        let h = self.require_habit(habit_id)?;
        Ok(habit::is_day_complete(h, date))
    }

    /// Slots of a habit due on the clock's today.
    pub fn slots_today(&self, habit_id: &str) -> Result<Vec<SlotTime>> {
        let h = self.require_habit(habit_id)?;
        Ok(habit::slots_for_date(h, self.clock.today()))
    }

    /// Week-wide schedule over the display-ordered habit list.
    pub fn weekly_program(&self) -> WeeklyProgram {
        habit::weekly_aggregate(self.habits_for_display())
    }

    /// Everything due today across habits.
    pub fn today_program(&self) -> Vec<ScheduledSlot> {
        habit::today_agenda(self.habits_for_display(), self.clock.today())
    }

    // -- pomodoro ----------------------------------------------------------

    pub fn add_pomodoro_session(&mut self, session: PomodoroSession) {
        self.state.pomodoro_sessions.push(session);
        self.persist();
    }

    pub fn sessions(&self) -> &SessionLog {
        &self.state.pomodoro_sessions
    }

    /// Work seconds started today.
    pub fn today_work_total(&self) -> u64 {
        self.state
            .pomodoro_sessions
            .work_total_on(self.clock.today(), &self.clock)
    }

    /// Work sessions of the current week, honoring `week_starts_on`.
    pub fn weekly_summary(&self) -> SessionSummary {
        let (start, end) =
            habit::week_bounds(self.clock.today(), self.state.settings.week_starts_on);
        self.state.pomodoro_sessions.summary(start, end, &self.clock)
    }

    /// Stored cycle, or a fresh one when none is stored or it is unreadable.
    pub fn load_cycle(&self) -> PomodoroCycle {
        if let Ok(Some(json)) = self.storage.get(CYCLE_KEY) {
            if let Ok(cycle) = serde_json::from_str::<PomodoroCycle>(&json) {
                return cycle;
            }
        }
        PomodoroCycle::new(&self.state.settings.pomodoro)
    }

    /// # Errors
    /// Returns an error if the cycle cannot be written.
    pub fn save_cycle(&mut self, cycle: &PomodoroCycle) -> Result<()> {
        let json = serde_json::to_string(cycle)?;
        self.storage.set(CYCLE_KEY, &json)
    }

    /// Finish the cycle's current phase now, recording the work session.
    pub fn complete_pomodoro_phase(&mut self, cycle: &mut PomodoroCycle) -> PhaseOutcome {
        let outcome = cycle.complete_phase(&self.state.settings.pomodoro, self.clock.now());
        if let Some(session) = &outcome.session {
            self.add_pomodoro_session(session.clone());
        }
        outcome
    }

    // -- settings ----------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Set a settings value by dot-separated key.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.state.settings.set(key, value)?;
        self.persist();
        Ok(())
    }

    pub fn reset_settings(&mut self) {
        self.state.settings = Settings::default();
        self.persist();
    }

    pub fn set_week_starts_on(&mut self, week_start: WeekStart) {
        self.state.settings.week_starts_on = week_start;
        self.persist();
    }

    pub fn set_habit_reminders_enabled(&mut self, enabled: bool) {
        self.state.settings.habit_reminders_enabled = enabled;
        self.persist();
    }

    pub fn set_notify_on_pomodoro_end(&mut self, enabled: bool) {
        self.state.settings.notify_on_pomodoro_end = enabled;
        self.persist();
    }

    pub fn set_keep_awake_during_pomodoro(&mut self, enabled: bool) {
        self.state.settings.keep_awake_during_pomodoro = enabled;
        self.persist();
    }

    // -- notifications -----------------------------------------------------

    pub fn habit_notification_ids(&self) -> &[String] {
        &self.state.habit_notification_ids
    }

    pub fn set_habit_notification_ids(&mut self, ids: Vec<String>) {
        self.state.habit_notification_ids = ids;
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::pomodoro::SessionMode;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    /// Storage whose writes always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(CoreError::Io(std::io::Error::other("disk full")))
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store() -> AppStore<MemoryStore, FixedClock> {
        AppStore::load(
            MemoryStore::new(),
            FixedClock::on_date(d("2025-03-05")),
            TemplateCatalog::builtin(),
        )
        .unwrap()
    }

    #[test]
    fn acquire_copies_template_and_prepends() {
        let mut s = store();
        let first = s.acquire_habit("read-20").unwrap();
        let second = s.acquire_habit("run-3w").unwrap();
        assert_eq!(s.habits()[0].id, second.id);
        assert_eq!(s.habits()[1].id, first.id);
        assert_eq!(first.title, "Read 20 Minutes Daily");
        assert_eq!(first.status, HabitStatus::InProgress);
        assert_eq!(first.program, s.catalog().template("read-20").unwrap().program);
        assert_eq!(first.created_at, Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap());
    }

    #[test]
    fn acquire_same_template_twice_is_allowed() {
        let mut s = store();
        let a = s.acquire_habit("deep-work").unwrap();
        let b = s.acquire_habit("deep-work").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(s.habits().len(), 2);
    }

    #[test]
    fn acquire_unknown_template_fails_without_change() {
        let mut s = store();
        let err = s.acquire_habit("nope").unwrap_err();
        assert!(matches!(err, CoreError::TemplateNotFound(id) if id == "nope"));
        assert!(s.habits().is_empty());
    }

    #[test]
    fn edits_to_unknown_habit_report_not_found() {
        let mut s = store();
        assert!(matches!(
            s.update_habit_title("ghost", "x"),
            Err(CoreError::HabitNotFound(_))
        ));
        assert!(s.habit_streak("ghost").is_err());
    }

    #[test]
    fn program_edit_does_not_touch_template_or_history() {
        let mut s = store();
        let h = s.acquire_habit("deep-work").unwrap();
        let today = s.clock().today();
        let nine = SlotTime::parse("09:00").unwrap();
        s.toggle_habit_slot(&h.id, today, nine, true).unwrap();
        s.update_habit_program(&h.id, RecurrenceProgram::daily(SlotTime::new(6, 0)))
            .unwrap();

        let habit = s.habit(&h.id).unwrap();
        assert!(habit.is_slot_done(today, nine));
        assert!(!s.is_habit_day_complete(&h.id, today).unwrap());
        assert_eq!(
            s.catalog().template("deep-work").unwrap().program,
            RecurrenceProgram::daily(SlotTime::new(9, 0))
        );
    }

    #[test]
    fn streak_uses_injected_clock() {
        let mut s = store();
        let h = s.acquire_habit("read-20").unwrap();
        let nine_pm = SlotTime::parse("21:00").unwrap();
        for day in ["2025-03-03", "2025-03-04", "2025-03-05"] {
            s.toggle_habit_slot(&h.id, d(day), nine_pm, true).unwrap();
        }
        assert_eq!(s.habit_streak(&h.id).unwrap(), 3);
        assert_eq!(s.slots_today(&h.id).unwrap(), vec![nine_pm]);
    }

    #[test]
    fn display_order_puts_acquired_last() {
        let mut s = store();
        let a = s.acquire_habit("read-20").unwrap();
        let b = s.acquire_habit("run-3w").unwrap();
        let c = s.acquire_habit("water-8").unwrap();
        s.set_habit_status(&c.id, HabitStatus::Acquired).unwrap();
        let ids: Vec<&str> = s.habits_for_display().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, [b.id.as_str(), a.id.as_str(), c.id.as_str()]);
    }

    #[test]
    fn state_round_trips_through_storage() {
        let mut s = store();
        let h = s.acquire_habit("run-3w").unwrap();
        s.toggle_habit_slot(&h.id, d("2025-03-03"), SlotTime::parse("07:00").unwrap(), true)
            .unwrap();
        s.set_setting("week_starts_on", "monday").unwrap();
        s.set_habit_notification_ids(vec!["n1".into()]);

        let AppStore { state, storage, clock, .. } = s;
        let reloaded = AppStore::load(storage, clock, TemplateCatalog::builtin()).unwrap();
        assert_eq!(reloaded.state(), &state);
        assert_eq!(reloaded.settings().week_starts_on, WeekStart::Monday);
    }

    #[test]
    fn failed_save_keeps_in_memory_state() {
        let mut s = AppStore::load(
            BrokenStore,
            FixedClock::on_date(d("2025-03-05")),
            TemplateCatalog::builtin(),
        )
        .unwrap();
        let h = s.acquire_habit("read-20").unwrap();
        s.update_habit_title(&h.id, "Evening reading").unwrap();
        assert_eq!(s.habit(&h.id).unwrap().title, "Evening reading");
        assert!(s.save().is_err());
    }

    #[test]
    fn corrupt_document_is_reported() {
        let mut storage = MemoryStore::new();
        storage.set(STATE_KEY, "{not json").unwrap();
        let result = AppStore::load(
            storage,
            FixedClock::on_date(d("2025-03-05")),
            TemplateCatalog::builtin(),
        );
        assert!(matches!(result, Err(CoreError::Json(_))));
    }

    #[test]
    fn completing_work_phase_records_session() {
        let mut s = store();
        let mut cycle = s.load_cycle();
        let outcome = s.complete_pomodoro_phase(&mut cycle);
        assert_eq!(outcome.next_mode, SessionMode::Break);
        assert_eq!(s.sessions().len(), 1);
        assert_eq!(s.today_work_total(), 1500);
        assert_eq!(s.weekly_summary().count, 1);

        s.save_cycle(&cycle).unwrap();
        assert_eq!(s.load_cycle(), cycle);
    }

    #[test]
    fn today_program_merges_habits() {
        let mut s = store();
        s.acquire_habit("deep-work").unwrap();
        s.acquire_habit("run-3w").unwrap();
        // 2025-03-05 is a Wednesday.
        let agenda: Vec<String> = s
            .today_program()
            .iter()
            .map(|slot| format!("{} {}", slot.time, slot.title))
            .collect();
        assert_eq!(
            agenda,
            ["07:00 Run 3 Days a Week", "09:00 1 Hour of Deep Work Daily"]
        );
        assert_eq!(s.weekly_program().days.len(), 7);
    }

    #[test]
    fn week_start_setting_moves_weekly_summary() {
        let mut s = store();
        // Sunday 2025-03-02, inside a Sunday-first week but not a Monday-first one.
        let started_at = Utc.with_ymd_and_hms(2025, 3, 2, 10, 0, 0).unwrap();
        s.add_pomodoro_session(PomodoroSession {
            id: "s-1".into(),
            started_at,
            ended_at: started_at + Duration::seconds(1500),
            duration_sec: 1500,
            mode: SessionMode::Work,
        });
        assert_eq!(s.weekly_summary().count, 1);

        s.set_week_starts_on(WeekStart::Monday);
        assert_eq!(s.weekly_summary().count, 0);
        assert_eq!(s.settings().get("week_starts_on").as_deref(), Some("monday"));
    }

    #[test]
    fn typed_setters_are_persisted() {
        let mut s = store();
        s.set_keep_awake_during_pomodoro(false);
        s.set_notify_on_pomodoro_end(false);
        s.set_habit_reminders_enabled(true);

        let AppStore { storage, clock, .. } = s;
        let reloaded = AppStore::load(storage, clock, TemplateCatalog::builtin()).unwrap();
        let settings = reloaded.settings();
        assert!(!settings.keep_awake_during_pomodoro);
        assert!(!settings.notify_on_pomodoro_end);
        assert!(settings.habit_reminders_enabled);
    }
}

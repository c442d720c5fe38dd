//! User settings persisted alongside habits and sessions.
//!
//! Stores user preferences including:
//! - Theme selection
//! - Pomodoro durations and cycle behavior
//! - Habit reminder and Pomodoro notification toggles
//! - First day of the week for weekly statistics
//!
//! Values can be read and written by dot-separated key, e.g.
//! `pomodoro.work_sec`.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Midnight,
    Nord,
}

/// Which UI the Pomodoro screen opens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PomodoroUi {
    #[default]
    Focus,
    Normal,
}

/// First day of the week used for weekly Pomodoro statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

/// Pomodoro timer defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    #[serde(default = "default_work_sec")]
    pub work_sec: u32,
    #[serde(default = "default_break_sec")]
    pub break_sec: u32,
    #[serde(default = "default_long_break_sec")]
    pub long_break_sec: u32,
    /// Completed work phases before a long break.
    #[serde(default = "default_cycle_len")]
    pub cycle_len: u32,
    #[serde(default = "default_true")]
    pub auto_switch: bool,
    #[serde(default)]
    pub default_ui: PomodoroUi,
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme_name: ThemeName,
    #[serde(default)]
    pub pomodoro: PomodoroSettings,
    #[serde(default = "default_true")]
    pub keep_awake_during_pomodoro: bool,
    #[serde(default)]
    pub habit_reminders_enabled: bool,
    #[serde(default = "default_true")]
    pub notify_on_pomodoro_end: bool,
    #[serde(default)]
    pub week_starts_on: WeekStart,
}

// Default functions
fn default_work_sec() -> u32 {
    25 * 60
}
fn default_break_sec() -> u32 {
    5 * 60
}
fn default_long_break_sec() -> u32 {
    15 * 60
}
fn default_cycle_len() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_sec: default_work_sec(),
            break_sec: default_break_sec(),
            long_break_sec: default_long_break_sec(),
            cycle_len: default_cycle_len(),
            auto_switch: true,
            default_ui: PomodoroUi::Focus,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme_name: ThemeName::Dark,
            pomodoro: PomodoroSettings::default(),
            keep_awake_during_pomodoro: true,
            habit_reminders_enabled: false,
            notify_on_pomodoro_end: true,
            week_starts_on: WeekStart::Sunday,
        }
    }
}

impl Settings {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), SettingsError> {
        let unknown = || SettingsError::UnknownKey(key.to_string());
        let invalid = |message: String| SettingsError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot replace a settings section".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Get a settings value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// setting (wrong type, or not one of an enum's names). On error `self`
    /// is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| SettingsError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| SettingsError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

//! Core error types for growbit-core.
//!
//! Contract violations (unknown template or habit ids) and storage failures
//! are reported through [`CoreError`]. Best-effort side effects such as
//! persistence after a mutation are logged by the caller instead of being
//! propagated.

use thiserror::Error;

/// Core error type for growbit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Acquisition was requested for a template that is not in the catalog.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// No habit with the given id exists in the store.
    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    /// A slot time failed the `HH:MM` format check.
    #[error("Invalid slot time '{0}': expected HH:MM (00:00-23:59)")]
    InvalidSlotTime(String),

    /// Settings errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A notification collaborator rejected a request.
    #[error("Notification error: {0}")]
    Notification(String),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The dot-separated key does not name an existing setting.
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// The value cannot be converted to the type of the existing setting.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

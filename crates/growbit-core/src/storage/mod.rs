mod kv;

pub use kv::{KeyValueStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/growbit[-dev]/` based on GROWBIT_ENV.
///
/// Set GROWBIT_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GROWBIT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("growbit-dev")
    } else {
        base_dir.join("growbit")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

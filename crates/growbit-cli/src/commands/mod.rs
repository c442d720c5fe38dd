pub mod habit;
pub mod pomodoro;
pub mod program;
pub mod reminders;
pub mod settings;
pub mod template;

use std::path::Path;

use chrono::NaiveDate;
use growbit_core::{AppStore, SqliteStore, SystemClock, TemplateCatalog};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub type Store = AppStore<SqliteStore, SystemClock>;

/// Open the application store, under `data_dir` when given.
pub fn open_store(data_dir: Option<&Path>) -> Result<Store, Box<dyn std::error::Error>> {
    let storage = match data_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            SqliteStore::open(&dir.join("growbit.db"))?
        }
        None => SqliteStore::open_default()?,
    };
    let store = AppStore::load(storage, SystemClock, TemplateCatalog::builtin())?;
    Ok(store)
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("invalid date '{raw}': {e}"))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

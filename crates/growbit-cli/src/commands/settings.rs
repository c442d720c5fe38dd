use std::path::Path;

use clap::Subcommand;

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "theme_name", "pomodoro.work_sec")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: SettingsAction, data_dir: Option<&Path>) -> CliResult {
    let mut store = open_store(data_dir)?;

    match action {
        SettingsAction::Get { key } => match store.settings().get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        SettingsAction::Set { key, value } => {
            store.set_setting(&key, &value)?;
            store.save()?;
            println!("ok");
        }
        SettingsAction::List => print_json(store.settings())?,
        SettingsAction::Reset => {
            store.reset_settings();
            store.save()?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}

use std::path::Path;

use clap::Subcommand;

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum ProgramAction {
    /// Slots of every habit, Monday through Sunday
    Week,
    /// Everything due today, by time
    Today,
}

pub fn run(action: ProgramAction, data_dir: Option<&Path>) -> CliResult {
    let store = open_store(data_dir)?;

    match action {
        ProgramAction::Week => print_json(&store.weekly_program())?,
        ProgramAction::Today => print_json(&store.today_program())?,
    }
    Ok(())
}

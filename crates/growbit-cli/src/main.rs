use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "growbit", version, about = "Growbit habit tracker and focus timer")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Data directory (defaults to ~/.config/growbit)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Schedules across all habits
    Program {
        #[command(subcommand)]
        action: commands::program::ProgramAction,
    },
    /// Habit template catalog
    Template {
        #[command(subcommand)]
        action: commands::template::TemplateAction,
    },
    /// Pomodoro cycle and session log
    Pomodoro {
        #[command(subcommand)]
        action: commands::pomodoro::PomodoroAction,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Habit reminders
    Reminders {
        #[command(subcommand)]
        action: commands::reminders::RemindersAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let data_dir = cli.data_dir.as_deref();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action, data_dir),
        Commands::Program { action } => commands::program::run(action, data_dir),
        Commands::Template { action } => commands::template::run(action),
        Commands::Pomodoro { action } => commands::pomodoro::run(action, data_dir),
        Commands::Settings { action } => commands::settings::run(action, data_dir),
        Commands::Reminders { action } => commands::reminders::run(action, data_dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

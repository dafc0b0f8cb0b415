//! Employee Tracker CLI - interactive menu over the employee database.

use clap::Parser;
use colored::Colorize;
use employee_tracker::config::DATABASE_ENV;
use employee_tracker::{
    Dispatcher, LinePrompter, SqlitePersistence, load_config, resolve_database,
};
use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "employee-tracker")]
#[command(about = "Track employees, roles and departments from an interactive menu")]
#[command(version)]
struct Cli {
    /// Configuration file (default: ./employee-tracker.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database file, overriding config and EMPLOYEE_TRACKER_DB
    #[arg(long)]
    database: Option<PathBuf>,
}

fn fail(message: &str) -> ! {
    eprintln!("{}", format!("Error: {}", message).red());
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let cwd = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => fail(&format!("failed to get current directory: {}", e)),
    };
    let config = match load_config(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => fail(&e.to_string()),
    };
    let database = resolve_database(&config, env::var(DATABASE_ENV).ok(), cli.database);

    let persistence = match SqlitePersistence::open(&database) {
        Ok(persistence) => persistence,
        Err(e) => fail(&format!("cannot open {}: {}", database.display(), e)),
    };
    if config.seed {
        match persistence.seed_demo_data() {
            Ok(true) => println!("{}", "Seeded demo data.".dimmed()),
            Ok(false) => {}
            Err(e) => eprintln!("{}", format!("Warning: failed to seed: {}", e).yellow()),
        }
    }

    let stdin = io::stdin();
    let prompter = LinePrompter::new(stdin.lock(), io::stdout());
    let mut dispatcher = Dispatcher::new(persistence, prompter, io::stdout());

    if let Err(e) = dispatcher.refresh() {
        fail(&format!("initial load failed: {}", e));
    }
    if let Err(e) = dispatcher.run() {
        fail(&e.to_string());
    }
}

//! rTimesheet library root.
//! Exposes the CLI parser, the high-level run() function and the timesheet
//! domain modules (reconciliation, workflow, reports, themes).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Employee { action } => cli::commands::employee::handle(action, cfg),
        Commands::Project { action } => cli::commands::project::handle(action, cfg),
        Commands::Timesheet { action } => cli::commands::timesheet::handle(action, cfg),
        Commands::Save { .. } => cli::commands::save::handle(&cli.command, cfg),
        Commands::DeleteRows { .. } => cli::commands::delete_rows::handle(&cli.command, cfg),
        Commands::Report { kind } => cli::commands::report::handle(kind, cfg),
        Commands::Theme { action } => cli::commands::theme::handle(action, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // test mode never reads the user's config file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timesheet::TimesheetService;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::row::SubmittedRow;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_user_path;
use crate::utils::time::format_seconds;
use std::fs;

/// Handle `save --timesheet ID (--file F | --rows JSON)`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Save {
        timesheet,
        file,
        rows,
    } = cmd
    else {
        return Ok(());
    };

    let json = match (file, rows) {
        (Some(path), _) => fs::read_to_string(expand_user_path(path))?,
        (None, Some(inline)) => inline.clone(),
        (None, None) => {
            return Err(AppError::Shape(
                "either --file or --rows must be provided".into(),
            ));
        }
    };

    let rows = SubmittedRow::parse_list(&json)?;

    let mut pool = DbPool::new(&cfg.database)?;
    let mut service = TimesheetService::new(&mut pool, cfg.week_start_day);

    match service.save_rows(*timesheet, &rows)? {
        Some(outcome) => {
            for item in &outcome.items {
                println!(
                    "  #{:<5} {}  project {:<4} activity {:<4} {}",
                    item.id,
                    item.date_str(),
                    item.project_id,
                    item.activity_id,
                    item.duration.map(format_seconds).unwrap_or_default()
                );
            }
            success(format!(
                "Timesheet #{} saved: {} inserted, {} updated",
                timesheet, outcome.inserted, outcome.updated
            ));
        }
        None => warning(format!("Timesheet {} not found", timesheet)),
    }

    Ok(())
}

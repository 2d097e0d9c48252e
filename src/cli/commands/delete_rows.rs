use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timesheet::TimesheetService;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::DeleteRows { timesheet, entries } = cmd else {
        return Ok(());
    };

    let entries: serde_json::Value = serde_json::from_str(entries)?;

    let mut pool = DbPool::new(&cfg.database)?;
    let mut service = TimesheetService::new(&mut pool, cfg.week_start_day);

    if service.get_timesheet(*timesheet)?.is_none() {
        warning(format!("Timesheet {} not found", timesheet));
        return Ok(());
    }

    match service.delete_rows(*timesheet, &entries)? {
        0 => info("Nothing to delete"),
        n => success(format!("{} item(s) deleted from timesheet #{}", n, timesheet)),
    }

    Ok(())
}

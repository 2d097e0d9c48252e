use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::parse_date;
use crate::utils::time::seconds_to_hours_label;
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    Ok(pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Employees", "employees"),
        ("Timesheets", "timesheets"),
        ("Timesheet items", "timesheet_items"),
    ] {
        println!(
            "{}• {}:{} {}{}{}",
            CYAN,
            label,
            RESET,
            GREEN,
            count(pool, table)?,
            RESET
        );
    }

    let total: i64 = pool.conn.query_row(
        "SELECT COALESCE(SUM(duration), 0) FROM timesheet_items",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Logged hours:{} {}",
        CYAN,
        RESET,
        seconds_to_hours_label(total)
    );

    //
    // 3) DATE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM timesheet_items",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    let (first_date, last_date) = range.unwrap_or((None, None));

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Item dates:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE ITEMS/DAY
    //
    if let (Some(d1), Some(d2)) = (
        first_date.as_deref().and_then(parse_date),
        last_date.as_deref().and_then(parse_date),
    ) {
        let days = (d2 - d1).num_days().max(1);
        let avg = count(pool, "timesheet_items")? as f64 / days as f64;
        println!("{}• Average items/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

const OP_TARGET_MAX: usize = 60;

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// ANSI color for an operation of the internal log.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "create" | "employee" | "project" => Colour::Green,
        "del" => Colour::Red,
        "save" => Colour::Yellow,
        "action" => Colour::Cyan,
        "theme" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(40, 168, 72),
        _ => Colour::White,
    }
}

struct LogEntry {
    id: i64,
    date: String,
    operation: String,
    op_target: String,
    message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;

        let mut stmt = pool
            .conn
            .prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: String = row.get(3)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            let op_target = if target.is_empty() {
                operation.clone()
            } else {
                format!("{operation} ({target})")
            };

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation,
                op_target,
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| e.op_target.chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_TARGET_MAX);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for entry in entries {
            let color = color_for_operation(&entry.operation);

            // truncate on visible characters, then paint the operation word only
            let visible = if entry.op_target.chars().count() > OP_TARGET_MAX {
                let mut s: String = entry.op_target.chars().take(OP_TARGET_MAX - 3).collect();
                s.push_str("...");
                s
            } else {
                entry.op_target.clone()
            };

            let painted = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&ansi, &painted).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                entry.date,
                painted,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

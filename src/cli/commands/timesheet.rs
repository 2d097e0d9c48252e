use crate::cli::parser::TimesheetCommand;
use crate::config::Config;
use crate::core::timesheet::TimesheetService;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::grid::DetailedTimesheet;
use crate::models::timesheet::{Timesheet, TimesheetAction};
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{RESET, color_for_cell, color_for_state};
use crate::utils::date::{parse_date_required, parse_optional_date, today};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_seconds;

fn not_found(id: i64) {
    warning(format!("Timesheet {} not found", id));
}

fn state_label(ts: &Timesheet) -> String {
    format!("{}{}{}", color_for_state(ts.state.to_db_str()), ts.state, RESET)
}

fn print_timesheet_line(ts: &Timesheet) {
    println!(
        "#{:<5} emp {:<5} {} → {}  {}",
        ts.id,
        ts.emp_number,
        ts.start_str(),
        ts.end_str(),
        state_label(ts)
    );
}

fn print_grid(detail: &DetailedTimesheet, separator: &str) {
    let ts = &detail.timesheet;
    println!(
        "📅 Timesheet #{} | employee {} | {} → {} | {}\n",
        ts.id,
        ts.emp_number,
        ts.start_str(),
        ts.end_str(),
        state_label(ts)
    );

    let mut columns = vec![Column::new("Project", 12), Column::new("Activity", 12)];
    for col in &detail.columns {
        columns.push(Column::new(&col.date.format("%a %d").to_string(), 6));
    }
    columns.push(Column::new("Total", 6));

    let mut table = Table::new(columns);

    for row in &detail.rows {
        let mut cells = vec![row.project_name.clone(), row.activity_name.clone()];
        for col in &detail.columns {
            let cell = row
                .dates
                .get(&col.date)
                .and_then(|item| item.duration)
                .map(format_seconds)
                .unwrap_or_else(|| "--:--".to_string());
            cells.push(cell);
        }
        cells.push(format_seconds(row.total));
        table.add_row(cells);
    }

    let mut totals = vec!["Total".to_string(), String::new()];
    totals.extend(detail.columns.iter().map(|c| format_seconds(c.total)));
    totals.push(format_seconds(detail.total()));
    table.add_row(totals);

    table.fit();

    // grey out the empty cells after padding so widths stay aligned
    for line in table.render(separator).lines() {
        let painted: Vec<String> = line
            .split_inclusive(' ')
            .map(|chunk| {
                let color = color_for_cell(chunk.trim());
                if color == RESET || chunk.trim().is_empty() {
                    chunk.to_string()
                } else {
                    format!("{}{}{}", color, chunk, RESET)
                }
            })
            .collect();
        println!("{}", painted.concat());
    }
}

pub fn handle(cmd: &TimesheetCommand, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;
    let mut service = TimesheetService::new(&mut pool, cfg.week_start_day);

    match cmd {
        TimesheetCommand::Create { emp_number, date } => {
            let date = match date {
                Some(d) => parse_date_required(d)?,
                None => today(),
            };
            let ts = service.create_timesheet_by_date(*emp_number, date)?;
            success(format!(
                "Timesheet #{} created for employee {} ({} → {})",
                ts.id,
                ts.emp_number,
                ts.start_str(),
                ts.end_str()
            ));
        }

        TimesheetCommand::Show { id, json } => match service.detailed_timesheet(*id)? {
            Some(detail) if *json => println!("{}", serde_json::to_string_pretty(&detail)?),
            Some(detail) => print_grid(&detail, &cfg.separator_char),
            None => not_found(*id),
        },

        TimesheetCommand::List {
            emp_number,
            from,
            to,
            default,
        } => {
            let from = parse_optional_date(from.as_ref())?;
            let to = parse_optional_date(to.as_ref())?;

            if *default {
                match service.default_timesheet(*emp_number, from, to)? {
                    Some(ts) => print_timesheet_line(&ts),
                    None => info(format!("No timesheet for employee {}", emp_number)),
                }
            } else {
                let list = service.list_timesheets(*emp_number, from, to)?;
                if list.is_empty() {
                    info(format!("No timesheets for employee {}", emp_number));
                }
                for ts in &list {
                    print_timesheet_line(ts);
                }
            }
        }

        TimesheetCommand::Actions { id } => match service.allowed_actions(*id)? {
            Some(actions) => {
                for a in actions {
                    println!("{:>2}  {}", a.code(), a);
                }
            }
            None => not_found(*id),
        },

        TimesheetCommand::Action {
            id,
            action,
            performed_by,
            comment,
        } => {
            let action =
                TimesheetAction::parse(action).ok_or_else(|| AppError::InvalidAction(action.clone()))?;
            match service.perform_action(*id, action, *performed_by, comment.as_deref())? {
                Some(ts) => success(format!("Timesheet #{} is now {}", ts.id, state_label(&ts))),
                None => not_found(*id),
            }
        }

        TimesheetCommand::History { id } => {
            if service.get_timesheet(*id)?.is_none() {
                not_found(*id);
                return Ok(());
            }
            for log in service.action_logs(*id)? {
                println!(
                    "{}  {:<8} by {:<5} {}",
                    log.date_time,
                    log.action.name(),
                    log.performed_by,
                    log.comment.unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

use crate::cli::parser::ReportCommand;
use crate::config::Config;
use crate::core::report::{EmployeeReport, TimesheetReport, employee_report, timesheet_report};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportFormat, export_rows};
use crate::models::report::{
    EmployeeReportFilter, IncludeTimesheets, ReportSortField, SortOrder, TimesheetReportFilter,
};
use crate::ui::messages::{header, info};
use crate::utils::date::parse_optional_date;
use crate::utils::path::expand_user_path;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_seconds, seconds_to_hours_label};
use serde::Serialize;

fn export_or_print<T: Serialize>(
    rows: &[T],
    format: &Option<ExportFormat>,
    file: &Option<String>,
    force: bool,
    print: impl FnOnce(),
) -> AppResult<()> {
    match (format, file) {
        (Some(fmt), Some(path)) => export_rows(rows, *fmt, &expand_user_path(path), force),
        _ => {
            print();
            Ok(())
        }
    }
}

fn print_timesheet_report(report: &TimesheetReport, separator: &str) {
    header("Timesheet report");

    if report.rows.is_empty() {
        info("No records found");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Employee", 10),
        Column::new("Date", 10),
        Column::new("Project", 10),
        Column::new("Activity", 10),
        Column::new("Hours", 6),
        Column::new("Comment", 10),
    ]);
    for r in &report.rows {
        table.add_row(vec![
            r.employee_name.clone(),
            r.date.clone(),
            r.project_name.clone(),
            r.activity_name.clone(),
            r.duration.clone(),
            r.comment.clone(),
        ]);
    }
    table.fit();
    print!("{}", table.render(separator));

    println!(
        "\n{} record(s), total {}h {:02}m ({} h)",
        report.meta.total, report.meta.sum.hours, report.meta.sum.minutes, report.meta.sum.label
    );
}

fn print_employee_report(report: &EmployeeReport, separator: &str) {
    header("Employee report");

    if report.rows.is_empty() {
        info("No records found");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Project", 10),
        Column::new("Activity", 10),
        Column::new("Customer", 10),
        Column::new("Time", 6),
    ]);
    for r in &report.rows {
        table.add_row(vec![
            r.project_name.clone(),
            r.activity_name.clone(),
            r.customer_name.clone(),
            format_seconds(r.total_duration),
        ]);
    }
    table.fit();
    print!("{}", table.render(separator));

    println!(
        "\n{} group(s), total {} ({} h)",
        report.total,
        format_seconds(report.total_duration),
        seconds_to_hours_label(report.total_duration)
    );
}

pub fn handle(cmd: &ReportCommand, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        ReportCommand::Timesheet {
            emp_numbers,
            project_id,
            activity_id,
            from,
            to,
            include,
            sort,
            desc,
            limit,
            offset,
            format,
            file,
            force,
        } => {
            let filter = TimesheetReportFilter {
                emp_numbers: emp_numbers.clone(),
                project_id: *project_id,
                activity_id: *activity_id,
                from_date: parse_optional_date(from.as_ref())?,
                to_date: parse_optional_date(to.as_ref())?,
                include: IncludeTimesheets::parse(include)?,
                sort_field: ReportSortField::parse(sort)?,
                sort_order: if *desc { SortOrder::Desc } else { SortOrder::Asc },
                limit: *limit,
                offset: *offset,
            };

            let report = timesheet_report(&pool.conn, &filter)?;
            export_or_print(&report.rows, format, file, *force, || {
                print_timesheet_report(&report, &cfg.separator_char)
            })?;
        }

        ReportCommand::Employee {
            emp_number,
            project_id,
            activity_id,
            from,
            to,
            include,
            limit,
            offset,
            format,
            file,
            force,
        } => {
            let filter = EmployeeReportFilter {
                emp_number: *emp_number,
                project_id: *project_id,
                activity_id: *activity_id,
                from_date: parse_optional_date(from.as_ref())?,
                to_date: parse_optional_date(to.as_ref())?,
                include: IncludeTimesheets::parse(include)?,
                limit: *limit,
                offset: *offset,
            };

            let report = employee_report(&pool.conn, &filter)?;
            export_or_print(&report.rows, format, file, *force, || {
                print_employee_report(&report, &cfg.separator_char)
            })?;
        }
    }

    Ok(())
}

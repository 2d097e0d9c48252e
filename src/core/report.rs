use crate::db::reports;
use crate::errors::AppResult;
use crate::models::report::{
    EmployeeReportFilter, EmployeeReportRow, ReportMeta, ReportRecord, ReportRow, ReportSum,
    TimesheetReportFilter,
};
use crate::utils::time::seconds_to_hours_label;
use rusqlite::Connection;
use serde::Serialize;

const PAST_EMPLOYEE_SUFFIX: &str = " (Past Employee)";

#[derive(Debug, Clone, Serialize)]
pub struct TimesheetReport {
    pub rows: Vec<ReportRow>,
    pub meta: ReportMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeReport {
    pub rows: Vec<EmployeeReportRow>,
    pub total: i64,
    pub total_duration: i64,
}

/// Display form of one report record.
pub fn normalize(record: ReportRecord) -> ReportRow {
    let mut employee_name = record.full_name;
    if record.terminated {
        employee_name.push_str(PAST_EMPLOYEE_SUFFIX);
    }

    ReportRow {
        employee_name,
        date: record.date.format("%Y-%m-%d").to_string(),
        project_name: record.project_name.unwrap_or_default(),
        activity_name: record.activity_name.unwrap_or_default(),
        duration: seconds_to_hours_label(record.duration.unwrap_or(0)),
        comment: record.comment.unwrap_or_default(),
    }
}

/// Total seconds → whole hours, remaining minutes and decimal hours.
/// 9000 → 2 h, 30 min, "2.50".
pub fn report_sum(total_seconds: i64) -> ReportSum {
    ReportSum {
        hours: total_seconds / 3600,
        minutes: (total_seconds / 60) % 60,
        label: seconds_to_hours_label(total_seconds),
    }
}

pub fn timesheet_report(conn: &Connection, filter: &TimesheetReportFilter) -> AppResult<TimesheetReport> {
    let rows = reports::timesheet_report_records(conn, filter)?
        .into_iter()
        .map(normalize)
        .collect();

    let meta = ReportMeta {
        total: reports::timesheet_report_count(conn, filter)?,
        sum: report_sum(reports::timesheet_report_total(conn, filter)?),
    };

    Ok(TimesheetReport { rows, meta })
}

pub fn employee_report(conn: &Connection, filter: &EmployeeReportFilter) -> AppResult<EmployeeReport> {
    Ok(EmployeeReport {
        rows: reports::employee_report_rows(conn, filter)?,
        total: reports::employee_report_count(conn, filter)?,
        total_duration: reports::employee_report_total(conn, filter)?,
    })
}

use crate::db::queries::parse_db_date;
use crate::errors::AppResult;
use crate::models::report::{
    EmployeeReportFilter, EmployeeReportRow, IncludeTimesheets, ReportRecord, TimesheetReportFilter,
};
use crate::models::timesheet::TimesheetState;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

const REPORT_FROM: &str = "
    FROM timesheet_items ti
    JOIN timesheets t ON t.id = ti.timesheet_id
    JOIN employees e ON e.emp_number = ti.emp_number
    LEFT JOIN projects p ON p.id = ti.project_id
    LEFT JOIN project_activities pa ON pa.id = ti.activity_id
    LEFT JOIN customers c ON c.id = p.customer_id";

/// WHERE clause under construction, with its positional arguments.
#[derive(Default)]
struct Conditions {
    parts: Vec<String>,
    args: Vec<Value>,
}

impl Conditions {
    fn push(&mut self, part: &str, arg: Value) {
        self.parts.push(part.to_string());
        self.args.push(arg);
    }

    fn common(
        &mut self,
        project_id: Option<i64>,
        activity_id: Option<i64>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        include: IncludeTimesheets,
    ) {
        if let Some(p) = project_id {
            self.push("ti.project_id = ?", Value::Integer(p));
        }
        if let Some(a) = activity_id {
            self.push("ti.activity_id = ?", Value::Integer(a));
        }
        if let Some(f) = from {
            self.push("ti.date >= ?", Value::Text(f.format("%Y-%m-%d").to_string()));
        }
        if let Some(t) = to {
            self.push("ti.date <= ?", Value::Text(t.format("%Y-%m-%d").to_string()));
        }
        if include == IncludeTimesheets::OnlyApproved {
            self.push(
                "t.state = ?",
                Value::Text(TimesheetState::Approved.to_db_str().to_string()),
            );
        }
    }

    fn sql(&self) -> String {
        if self.parts.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.parts.join(" AND "))
        }
    }
}

fn timesheet_conditions(filter: &TimesheetReportFilter) -> Conditions {
    let mut c = Conditions::default();

    if let Some(emps) = &filter.emp_numbers {
        if emps.is_empty() {
            // an explicit empty selection matches nobody
            c.parts.push("0".to_string());
        } else {
            c.parts
                .push(format!("ti.emp_number IN ({})", vec!["?"; emps.len()].join(",")));
            c.args.extend(emps.iter().map(|e| Value::Integer(*e)));
        }
    }

    c.common(
        filter.project_id,
        filter.activity_id,
        filter.from_date,
        filter.to_date,
        filter.include,
    );
    c
}

fn employee_conditions(filter: &EmployeeReportFilter) -> Conditions {
    let mut c = Conditions::default();
    c.push("ti.emp_number = ?", Value::Integer(filter.emp_number));
    c.common(
        filter.project_id,
        filter.activity_id,
        filter.from_date,
        filter.to_date,
        filter.include,
    );
    c
}

fn paging(limit: Option<i64>, offset: i64) -> String {
    match limit {
        Some(l) => format!(" LIMIT {} OFFSET {}", l.max(0), offset.max(0)),
        None if offset > 0 => format!(" LIMIT -1 OFFSET {}", offset),
        None => String::new(),
    }
}

// ------------------------------------------------
// Timesheet report
// ------------------------------------------------

pub fn timesheet_report_records(conn: &Connection, filter: &TimesheetReportFilter) -> AppResult<Vec<ReportRecord>> {
    let cond = timesheet_conditions(filter);
    let sql = format!(
        "SELECT e.first_name || ' ' || e.last_name AS full_name,
                e.termination_id AS termination_id,
                ti.date AS date,
                p.name AS project_name,
                pa.name AS activity_name,
                ti.duration AS duration,
                ti.comment AS comment
         {}{}
         ORDER BY {} {}, ti.id ASC{}",
        REPORT_FROM,
        cond.sql(),
        filter.sort_field.column(),
        filter.sort_order.sql(),
        paging(filter.limit, filter.offset)
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(cond.args), |row| {
        let termination: Option<i64> = row.get("termination_id")?;
        Ok(ReportRecord {
            full_name: row.get("full_name")?,
            terminated: termination.is_some(),
            date: parse_db_date(row, "date")?,
            project_name: row.get("project_name")?,
            activity_name: row.get("activity_name")?,
            duration: row.get("duration")?,
            comment: row.get("comment")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Number of items matching the filter, ignoring limit/offset.
pub fn timesheet_report_count(conn: &Connection, filter: &TimesheetReportFilter) -> AppResult<i64> {
    let cond = timesheet_conditions(filter);
    let sql = format!("SELECT COUNT(ti.id) {}{}", REPORT_FROM, cond.sql());
    Ok(conn.query_row(&sql, params_from_iter(cond.args), |row| row.get(0))?)
}

/// Summed duration in seconds of the items matching the filter.
pub fn timesheet_report_total(conn: &Connection, filter: &TimesheetReportFilter) -> AppResult<i64> {
    let cond = timesheet_conditions(filter);
    let sql = format!("SELECT COALESCE(SUM(ti.duration), 0) {}{}", REPORT_FROM, cond.sql());
    Ok(conn.query_row(&sql, params_from_iter(cond.args), |row| row.get(0))?)
}

// ------------------------------------------------
// Employee report
// ------------------------------------------------

const EMPLOYEE_GROUP_BY: &str = " GROUP BY p.name, pa.name, c.name";

pub fn employee_report_rows(conn: &Connection, filter: &EmployeeReportFilter) -> AppResult<Vec<EmployeeReportRow>> {
    let cond = employee_conditions(filter);
    let sql = format!(
        "SELECT p.name AS project_name,
                pa.name AS activity_name,
                c.name AS customer_name,
                COALESCE(SUM(ti.duration), 0) AS total_duration
         {}{}{}
         ORDER BY p.name ASC, pa.name ASC, c.name ASC{}",
        REPORT_FROM,
        cond.sql(),
        EMPLOYEE_GROUP_BY,
        paging(filter.limit, filter.offset)
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(cond.args), |row| {
        let project: Option<String> = row.get("project_name")?;
        let activity: Option<String> = row.get("activity_name")?;
        let customer: Option<String> = row.get("customer_name")?;
        Ok(EmployeeReportRow {
            project_name: project.unwrap_or_default(),
            activity_name: activity.unwrap_or_default(),
            customer_name: customer.unwrap_or_default(),
            total_duration: row.get("total_duration")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Number of (project, activity, customer) groups.
pub fn employee_report_count(conn: &Connection, filter: &EmployeeReportFilter) -> AppResult<i64> {
    let cond = employee_conditions(filter);
    let sql = format!(
        "SELECT COUNT(*) FROM (SELECT 1 {}{}{})",
        REPORT_FROM,
        cond.sql(),
        EMPLOYEE_GROUP_BY
    );
    Ok(conn.query_row(&sql, params_from_iter(cond.args), |row| row.get(0))?)
}

pub fn employee_report_total(conn: &Connection, filter: &EmployeeReportFilter) -> AppResult<i64> {
    let cond = employee_conditions(filter);
    let sql = format!("SELECT COALESCE(SUM(ti.duration), 0) {}{}", REPORT_FROM, cond.sql());
    Ok(conn.query_row(&sql, params_from_iter(cond.args), |row| row.get(0))?)
}

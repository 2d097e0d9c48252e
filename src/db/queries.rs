use crate::errors::{AppError, AppResult};
use crate::models::item::{CompositeKey, TimesheetItem};
use crate::models::project::Employee;
use crate::models::timesheet::{Timesheet, TimesheetAction, TimesheetActionLog, TimesheetState};
use chrono::{Local, NaiveDate};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};
use std::collections::HashMap;

const ITEM_COLUMNS: &str =
    "ti.id, ti.timesheet_id, ti.emp_number, ti.project_id, ti.activity_id, ti.date, ti.duration, ti.comment";

fn date_to_db(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub(crate) fn parse_db_date(row: &Row, column: &str) -> Result<NaiveDate> {
    let raw: String = row.get(column)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| conversion_error(0, AppError::InvalidDate(raw)))
}

pub fn map_item(row: &Row) -> Result<TimesheetItem> {
    Ok(TimesheetItem {
        id: row.get("id")?,
        timesheet_id: row.get("timesheet_id")?,
        emp_number: row.get("emp_number")?,
        project_id: row.get("project_id")?,
        activity_id: row.get("activity_id")?,
        date: parse_db_date(row, "date")?,
        duration: row.get("duration")?,
        comment: row.get("comment")?,
    })
}

pub fn map_timesheet(row: &Row) -> Result<Timesheet> {
    let state_str: String = row.get("state")?;
    let state = TimesheetState::from_db_str(&state_str)
        .ok_or_else(|| conversion_error(0, AppError::Other(format!("Invalid state: {}", state_str))))?;

    Ok(Timesheet {
        id: row.get("id")?,
        emp_number: row.get("emp_number")?,
        state,
        start_date: parse_db_date(row, "start_date")?,
        end_date: parse_db_date(row, "end_date")?,
    })
}

// ------------------------------------------------
// Catalog: employees, customers, projects, activities
// ------------------------------------------------

pub fn insert_employee(conn: &Connection, first_name: &str, last_name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (first_name, last_name) VALUES (?1, ?2)",
        params![first_name, last_name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn terminate_employee(conn: &Connection, emp_number: i64, termination_id: i64) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE employees SET termination_id = ?1 WHERE emp_number = ?2",
        params![termination_id, emp_number],
    )?;
    if n == 0 {
        return Err(AppError::UnknownEmployee(emp_number));
    }
    Ok(())
}

pub fn find_employee(conn: &Connection, emp_number: i64) -> AppResult<Option<Employee>> {
    let emp = conn
        .query_row(
            "SELECT emp_number, first_name, last_name, termination_id
             FROM employees WHERE emp_number = ?1",
            [emp_number],
            |row| {
                Ok(Employee {
                    emp_number: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    termination_id: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(emp)
}

pub fn insert_customer(conn: &Connection, name: &str) -> AppResult<i64> {
    conn.execute("INSERT INTO customers (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

pub fn find_customer_by_name(conn: &Connection, name: &str) -> AppResult<Option<i64>> {
    Ok(conn
        .query_row("SELECT id FROM customers WHERE name = ?1", [name], |row| row.get(0))
        .optional()?)
}

pub fn insert_project(conn: &Connection, name: &str, customer_id: Option<i64>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO projects (name, customer_id) VALUES (?1, ?2)",
        params![name, customer_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_activity(conn: &Connection, project_id: i64, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO project_activities (project_id, name) VALUES (?1, ?2)",
        params![project_id, name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Owning project of each known activity, keyed by activity id.
/// Unknown activities are simply absent from the map.
pub fn activity_projects(conn: &Connection, activity_ids: &[i64]) -> AppResult<HashMap<i64, i64>> {
    if activity_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; activity_ids.len()].join(",");
    let sql = format!(
        "SELECT id, project_id FROM project_activities WHERE id IN ({})",
        placeholders
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(activity_ids.iter()), |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut out = HashMap::new();
    for r in rows {
        let (activity, project) = r?;
        out.insert(activity, project);
    }
    Ok(out)
}

// ------------------------------------------------
// Timesheets
// ------------------------------------------------

pub fn get_timesheet_by_id(conn: &Connection, id: i64) -> AppResult<Option<Timesheet>> {
    let ts = conn
        .query_row(
            "SELECT id, emp_number, state, start_date, end_date FROM timesheets WHERE id = ?1",
            [id],
            map_timesheet,
        )
        .optional()?;
    Ok(ts)
}

pub fn insert_timesheet(conn: &Connection, ts: &Timesheet) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO timesheets (emp_number, state, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            ts.emp_number,
            ts.state.to_db_str(),
            ts.start_str(),
            ts.end_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_timesheet_state(conn: &Connection, id: i64, state: TimesheetState) -> AppResult<()> {
    conn.execute(
        "UPDATE timesheets SET state = ?1 WHERE id = ?2",
        params![state.to_db_str(), id],
    )?;
    Ok(())
}

pub fn has_timesheet_for_start_date(conn: &Connection, emp_number: i64, start: &NaiveDate) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM timesheets WHERE emp_number = ?1 AND start_date = ?2 LIMIT 1",
    )?;
    Ok(stmt.exists(params![emp_number, date_to_db(start)])?)
}

/// Timesheets of one employee, optionally limited to start dates within
/// `from..=to` (the range applies only when both bounds are given).
pub fn list_timesheets(
    conn: &Connection,
    emp_number: i64,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> AppResult<Vec<Timesheet>> {
    let mut sql = String::from(
        "SELECT id, emp_number, state, start_date, end_date FROM timesheets WHERE emp_number = ?",
    );
    let mut args: Vec<Value> = vec![Value::Integer(emp_number)];

    if let (Some(f), Some(t)) = (from, to) {
        sql.push_str(" AND start_date BETWEEN ? AND ?");
        args.push(Value::Text(date_to_db(&f)));
        args.push(Value::Text(date_to_db(&t)));
    }
    sql.push_str(" ORDER BY start_date ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_timesheet)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The timesheet for exactly `from..to` when both are given, otherwise the
/// most recent timesheet of the employee.
pub fn default_timesheet(
    conn: &Connection,
    emp_number: i64,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> AppResult<Option<Timesheet>> {
    let ts = match (from, to) {
        (Some(f), Some(t)) => conn
            .query_row(
                "SELECT id, emp_number, state, start_date, end_date FROM timesheets
                 WHERE emp_number = ?1 AND start_date = ?2 AND end_date = ?3",
                params![emp_number, date_to_db(&f), date_to_db(&t)],
                map_timesheet,
            )
            .optional()?,
        _ => conn
            .query_row(
                "SELECT id, emp_number, state, start_date, end_date FROM timesheets
                 WHERE emp_number = ?1
                 ORDER BY start_date DESC LIMIT 1",
                [emp_number],
                map_timesheet,
            )
            .optional()?,
    };
    Ok(ts)
}

// ------------------------------------------------
// Action logs
// ------------------------------------------------

pub fn insert_action_log(
    conn: &Connection,
    timesheet_id: i64,
    action: TimesheetAction,
    comment: Option<&str>,
    performed_by: i64,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO timesheet_action_logs (timesheet_id, action, comment, performed_by, date_time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            timesheet_id,
            action.name(),
            comment,
            performed_by,
            Local::now().to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn action_logs(conn: &Connection, timesheet_id: i64) -> AppResult<Vec<TimesheetActionLog>> {
    let mut stmt = conn.prepare(
        "SELECT id, timesheet_id, action, comment, performed_by, date_time
         FROM timesheet_action_logs
         WHERE timesheet_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([timesheet_id], |row| {
        let action_str: String = row.get(2)?;
        let action = TimesheetAction::parse(&action_str)
            .ok_or_else(|| conversion_error(2, AppError::InvalidAction(action_str.clone())))?;
        Ok(TimesheetActionLog {
            id: row.get(0)?,
            timesheet_id: row.get(1)?,
            action,
            comment: row.get(3)?,
            performed_by: row.get(4)?,
            date_time: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ------------------------------------------------
// Timesheet items
// ------------------------------------------------

pub fn items_by_timesheet_id(conn: &Connection, timesheet_id: i64) -> AppResult<Vec<TimesheetItem>> {
    let sql = format!(
        "SELECT {} FROM timesheet_items ti WHERE ti.timesheet_id = ?1 ORDER BY ti.id ASC",
        ITEM_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([timesheet_id], map_item)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Items of a timesheet together with their project and activity names.
pub fn items_with_names(conn: &Connection, timesheet_id: i64) -> AppResult<Vec<(TimesheetItem, String, String)>> {
    let sql = format!(
        "SELECT {}, p.name AS project_name, pa.name AS activity_name
         FROM timesheet_items ti
         LEFT JOIN projects p ON p.id = ti.project_id
         LEFT JOIN project_activities pa ON pa.id = ti.activity_id
         WHERE ti.timesheet_id = ?1
         ORDER BY ti.id ASC",
        ITEM_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([timesheet_id], |row| {
        let item = map_item(row)?;
        let project: Option<String> = row.get("project_name")?;
        let activity: Option<String> = row.get("activity_name")?;
        Ok((item, project.unwrap_or_default(), activity.unwrap_or_default()))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn item_by_id(conn: &Connection, item_id: i64) -> AppResult<Option<TimesheetItem>> {
    let sql = format!("SELECT {} FROM timesheet_items ti WHERE ti.id = ?1", ITEM_COLUMNS);
    Ok(conn.query_row(&sql, [item_id], map_item).optional()?)
}

pub fn item_by_timesheet_and_id(conn: &Connection, timesheet_id: i64, item_id: i64) -> AppResult<Option<TimesheetItem>> {
    let sql = format!(
        "SELECT {} FROM timesheet_items ti WHERE ti.id = ?1 AND ti.timesheet_id = ?2",
        ITEM_COLUMNS
    );
    Ok(conn
        .query_row(&sql, params![item_id, timesheet_id], map_item)
        .optional()?)
}

pub fn item_by_composite_key(conn: &Connection, key: &CompositeKey) -> AppResult<Option<TimesheetItem>> {
    let sql = format!(
        "SELECT {} FROM timesheet_items ti
         WHERE ti.timesheet_id = ?1 AND ti.project_id = ?2 AND ti.activity_id = ?3 AND ti.date = ?4
         ORDER BY ti.id ASC LIMIT 1",
        ITEM_COLUMNS
    );
    Ok(conn
        .query_row(
            &sql,
            params![key.timesheet_id, key.project_id, key.activity_id, date_to_db(&key.date)],
            map_item,
        )
        .optional()?)
}

/// One query returning every item of the timesheet that matches one of the
/// given ids or one of the (project, activity, date) combinations,
/// ordered by id.
pub fn find_items_by_ids_or_composite_keys(
    conn: &Connection,
    timesheet_id: i64,
    ids: &[i64],
    composites: &[CompositeKey],
) -> AppResult<Vec<TimesheetItem>> {
    if ids.is_empty() && composites.is_empty() {
        return Ok(Vec::new());
    }

    let mut conditions: Vec<String> = Vec::new();
    let mut args: Vec<Value> = vec![Value::Integer(timesheet_id)];

    if !ids.is_empty() {
        conditions.push(format!("ti.id IN ({})", vec!["?"; ids.len()].join(",")));
        args.extend(ids.iter().map(|id| Value::Integer(*id)));
    }

    for key in composites {
        conditions.push("(ti.project_id = ? AND ti.activity_id = ? AND ti.date = ?)".to_string());
        args.push(Value::Integer(key.project_id));
        args.push(Value::Integer(key.activity_id));
        args.push(Value::Text(date_to_db(&key.date)));
    }

    let sql = format!(
        "SELECT {} FROM timesheet_items ti
         WHERE ti.timesheet_id = ? AND ({})
         ORDER BY ti.id ASC",
        ITEM_COLUMNS,
        conditions.join(" OR ")
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_item)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_item(conn: &Connection, item: &TimesheetItem) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO timesheet_items
            (timesheet_id, emp_number, project_id, activity_id, date, duration, comment)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    stmt.execute(params![
        item.timesheet_id,
        item.emp_number,
        item.project_id,
        item.activity_id,
        item.date_str(),
        item.duration,
        item.comment,
    ])?;
    Ok(conn.last_insert_rowid())
}

/// Update the mutable fields of a stored item.
pub fn update_item(conn: &Connection, item: &TimesheetItem) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "UPDATE timesheet_items SET duration = ?1, comment = ?2 WHERE id = ?3",
    )?;
    stmt.execute(params![item.duration, item.comment, item.id])?;
    Ok(())
}

pub fn delete_items(conn: &Connection, timesheet_id: i64, ids: &[i64]) -> AppResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let sql = format!(
        "DELETE FROM timesheet_items WHERE timesheet_id = ? AND id IN ({})",
        vec!["?"; ids.len()].join(",")
    );
    let mut args: Vec<Value> = vec![Value::Integer(timesheet_id)];
    args.extend(ids.iter().map(|id| Value::Integer(*id)));

    Ok(conn.execute(&sql, params_from_iter(args))?)
}

/// Whether the timesheet already has any item for the project/activity pair.
pub fn is_duplicate_item(conn: &Connection, timesheet_id: i64, activity_id: i64, project_id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM timesheet_items
         WHERE timesheet_id = ?1 AND project_id = ?2 AND activity_id = ?3
         LIMIT 1",
    )?;
    Ok(stmt.exists(params![timesheet_id, project_id, activity_id])?)
}

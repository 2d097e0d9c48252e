use crate::core::entries::{extract_entry_ids, validate_deleted_entries};
use crate::core::reconcile::{ReconcileOutcome, Reconciler};
use crate::core::workflow;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::db::store::{ItemStore, SqliteItemStore};
use crate::errors::{AppError, AppResult};
use crate::models::grid::{DetailedTimesheet, TimesheetGrid};
use crate::models::item::{CompositeKey, TimesheetItem};
use crate::models::row::SubmittedRow;
use crate::models::timesheet::{Timesheet, TimesheetAction, TimesheetActionLog, TimesheetState};
use crate::utils::date::{date_range, week_boundary};
use chrono::NaiveDate;
use rusqlite::TransactionBehavior;
use serde_json::Value;

/// Timesheet operations over one database, with the configured first day of
/// the week.
pub struct TimesheetService<'p> {
    pool: &'p mut DbPool,
    week_start: u32,
}

impl<'p> TimesheetService<'p> {
    pub fn new(pool: &'p mut DbPool, week_start: u32) -> Self {
        Self { pool, week_start }
    }

    /// Natural key of an item rendered as `timesheet_project_activity_Y_m_d`.
    pub fn generate_item_key(timesheet_id: i64, project_id: i64, activity_id: i64, date: NaiveDate) -> String {
        CompositeKey {
            timesheet_id,
            project_id,
            activity_id,
            date,
        }
        .to_string()
    }

    /// Week containing `date`, e.g. with Monday first: 2021-12-15 → (2021-12-13, 2021-12-19).
    pub fn extract_start_and_end_date(&self, date: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
        week_boundary(date, self.week_start)
    }

    pub fn get_timesheet(&self, id: i64) -> AppResult<Option<Timesheet>> {
        queries::get_timesheet_by_id(&self.pool.conn, id)
    }

    pub fn has_timesheet_for_date(&self, emp_number: i64, date: NaiveDate) -> AppResult<bool> {
        let (start, _) = self.extract_start_and_end_date(date)?;
        queries::has_timesheet_for_start_date(&self.pool.conn, emp_number, &start)
    }

    /// Create the timesheet of the week containing `date`.
    pub fn create_timesheet_by_date(&mut self, emp_number: i64, date: NaiveDate) -> AppResult<Timesheet> {
        let state = workflow::next_state(TimesheetState::Initial, TimesheetAction::Create)?;
        let (start_date, end_date) = self.extract_start_and_end_date(date)?;

        let tx = self.pool.conn.transaction()?;

        if queries::find_employee(&tx, emp_number)?.is_none() {
            return Err(AppError::UnknownEmployee(emp_number));
        }

        if queries::has_timesheet_for_start_date(&tx, emp_number, &start_date)? {
            return Err(AppError::TimesheetExists {
                emp_number,
                start_date: start_date.format("%Y-%m-%d").to_string(),
            });
        }

        let mut timesheet = Timesheet {
            id: 0,
            emp_number,
            state,
            start_date,
            end_date,
        };
        timesheet.id = queries::insert_timesheet(&tx, &timesheet)?;

        queries::insert_action_log(&tx, timesheet.id, TimesheetAction::Create, None, emp_number)?;
        ttlog(
            &tx,
            "create",
            &format!("timesheet {}", timesheet.id),
            &format!(
                "Timesheet {}..{} created for employee {}",
                timesheet.start_str(),
                timesheet.end_str(),
                emp_number
            ),
        )?;

        tx.commit()?;
        Ok(timesheet)
    }

    /// Week grid of the timesheet, or `None` when it does not exist.
    pub fn detailed_timesheet(&self, id: i64) -> AppResult<Option<DetailedTimesheet>> {
        let Some(timesheet) = self.get_timesheet(id)? else {
            return Ok(None);
        };

        let dates = date_range(timesheet.start_date, timesheet.end_date);
        let mut grid = TimesheetGrid::new(&dates);

        for (item, project_name, activity_name) in queries::items_with_names(&self.pool.conn, id)? {
            grid.append(item, &project_name, &activity_name);
        }

        Ok(Some(DetailedTimesheet::new(timesheet, grid)))
    }

    /// Reconcile submitted rows into the timesheet. The lookup and every
    /// write run in one IMMEDIATE transaction; any error rolls it all back.
    /// Returns `None` when the timesheet does not exist.
    pub fn save_rows(&mut self, id: i64, rows: &[SubmittedRow]) -> AppResult<Option<ReconcileOutcome>> {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(timesheet) = queries::get_timesheet_by_id(&tx, id)? else {
            return Ok(None);
        };

        let outcome = {
            let mut store = SqliteItemStore::new(&tx);
            Reconciler::new(&mut store).reconcile(&timesheet, rows)?
        };

        ttlog(
            &tx,
            "save",
            &format!("timesheet {}", id),
            &format!(
                "{} item(s) inserted, {} updated",
                outcome.inserted, outcome.updated
            ),
        )?;

        tx.commit()?;
        Ok(Some(outcome))
    }

    /// Delete the items listed in a deleted-entries parameter
    /// (`[1, "2", {"id": 3}]`). Returns the number of deleted items.
    pub fn delete_rows(&mut self, id: i64, entries: &Value) -> AppResult<usize> {
        if !validate_deleted_entries(entries) {
            return Err(AppError::InvalidEntries(entries.to_string()));
        }

        let ids = extract_entry_ids(entries);
        if ids.is_empty() {
            return Ok(0);
        }

        let tx = self.pool.conn.transaction()?;
        let deleted = queries::delete_items(&tx, id, &ids)?;
        ttlog(
            &tx,
            "del",
            &format!("timesheet {}", id),
            &format!("{} item(s) deleted", deleted),
        )?;
        tx.commit()?;

        Ok(deleted)
    }

    /// Apply a workflow action and record it in the action log.
    /// Returns `None` when the timesheet does not exist.
    pub fn perform_action(
        &mut self,
        id: i64,
        action: TimesheetAction,
        performed_by: i64,
        comment: Option<&str>,
    ) -> AppResult<Option<Timesheet>> {
        let tx = self.pool.conn.transaction()?;

        let Some(mut timesheet) = queries::get_timesheet_by_id(&tx, id)? else {
            return Ok(None);
        };

        let next = workflow::next_state(timesheet.state, action)?;
        if next != timesheet.state {
            queries::update_timesheet_state(&tx, id, next)?;
        }
        queries::insert_action_log(&tx, id, action, comment, performed_by)?;
        ttlog(
            &tx,
            "action",
            &format!("timesheet {}", id),
            &format!("{}: {} → {}", action, timesheet.state, next),
        )?;

        tx.commit()?;

        timesheet.state = next;
        Ok(Some(timesheet))
    }

    pub fn allowed_actions(&self, id: i64) -> AppResult<Option<Vec<TimesheetAction>>> {
        Ok(self
            .get_timesheet(id)?
            .map(|ts| workflow::allowed_actions(ts.state)))
    }

    pub fn action_logs(&self, id: i64) -> AppResult<Vec<TimesheetActionLog>> {
        queries::action_logs(&self.pool.conn, id)
    }

    pub fn list_timesheets(
        &self,
        emp_number: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<Timesheet>> {
        queries::list_timesheets(&self.pool.conn, emp_number, from, to)
    }

    pub fn default_timesheet(
        &self,
        emp_number: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Option<Timesheet>> {
        queries::default_timesheet(&self.pool.conn, emp_number, from, to)
    }

    /// Item `item_id` if it belongs to timesheet `timesheet_id`.
    pub fn item_by_id(&self, timesheet_id: i64, item_id: i64) -> AppResult<Option<TimesheetItem>> {
        let store = SqliteItemStore::new(&self.pool.conn);
        Ok(store
            .find_by_id(item_id)?
            .filter(|item| item.timesheet_id == timesheet_id))
    }

    pub fn item_by_key(
        &self,
        timesheet_id: i64,
        project_id: i64,
        activity_id: i64,
        date: NaiveDate,
    ) -> AppResult<Option<TimesheetItem>> {
        let key = CompositeKey {
            timesheet_id,
            project_id,
            activity_id,
            date,
        };
        queries::item_by_composite_key(&self.pool.conn, &key)
    }

    pub fn is_duplicate_item(&self, timesheet_id: i64, activity_id: i64, project_id: i64) -> AppResult<bool> {
        queries::is_duplicate_item(&self.pool.conn, timesheet_id, activity_id, project_id)
    }
}

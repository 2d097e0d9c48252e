//! Persistence seam used by the reconciler.

use crate::db::queries;
use crate::errors::AppResult;
use crate::models::item::{CompositeKey, TimesheetItem};
use rusqlite::Connection;
use std::collections::HashMap;

/// Storage operations the reconciler depends on.
///
/// `persist` only queues an item; nothing is written before `flush`.
pub trait ItemStore {
    fn find_by_id(&self, id: i64) -> AppResult<Option<TimesheetItem>>;

    /// Items of `timesheet_id` matching any of `ids` or any composite key,
    /// ordered by id.
    fn find_many_by_ids_or_composite_keys(
        &self,
        timesheet_id: i64,
        ids: &[i64],
        composites: &[CompositeKey],
    ) -> AppResult<Vec<TimesheetItem>>;

    /// Owning project of each activity; unknown activities are absent.
    fn activity_projects(&self, activity_ids: &[i64]) -> AppResult<HashMap<i64, i64>>;

    fn persist(&mut self, item: TimesheetItem);

    /// Write every queued item and return them with their ids assigned,
    /// in the order they were persisted.
    fn flush(&mut self) -> AppResult<Vec<TimesheetItem>>;
}

/// SQLite implementation. Open it on a transaction (a `Transaction` derefs to
/// `Connection`) so that the fetch and the writes commit or roll back together.
pub struct SqliteItemStore<'c> {
    conn: &'c Connection,
    pending: Vec<TimesheetItem>,
}

impl<'c> SqliteItemStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            pending: Vec::new(),
        }
    }
}

impl ItemStore for SqliteItemStore<'_> {
    fn find_by_id(&self, id: i64) -> AppResult<Option<TimesheetItem>> {
        queries::item_by_id(self.conn, id)
    }

    fn find_many_by_ids_or_composite_keys(
        &self,
        timesheet_id: i64,
        ids: &[i64],
        composites: &[CompositeKey],
    ) -> AppResult<Vec<TimesheetItem>> {
        queries::find_items_by_ids_or_composite_keys(self.conn, timesheet_id, ids, composites)
    }

    fn activity_projects(&self, activity_ids: &[i64]) -> AppResult<HashMap<i64, i64>> {
        queries::activity_projects(self.conn, activity_ids)
    }

    fn persist(&mut self, item: TimesheetItem) {
        self.pending.push(item);
    }

    fn flush(&mut self) -> AppResult<Vec<TimesheetItem>> {
        let mut written = Vec::with_capacity(self.pending.len());
        for mut item in self.pending.drain(..) {
            if item.is_new() {
                item.id = queries::insert_item(self.conn, &item)?;
            } else {
                queries::update_item(self.conn, &item)?;
            }
            written.push(item);
        }
        Ok(written)
    }
}

//! Week grid view of a timesheet: one column per day, one row per
//! (project, activity) bucket.

use super::item::TimesheetItem;
use super::timesheet::Timesheet;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct TimesheetColumn {
    pub date: NaiveDate,
    pub total: i64, // seconds
}

#[derive(Debug, Clone, Serialize)]
pub struct TimesheetRow {
    pub project_id: i64,
    pub activity_id: i64,
    pub project_name: String,
    pub activity_name: String,
    pub dates: BTreeMap<NaiveDate, TimesheetItem>,
    pub total: i64, // seconds
}

impl TimesheetRow {
    /// Opens a row holding its first item.
    fn with_item(item: TimesheetItem, project_name: &str, activity_name: &str) -> Self {
        Self {
            project_id: item.project_id,
            activity_id: item.activity_id,
            project_name: project_name.to_string(),
            activity_name: activity_name.to_string(),
            total: item.duration.unwrap_or(0),
            dates: BTreeMap::from([(item.date, item)]),
        }
    }

    pub fn has_date(&self, date: &NaiveDate) -> bool {
        self.dates.contains_key(date)
    }

    /// Places the item in its date cell. A row holds one item per date, so an
    /// occupied cell hands the item back.
    fn put(&mut self, item: TimesheetItem) -> Result<(), TimesheetItem> {
        if self.has_date(&item.date) {
            return Err(item);
        }
        if let Some(d) = item.duration {
            self.total += d;
        }
        self.dates.insert(item.date, item);
        Ok(())
    }
}

/// Rows and columns of one timesheet week.
#[derive(Debug, Clone, Default)]
pub struct TimesheetGrid {
    rows: Vec<TimesheetRow>,
    columns: BTreeMap<NaiveDate, TimesheetColumn>,
}

impl TimesheetGrid {
    pub fn new(dates: &[NaiveDate]) -> Self {
        let columns = dates
            .iter()
            .map(|d| (*d, TimesheetColumn { date: *d, total: 0 }))
            .collect();
        Self {
            rows: Vec::new(),
            columns,
        }
    }

    /// Appends an item to the first row of its (project, activity) pair whose
    /// date cell is still free, opening a new row for the pair otherwise.
    /// Several items for the same pair and date therefore land in rows
    /// `pair`, `pair_1`, `pair_2`, ...
    ///
    /// Returns the index of the row that received the item.
    pub fn append(&mut self, item: TimesheetItem, project_name: &str, activity_name: &str) -> usize {
        if let Some(d) = item.duration
            && let Some(col) = self.columns.get_mut(&item.date)
        {
            col.total += d;
        }

        let mut pending = item;
        for (idx, row) in self.rows.iter_mut().enumerate() {
            if row.project_id != pending.project_id || row.activity_id != pending.activity_id {
                continue;
            }
            match row.put(pending) {
                Ok(()) => return idx,
                Err(back) => pending = back,
            }
        }

        self.rows
            .push(TimesheetRow::with_item(pending, project_name, activity_name));
        self.rows.len() - 1
    }

    pub fn rows(&self) -> &[TimesheetRow] {
        &self.rows
    }

    pub fn columns(&self) -> impl Iterator<Item = &TimesheetColumn> {
        self.columns.values()
    }

    pub fn total(&self) -> i64 {
        self.rows.iter().map(|r| r.total).sum()
    }

    pub fn into_parts(self) -> (Vec<TimesheetRow>, Vec<TimesheetColumn>) {
        (self.rows, self.columns.into_values().collect())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedTimesheet {
    pub timesheet: Timesheet,
    pub rows: Vec<TimesheetRow>,
    pub columns: Vec<TimesheetColumn>,
}

impl DetailedTimesheet {
    pub fn new(timesheet: Timesheet, grid: TimesheetGrid) -> Self {
        let (rows, columns) = grid.into_parts();
        Self {
            timesheet,
            rows,
            columns,
        }
    }

    pub fn total(&self) -> i64 {
        self.rows.iter().map(|r| r.total).sum()
    }
}

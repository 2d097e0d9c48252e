use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Natural identity of a timesheet item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CompositeKey {
    pub timesheet_id: i64,
    pub project_id: i64,
    pub activity_id: i64,
    pub date: NaiveDate,
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.timesheet_id,
            self.project_id,
            self.activity_id,
            self.date.format("%Y_%m_%d")
        )
    }
}

/// Key used to look a submitted cell up among stored items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKey {
    Id(i64),
    Composite(CompositeKey),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "id_{}", id),
            LookupKey::Composite(key) => key.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimesheetItem {
    pub id: i64, // 0 until stored
    pub timesheet_id: i64,
    pub emp_number: i64,
    pub project_id: i64,
    pub activity_id: i64,
    pub date: NaiveDate,
    pub duration: Option<i64>, // seconds
    pub comment: Option<String>,
}

impl TimesheetItem {
    pub fn new(
        timesheet_id: i64,
        emp_number: i64,
        project_id: i64,
        activity_id: i64,
        date: NaiveDate,
        duration: i64,
    ) -> Self {
        Self {
            id: 0,
            timesheet_id,
            emp_number,
            project_id,
            activity_id,
            date,
            duration: Some(duration),
            comment: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn composite_key(&self) -> CompositeKey {
        CompositeKey {
            timesheet_id: self.timesheet_id,
            project_id: self.project_id,
            activity_id: self.activity_id,
            date: self.date,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

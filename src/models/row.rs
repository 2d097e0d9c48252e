//! Rows submitted by a client for a timesheet.
//! They are never stored as-is: the reconciler decomposes each row into one
//! item upsert per date cell.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRow {
    pub project_id: Option<i64>,
    pub activity_id: Option<i64>,
    pub dates: Option<BTreeMap<String, DateCell>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateCell {
    /// Time of day ("HH:MM" or "HH:MM:SS") read as a duration since midnight.
    pub duration: Option<String>,
    /// Stored item id; anything that is not a positive number is ignored.
    pub id: Option<Value>,
    pub comment: Option<String>,
}

impl SubmittedRow {
    pub fn new(project_id: i64, activity_id: i64) -> Self {
        Self {
            project_id: Some(project_id),
            activity_id: Some(activity_id),
            dates: Some(BTreeMap::new()),
        }
    }

    /// Builder used by callers assembling rows in code rather than from JSON.
    pub fn with_cell(mut self, date: &str, cell: DateCell) -> Self {
        self.dates
            .get_or_insert_with(BTreeMap::new)
            .insert(date.to_string(), cell);
        self
    }

    /// Parse a JSON array of rows.
    pub fn parse_list(json: &str) -> serde_json::Result<Vec<SubmittedRow>> {
        serde_json::from_str(json)
    }
}

impl DateCell {
    pub fn duration(duration: &str) -> Self {
        Self {
            duration: Some(duration.to_string()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(Value::from(id));
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}

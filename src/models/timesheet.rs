use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimesheetState {
    Initial,
    NotSubmitted,
    Submitted,
    Approved,
    Rejected,
}

impl TimesheetState {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TimesheetState::Initial => "INITIAL",
            TimesheetState::NotSubmitted => "NOT SUBMITTED",
            TimesheetState::Submitted => "SUBMITTED",
            TimesheetState::Approved => "APPROVED",
            TimesheetState::Rejected => "REJECTED",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "INITIAL" => Some(TimesheetState::Initial),
            "NOT SUBMITTED" => Some(TimesheetState::NotSubmitted),
            "SUBMITTED" => Some(TimesheetState::Submitted),
            "APPROVED" => Some(TimesheetState::Approved),
            "REJECTED" => Some(TimesheetState::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for TimesheetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// Workflow actions with their stable numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimesheetAction {
    View,
    Submit,
    Approve,
    Reject,
    Reset,
    Modify,
    Create,
}

impl TimesheetAction {
    pub const ALL: [TimesheetAction; 7] = [
        TimesheetAction::View,
        TimesheetAction::Submit,
        TimesheetAction::Approve,
        TimesheetAction::Reject,
        TimesheetAction::Reset,
        TimesheetAction::Modify,
        TimesheetAction::Create,
    ];

    pub fn code(&self) -> u8 {
        match self {
            TimesheetAction::View => 0,
            TimesheetAction::Submit => 1,
            TimesheetAction::Approve => 2,
            TimesheetAction::Reject => 3,
            TimesheetAction::Reset => 4,
            TimesheetAction::Modify => 5,
            TimesheetAction::Create => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimesheetAction::View => "VIEW",
            TimesheetAction::Submit => "SUBMIT",
            TimesheetAction::Approve => "APPROVE",
            TimesheetAction::Reject => "REJECT",
            TimesheetAction::Reset => "RESET",
            TimesheetAction::Modify => "MODIFY",
            TimesheetAction::Create => "CREATE",
        }
    }

    /// Accepts either the action name (any case) or its numeric code.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code);
        }
        let upper = trimmed.to_uppercase();
        Self::ALL.into_iter().find(|a| a.name() == upper)
    }
}

impl fmt::Display for TimesheetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Timesheet {
    pub id: i64,
    pub emp_number: i64,
    pub state: TimesheetState,
    pub start_date: NaiveDate, // ⇔ timesheets.start_date (TEXT "YYYY-MM-DD")
    pub end_date: NaiveDate,   // ⇔ timesheets.end_date
}

impl Timesheet {
    pub fn start_str(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimesheetActionLog {
    pub id: i64,
    pub timesheet_id: i64,
    pub action: TimesheetAction,
    pub comment: Option<String>,
    pub performed_by: i64,
    pub date_time: String,
}

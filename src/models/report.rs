use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;

/// Which timesheets contribute to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncludeTimesheets {
    OnlyApproved,
    #[default]
    All,
}

impl IncludeTimesheets {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "onlyApproved" => Ok(IncludeTimesheets::OnlyApproved),
            "all" => Ok(IncludeTimesheets::All),
            other => Err(AppError::Other(format!(
                "Invalid include value '{}': use 'onlyApproved' or 'all'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportSortField {
    #[default]
    EmployeeLastName,
    ItemDate,
    ProjectName,
    ActivityName,
}

impl ReportSortField {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "employee.lastName" => Ok(ReportSortField::EmployeeLastName),
            "timesheetItem.date" => Ok(ReportSortField::ItemDate),
            "project.name" => Ok(ReportSortField::ProjectName),
            "projectActivity.name" => Ok(ReportSortField::ActivityName),
            other => Err(AppError::Other(format!("Invalid sort field: {}", other))),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            ReportSortField::EmployeeLastName => "e.last_name",
            ReportSortField::ItemDate => "ti.date",
            ReportSortField::ProjectName => "p.name",
            ReportSortField::ActivityName => "pa.name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimesheetReportFilter {
    pub emp_numbers: Option<Vec<i64>>,
    pub project_id: Option<i64>,
    pub activity_id: Option<i64>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub include: IncludeTimesheets,
    pub sort_field: ReportSortField,
    pub sort_order: SortOrder,
    pub limit: Option<i64>,
    pub offset: i64,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeReportFilter {
    pub emp_number: i64,
    pub project_id: Option<i64>,
    pub activity_id: Option<i64>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub include: IncludeTimesheets,
    pub limit: Option<i64>,
    pub offset: i64,
}

/// One item as read by the report query, before normalization.
#[derive(Debug, Clone)]
pub struct ReportRecord {
    pub full_name: String,
    pub terminated: bool,
    pub date: NaiveDate,
    pub project_name: Option<String>,
    pub activity_name: Option<String>,
    pub duration: Option<i64>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub employee_name: String,
    pub date: String,
    pub project_name: String,
    pub activity_name: String,
    pub duration: String, // hours, 2 decimals
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSum {
    pub hours: i64,
    pub minutes: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    pub total: i64,
    pub sum: ReportSum,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeReportRow {
    pub project_name: String,
    pub activity_name: String,
    pub customer_name: String,
    pub total_duration: i64, // seconds
}

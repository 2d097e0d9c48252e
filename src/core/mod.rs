pub mod entries;
pub mod log;
pub mod reconcile;
pub mod report;
pub mod theme;
pub mod timesheet;
pub mod workflow;

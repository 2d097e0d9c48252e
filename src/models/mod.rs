pub mod grid;
pub mod item;
pub mod project;
pub mod report;
pub mod row;
pub mod theme;
pub mod timesheet;

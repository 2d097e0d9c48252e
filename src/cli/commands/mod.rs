pub mod config;
pub mod db;
pub mod delete_rows;
pub mod employee;
pub mod init;
pub mod log;
pub mod project;
pub mod report;
pub mod save;
pub mod theme;
pub mod timesheet;

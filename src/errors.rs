//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / shape errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid row: {0}")]
    Shape(String),

    #[error("Invalid deleted entries parameter: {0}")]
    InvalidEntries(String),

    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("{0}")]
    Consistency(String),

    #[error("Timesheet already exists for employee {emp_number} starting {start_date}")]
    TimesheetExists { emp_number: i64, start_date: String },

    #[error("Action {action} is not allowed in state {state}")]
    InvalidTransition { state: String, action: String },

    #[error("Unknown timesheet action: {0}")]
    InvalidAction(String),

    #[error("Unknown employee: {0}")]
    UnknownEmployee(i64),

    #[error("Theme not found: {0}")]
    ThemeNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

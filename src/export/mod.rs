// src/export/mod.rs

mod fs_utils;
mod json_csv;

use crate::errors::AppResult;
use crate::ui::messages::success;
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write report rows to `path` in `format`. An existing file is only
/// overwritten with `force` or after confirmation.
pub fn export_rows<T: Serialize>(rows: &[T], format: ExportFormat, path: &Path, force: bool) -> AppResult<()> {
    fs_utils::ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => json_csv::export_csv(rows, path),
        ExportFormat::Json => json_csv::export_json(rows, path),
    }
}

/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Returns GREY for empty cells ("" or "--:--"), RESET otherwise.
pub fn color_for_cell(value: &str) -> &'static str {
    if value.trim().is_empty() || value.trim() == "--:--" {
        GREY
    } else {
        RESET
    }
}

/// Color a workflow state label.
pub fn color_for_state(state: &str) -> &'static str {
    match state {
        "APPROVED" => GREEN,
        "REJECTED" => RED,
        "SUBMITTED" => YELLOW,
        "NOT SUBMITTED" => CYAN,
        _ => RESET,
    }
}

use crate::db::log::ttlog;
use crate::db::themes;
use crate::errors::{AppError, AppResult};
use crate::models::theme::{Theme, ThemeVariables};
use regex::Regex;
use rusqlite::Connection;

pub const THEME_CACHE_KEY: &str = "admin.theme";
const DEFAULT_THEME: &str = "default";
const CUSTOM_THEME: &str = "custom";

/// What `theme check` shows for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSummary {
    pub theme_id: i64,
    pub theme_name: String,
    pub primary_color: Option<String>,
    pub primary_gradient_end_color: Option<String>,
}

impl From<&Theme> for ThemeSummary {
    fn from(theme: &Theme) -> Self {
        Self {
            theme_id: theme.theme_id,
            theme_name: theme.theme_name.clone(),
            primary_color: theme.variable("primaryColor"),
            primary_gradient_end_color: theme.variable("primaryGradientEndColor"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeUpdate {
    pub variables: ThemeVariables,
    pub custom_updated: bool,
    pub cache_entries_cleared: usize,
}

pub fn validate_color(value: &str) -> AppResult<()> {
    let re = Regex::new(r"^#[0-9A-Fa-f]{6}$").map_err(|e| AppError::Other(e.to_string()))?;
    if re.is_match(value) {
        Ok(())
    } else {
        Err(AppError::InvalidColor(value.to_string()))
    }
}

pub fn validate_variables(vars: &ThemeVariables) -> AppResult<()> {
    for color in [
        &vars.primary_color,
        &vars.primary_font_color,
        &vars.secondary_color,
        &vars.secondary_font_color,
        &vars.primary_gradient_start_color,
        &vars.primary_gradient_end_color,
    ] {
        validate_color(color)?;
    }
    Ok(())
}

pub fn check(conn: &Connection) -> AppResult<Vec<ThemeSummary>> {
    Ok(themes::list_themes(conn)?
        .iter()
        .map(ThemeSummary::from)
        .collect())
}

/// Write `vars` to the default theme, and to the custom theme when there is
/// one, then drop the cached theme of `cache_namespace`.
pub fn update(conn: &Connection, vars: ThemeVariables, cache_namespace: &str) -> AppResult<ThemeUpdate> {
    validate_variables(&vars)?;
    let json = serde_json::to_string(&vars)?;

    let tx = conn.unchecked_transaction()?;

    if !themes::update_theme_variables(&tx, DEFAULT_THEME, &json)? {
        return Err(AppError::ThemeNotFound(DEFAULT_THEME.to_string()));
    }

    let custom_updated = match themes::find_theme_by_name(&tx, CUSTOM_THEME)? {
        Some(_) => themes::update_theme_variables(&tx, CUSTOM_THEME, &json)?,
        None => false,
    };

    let cache_entries_cleared = themes::invalidate_cache_entry(&tx, cache_namespace, THEME_CACHE_KEY)?;

    ttlog(
        &tx,
        "theme",
        if custom_updated { "default, custom" } else { DEFAULT_THEME },
        &format!(
            "Primary color {}, gradient end {}",
            vars.primary_color, vars.primary_gradient_end_color
        ),
    )?;

    tx.commit()?;

    Ok(ThemeUpdate {
        variables: vars,
        custom_updated,
        cache_entries_cleared,
    })
}

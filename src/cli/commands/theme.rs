use crate::cli::parser::ThemeCommand;
use crate::config::Config;
use crate::core::theme;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::theme::ThemeVariables;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &ThemeCommand, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        ThemeCommand::Check => {
            println!("Checking themes in database...\n");
            for t in theme::check(&pool.conn)? {
                println!("Theme ID: {}", t.theme_id);
                println!("Theme Name: {}", t.theme_name);
                println!(
                    "Primary Color: {}",
                    t.primary_color.as_deref().unwrap_or("N/A")
                );
                println!(
                    "Primary Gradient End: {}",
                    t.primary_gradient_end_color.as_deref().unwrap_or("N/A")
                );
                println!();
            }
        }

        ThemeCommand::Update {
            primary_color,
            primary_font_color,
            secondary_color,
            secondary_font_color,
            primary_gradient_start_color,
            primary_gradient_end_color,
        } => {
            let defaults = ThemeVariables::default();
            let pick = |given: &Option<String>, fallback: String| given.clone().unwrap_or(fallback);

            let vars = ThemeVariables {
                primary_color: pick(primary_color, defaults.primary_color),
                primary_font_color: pick(primary_font_color, defaults.primary_font_color),
                secondary_color: pick(secondary_color, defaults.secondary_color),
                secondary_font_color: pick(secondary_font_color, defaults.secondary_font_color),
                primary_gradient_start_color: pick(
                    primary_gradient_start_color,
                    defaults.primary_gradient_start_color,
                ),
                primary_gradient_end_color: pick(
                    primary_gradient_end_color,
                    defaults.primary_gradient_end_color,
                ),
            };

            info("Updating theme colors in database...");
            let outcome = theme::update(&pool.conn, vars, &cfg.cache_namespace)?;

            success("Updated default theme colors");
            if outcome.custom_updated {
                success("Updated custom theme colors");
            }
            success(format!(
                "Cache cleared ({} entr{})",
                outcome.cache_entries_cleared,
                if outcome.cache_entries_cleared == 1 { "y" } else { "ies" }
            ));
            println!("New primary color: {}", outcome.variables.primary_color);
            println!(
                "New gradient end color: {}",
                outcome.variables.primary_gradient_end_color
            );
        }
    }

    Ok(())
}

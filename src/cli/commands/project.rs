use crate::cli::parser::ProjectCommand;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &ProjectCommand, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        ProjectCommand::Add { name, customer } => {
            let customer_id = match customer {
                Some(c) => Some(match queries::find_customer_by_name(&pool.conn, c)? {
                    Some(id) => id,
                    None => queries::insert_customer(&pool.conn, c)?,
                }),
                None => None,
            };

            let id = queries::insert_project(&pool.conn, name, customer_id)?;
            ttlog_quiet(
                &pool.conn,
                "project",
                &format!("project {}", id),
                &format!("Added project '{}'", name),
            );
            success(format!("Project '{}' added (id {})", name, id));
        }
        ProjectCommand::Activity { project_id, name } => {
            let id = queries::insert_activity(&pool.conn, *project_id, name)?;
            ttlog_quiet(
                &pool.conn,
                "project",
                &format!("project {}", project_id),
                &format!("Added activity '{}' (id {})", name, id),
            );
            success(format!(
                "Activity '{}' added to project {} (id {})",
                name, project_id, id
            ));
        }
    }

    Ok(())
}

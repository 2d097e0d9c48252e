use crate::cli::parser::EmployeeCommand;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &EmployeeCommand, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        EmployeeCommand::Add {
            first_name,
            last_name,
        } => {
            let emp_number = queries::insert_employee(&pool.conn, first_name, last_name)?;
            ttlog_quiet(
                &pool.conn,
                "employee",
                &format!("employee {}", emp_number),
                &format!("Added {} {}", first_name, last_name),
            );
            success(format!(
                "Employee {} {} added (emp_number {})",
                first_name, last_name, emp_number
            ));
        }
        EmployeeCommand::Terminate {
            emp_number,
            termination_id,
        } => {
            queries::terminate_employee(&pool.conn, *emp_number, *termination_id)?;
            ttlog_quiet(
                &pool.conn,
                "employee",
                &format!("employee {}", emp_number),
                "Marked as past employee",
            );
            success(format!("Employee {} marked as past employee", emp_number));
        }
    }

    Ok(())
}

use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimesheet
/// CLI application to keep weekly timesheets with SQLite
#[derive(Parser)]
#[command(
    name = "rtimesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Weekly timesheets on SQLite: record project hours, run the approval workflow and build reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeCommand,
    },

    /// Manage projects and their activities
    Project {
        #[command(subcommand)]
        action: ProjectCommand,
    },

    /// Create, inspect and move timesheets through the workflow
    Timesheet {
        #[command(subcommand)]
        action: TimesheetCommand,
    },

    /// Save submitted rows into a timesheet (insert or update items)
    Save {
        #[arg(long = "timesheet", help = "Timesheet id")]
        timesheet: i64,

        #[arg(
            long = "file",
            conflicts_with = "rows",
            help = "JSON file holding the rows array"
        )]
        file: Option<String>,

        #[arg(long = "rows", help = "Rows array as inline JSON")]
        rows: Option<String>,
    },

    /// Delete items of a timesheet
    DeleteRows {
        #[arg(long = "timesheet", help = "Timesheet id")]
        timesheet: i64,

        #[arg(
            long = "entries",
            help = "JSON array of item ids, e.g. '[1, \"2\", {\"id\": 3}]'"
        )]
        entries: String,
    },

    /// Timesheet and employee reports
    Report {
        #[command(subcommand)]
        kind: ReportCommand,
    },

    /// Inspect or update theme colors
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// Add an employee
    Add {
        #[arg(long = "first")]
        first_name: String,

        #[arg(long = "last")]
        last_name: String,
    },

    /// Mark an employee as past employee
    Terminate {
        #[arg(long = "emp")]
        emp_number: i64,

        #[arg(long = "termination-id", default_value_t = 1)]
        termination_id: i64,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Add a project, optionally creating its customer
    Add {
        name: String,

        #[arg(long = "customer", help = "Customer name (created if missing)")]
        customer: Option<String>,
    },

    /// Add an activity to a project
    Activity {
        #[arg(long = "project")]
        project_id: i64,

        name: String,
    },
}

#[derive(Subcommand)]
pub enum TimesheetCommand {
    /// Create the timesheet of the week containing DATE (default: today)
    Create {
        #[arg(long = "emp")]
        emp_number: i64,

        #[arg(long = "date", help = "Any date of the week (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Show the week grid of a timesheet
    Show {
        id: i64,

        #[arg(long = "json", help = "Print the grid as JSON")]
        json: bool,
    },

    /// List the timesheets of an employee
    List {
        #[arg(long = "emp")]
        emp_number: i64,

        #[arg(long = "from", requires = "to")]
        from: Option<String>,

        #[arg(long = "to", requires = "from")]
        to: Option<String>,

        #[arg(long = "default", help = "Only the default timesheet (exact week or latest)")]
        default: bool,
    },

    /// Actions allowed in the current state
    Actions { id: i64 },

    /// Apply a workflow action (name or numeric code)
    Action {
        id: i64,

        action: String,

        #[arg(long = "by", help = "Employee performing the action")]
        performed_by: i64,

        #[arg(long = "comment")]
        comment: Option<String>,
    },

    /// Show the action history
    History { id: i64 },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// One row per item with the total logged time
    Timesheet {
        #[arg(long = "emp", value_delimiter = ',', help = "Employee numbers (comma separated)")]
        emp_numbers: Option<Vec<i64>>,

        #[arg(long = "project")]
        project_id: Option<i64>,

        #[arg(long = "activity")]
        activity_id: Option<i64>,

        #[arg(long = "from")]
        from: Option<String>,

        #[arg(long = "to")]
        to: Option<String>,

        #[arg(long = "include", default_value = "all", help = "onlyApproved | all")]
        include: String,

        #[arg(
            long = "sort",
            default_value = "employee.lastName",
            help = "employee.lastName | timesheetItem.date | project.name | projectActivity.name"
        )]
        sort: String,

        #[arg(long = "desc", help = "Sort descending")]
        desc: bool,

        #[arg(long = "limit")]
        limit: Option<i64>,

        #[arg(long = "offset", default_value_t = 0)]
        offset: i64,

        #[arg(long = "format", value_enum, requires = "file")]
        format: Option<ExportFormat>,

        #[arg(long = "file", requires = "format")]
        file: Option<String>,

        #[arg(long = "force", help = "Overwrite an existing export file")]
        force: bool,
    },

    /// Time of one employee grouped by project, activity and customer
    Employee {
        #[arg(long = "emp")]
        emp_number: i64,

        #[arg(long = "project")]
        project_id: Option<i64>,

        #[arg(long = "activity")]
        activity_id: Option<i64>,

        #[arg(long = "from")]
        from: Option<String>,

        #[arg(long = "to")]
        to: Option<String>,

        #[arg(long = "include", default_value = "all", help = "onlyApproved | all")]
        include: String,

        #[arg(long = "limit")]
        limit: Option<i64>,

        #[arg(long = "offset", default_value_t = 0)]
        offset: i64,

        #[arg(long = "format", value_enum, requires = "file")]
        format: Option<ExportFormat>,

        #[arg(long = "file", requires = "format")]
        file: Option<String>,

        #[arg(long = "force", help = "Overwrite an existing export file")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print id, name and main colors of every theme
    Check,

    /// Write the color scheme to the default (and custom) theme
    Update {
        #[arg(long = "primary")]
        primary_color: Option<String>,

        #[arg(long = "primary-font")]
        primary_font_color: Option<String>,

        #[arg(long = "secondary")]
        secondary_color: Option<String>,

        #[arg(long = "secondary-font")]
        secondary_font_color: Option<String>,

        #[arg(long = "gradient-start")]
        primary_gradient_start_color: Option<String>,

        #[arg(long = "gradient-end")]
        primary_gradient_end_color: Option<String>,
    },
}

use crate::ui::messages::{info, success};
use rusqlite::{Connection, OptionalExtension, Result, params};

const CORE_SCHEMA_VERSION: &str = "20250601_0001_core_schema";
const REPORT_MENU_VERSION: &str = "20250801_0002_timesheet_report_menu";

/// Ensure that the `log` table exists: it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

/// Tables for the timesheet domain, the theme/cache store and the
/// menu/screen/lang-string catalog.
fn migrate_core_schema(conn: &Connection) -> Result<()> {
    if is_applied(conn, CORE_SCHEMA_VERSION)? {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        r##"
        CREATE TABLE IF NOT EXISTS employees (
            emp_number      INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name      TEXT NOT NULL,
            last_name       TEXT NOT NULL,
            termination_id  INTEGER DEFAULT NULL
        );

        CREATE TABLE IF NOT EXISTS customers (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS projects (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id  INTEGER REFERENCES customers(id),
            name         TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS project_activities (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            name        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS timesheets (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            emp_number  INTEGER NOT NULL REFERENCES employees(emp_number),
            state       TEXT NOT NULL,
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL,
            UNIQUE (emp_number, start_date)
        );

        CREATE TABLE IF NOT EXISTS timesheet_items (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            timesheet_id  INTEGER NOT NULL REFERENCES timesheets(id) ON DELETE CASCADE,
            emp_number    INTEGER NOT NULL,
            project_id    INTEGER NOT NULL REFERENCES projects(id),
            activity_id   INTEGER NOT NULL REFERENCES project_activities(id),
            date          TEXT NOT NULL,
            duration      INTEGER DEFAULT NULL,
            comment       TEXT DEFAULT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_items_composite
            ON timesheet_items(timesheet_id, project_id, activity_id, date);
        CREATE INDEX IF NOT EXISTS idx_items_emp_date
            ON timesheet_items(emp_number, date);

        CREATE TABLE IF NOT EXISTS timesheet_action_logs (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            timesheet_id  INTEGER NOT NULL REFERENCES timesheets(id) ON DELETE CASCADE,
            action        TEXT NOT NULL,
            comment       TEXT DEFAULT NULL,
            performed_by  INTEGER NOT NULL,
            date_time     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS themes (
            theme_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            theme_name  TEXT NOT NULL UNIQUE,
            variables   TEXT
        );

        INSERT OR IGNORE INTO themes (theme_name, variables) VALUES (
            'default',
            '{"primaryColor":"#FF7B1D","primaryFontColor":"#FFFFFF","secondaryColor":"#76BC21","secondaryFontColor":"#FFFFFF","primaryGradientStartColor":"#FF920B","primaryGradientEndColor":"#F35C17"}'
        );

        CREATE TABLE IF NOT EXISTS cache_entries (
            namespace  TEXT NOT NULL,
            key        TEXT NOT NULL,
            value      TEXT,
            PRIMARY KEY (namespace, key)
        );

        CREATE TABLE IF NOT EXISTS modules (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            name    TEXT NOT NULL UNIQUE,
            status  INTEGER NOT NULL DEFAULT 1
        );

        INSERT OR IGNORE INTO modules (name) VALUES ('time');

        CREATE TABLE IF NOT EXISTS screens (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            module_id   INTEGER NOT NULL REFERENCES modules(id),
            action_url  TEXT NOT NULL,
            UNIQUE (module_id, action_url)
        );

        CREATE TABLE IF NOT EXISTS menu_items (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            menu_title  TEXT NOT NULL,
            screen_id   INTEGER REFERENCES screens(id),
            parent_id   INTEGER REFERENCES menu_items(id),
            level       INTEGER NOT NULL,
            order_hint  INTEGER NOT NULL,
            status      INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS lang_strings (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            unit_id     TEXT NOT NULL,
            group_name  TEXT NOT NULL,
            value       TEXT NOT NULL,
            UNIQUE (unit_id, group_name)
        );
        "##,
    )?;

    mark_applied(&tx, CORE_SCHEMA_VERSION, "Created timesheet schema")?;
    tx.commit()?;

    success(format!("Migration applied: {}", CORE_SCHEMA_VERSION));
    Ok(())
}

fn module_id(conn: &Connection, name: &str) -> Result<i64> {
    conn.query_row("SELECT id FROM modules WHERE name = ?1", [name], |r| {
        r.get(0)
    })
}

/// Find a menu item by (title, parent); a `None` parent matches top-level items.
fn find_menu_item(conn: &Connection, title: &str, parent_id: Option<i64>) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM menu_items
         WHERE menu_title = ?1 AND parent_id IS ?2
         LIMIT 1",
        params![title, parent_id],
        |r| r.get(0),
    )
    .optional()
}

/// Insert a menu item unless one with the same (title, parent) exists.
/// Returns the id of the existing or inserted row.
pub fn ensure_menu_item(
    conn: &Connection,
    title: &str,
    screen_id: Option<i64>,
    parent_id: Option<i64>,
    level: i64,
    order_hint: i64,
) -> Result<i64> {
    if let Some(id) = find_menu_item(conn, title, parent_id)? {
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO menu_items (menu_title, screen_id, parent_id, level, order_hint, status)
         VALUES (?1, ?2, ?3, ?4, ?5, 1)",
        params![title, screen_id, parent_id, level, order_hint],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Read-only access to a screen for each of the given roles; existing rows are kept.
fn insert_screen_permissions(conn: &Connection, screen_id: i64, roles: &[&str]) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS screen_permissions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_role   TEXT NOT NULL,
            screen_id   INTEGER NOT NULL REFERENCES screens(id),
            can_read    INTEGER NOT NULL DEFAULT 0,
            can_create  INTEGER NOT NULL DEFAULT 0,
            can_update  INTEGER NOT NULL DEFAULT 0,
            can_delete  INTEGER NOT NULL DEFAULT 0,
            UNIQUE (user_role, screen_id)
        );",
    )?;

    for role in roles {
        conn.execute(
            "INSERT OR IGNORE INTO screen_permissions
                 (user_role, screen_id, can_read, can_create, can_update, can_delete)
             VALUES (?1, ?2, 1, 0, 0, 0)",
            params![role, screen_id],
        )?;
    }
    Ok(())
}

fn insert_or_update_lang_string(conn: &Connection, unit_id: &str, group: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO lang_strings (unit_id, group_name, value) VALUES (?1, ?2, ?3)
         ON CONFLICT(unit_id, group_name) DO UPDATE SET value = excluded.value",
        params![unit_id, group, value],
    )?;
    Ok(())
}

/// Screen, permissions, menu entry and lang strings of the timesheet report.
fn migrate_timesheet_report_menu(conn: &Connection) -> Result<()> {
    if is_applied(conn, REPORT_MENU_VERSION)? {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;

    let time_module = module_id(&tx, "time")?;

    tx.execute(
        "INSERT OR IGNORE INTO screens (name, module_id, action_url)
         VALUES ('Timesheet Report', ?1, 'displayTimesheetReportCriteria')",
        [time_module],
    )?;
    let screen_id: i64 = tx.query_row(
        "SELECT id FROM screens WHERE module_id = ?1 AND action_url = 'displayTimesheetReportCriteria'",
        [time_module],
        |r| r.get(0),
    )?;
    insert_screen_permissions(&tx, screen_id, &["Admin", "Supervisor"])?;

    for (unit, value) in [
        ("timesheet_report", "Timesheet Report"),
        ("past_employee", "(Past Employee)"),
        ("include_timesheets", "Include Timesheets"),
        ("only_approved_timesheets", "Only Approved Timesheets"),
        ("all_timesheets", "All Timesheets"),
    ] {
        insert_or_update_lang_string(&tx, unit, "time", value)?;
    }

    let time_menu = ensure_menu_item(&tx, "Time", None, None, 1, 300)?;
    let reports_menu = ensure_menu_item(&tx, "Reports", None, Some(time_menu), 2, 300)?;

    if find_menu_item(&tx, "Timesheet Report", Some(reports_menu))?.is_none() {
        ensure_menu_item(
            &tx,
            "Timesheet Report",
            Some(screen_id),
            Some(reports_menu),
            3,
            400,
        )?;
    } else {
        info("Menu item 'Timesheet Report' already present, skipped.");
    }

    mark_applied(&tx, REPORT_MENU_VERSION, "Added timesheet report screen, permissions and menu")?;
    tx.commit()?;

    success(format!("Migration applied: {}", REPORT_MENU_VERSION));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    migrate_core_schema(conn)?;
    migrate_timesheet_report_menu(conn)?;
    Ok(())
}

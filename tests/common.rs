#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rtimesheet::db::initialize::init_db;
use rtimesheet::db::pool::DbPool;
use rtimesheet::db::queries;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rts() -> Command {
    cargo_bin_cmd!("rtimesheet")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimesheet.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Ids of the catalog rows created by [`seed`].
pub struct Seed {
    pub emp: i64,
    pub other_emp: i64,
    pub customer: i64,
    /// "Website" (customer "Acme"), activities `design` and `coding`
    pub project: i64,
    pub design: i64,
    pub coding: i64,
    /// "Internal" (no customer), activity `meetings`
    pub other_project: i64,
    pub meetings: i64,
}

/// Open a fresh migrated database holding two employees, two projects and
/// three activities.
pub fn open_seeded(name: &str) -> (DbPool, Seed) {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");

    let conn = &pool.conn;
    let emp = queries::insert_employee(conn, "Ada", "Lovelace").expect("employee");
    let other_emp = queries::insert_employee(conn, "Alan", "Turing").expect("employee");
    let customer = queries::insert_customer(conn, "Acme").expect("customer");
    let project = queries::insert_project(conn, "Website", Some(customer)).expect("project");
    let design = queries::insert_activity(conn, project, "design").expect("activity");
    let coding = queries::insert_activity(conn, project, "coding").expect("activity");
    let other_project = queries::insert_project(conn, "Internal", None).expect("project");
    let meetings = queries::insert_activity(conn, other_project, "meetings").expect("activity");

    let seed = Seed {
        emp,
        other_emp,
        customer,
        project,
        design,
        coding,
        other_project,
        meetings,
    };
    (pool, seed)
}

/// `init` a database through the binary, in test mode.
pub fn init_cli_db(db_path: &str) {
    rts()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Binary bound to `db_path`, in test mode (the user's config file is never read).
pub fn rts_db(db_path: &str) -> Command {
    let mut cmd = rts();
    cmd.args(["--db", db_path, "--test"]);
    cmd
}

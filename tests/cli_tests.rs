use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_cli_db, rts_db, setup_test_db, temp_out};

/// init + one employee (1), project "Website" (1) with activity "design" (1),
/// and the timesheet (1) of the week of 2021-12-15.
fn prepare(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_cli_db(&db_path);

    rts_db(&db_path)
        .args(["employee", "add", "--first", "Ada", "--last", "Lovelace"])
        .assert()
        .success()
        .stdout(contains("emp_number 1"));

    rts_db(&db_path)
        .args(["project", "add", "Website", "--customer", "Acme"])
        .assert()
        .success();

    rts_db(&db_path)
        .args(["project", "activity", "--project", "1", "design"])
        .assert()
        .success();

    rts_db(&db_path)
        .args(["timesheet", "create", "--emp", "1", "--date", "2021-12-15"])
        .assert()
        .success()
        .stdout(contains("2021-12-13").and(contains("2021-12-19")));

    db_path
}

#[test]
fn init_creates_schema() {
    let db_path = setup_test_db("cli_init");
    init_cli_db(&db_path);

    rts_db(&db_path)
        .args(["db", "--info"])
        .assert()
        .success()
        .stdout(contains("Timesheets"));
}

#[test]
fn save_then_show_timesheet_grid() {
    let db_path = prepare("cli_save_show");

    let rows = r#"[{"projectId": 1, "activityId": 1, "dates": {"2021-12-13": {"duration": "02:30"}}}]"#;
    rts_db(&db_path)
        .args(["save", "--timesheet", "1", "--rows", rows])
        .assert()
        .success()
        .stdout(contains("1 inserted, 0 updated"));

    rts_db(&db_path)
        .args(["save", "--timesheet", "1", "--rows", rows])
        .assert()
        .success()
        .stdout(contains("0 inserted, 1 updated"));

    rts_db(&db_path)
        .args(["timesheet", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Website").and(contains("design")).and(contains("02:30")));
}

#[test]
fn save_reads_rows_from_file() {
    let db_path = prepare("cli_save_file");
    let file = temp_out("cli_save_file_rows", "json");
    fs::write(
        &file,
        r#"[{"projectId": 1, "activityId": 1, "dates": {"2021-12-14": {"duration": "01:00", "comment": "review"}}}]"#,
    )
    .expect("write rows");

    rts_db(&db_path)
        .args(["save", "--timesheet", "1", "--file", &file])
        .assert()
        .success()
        .stdout(contains("1 inserted"));
}

#[test]
fn save_with_foreign_activity_fails_with_exit_code_1() {
    let db_path = prepare("cli_save_consistency");

    rts_db(&db_path)
        .args(["project", "add", "Internal"])
        .assert()
        .success();
    rts_db(&db_path)
        .args(["project", "activity", "--project", "2", "meetings"])
        .assert()
        .success();

    let rows = r#"[{"projectId": 1, "activityId": 2, "dates": {"2021-12-13": {"duration": "01:00"}}}]"#;
    rts_db(&db_path)
        .args(["save", "--timesheet", "1", "--rows", rows])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("does not belong to the provided project"));
}

#[test]
fn save_into_missing_timesheet_warns() {
    let db_path = prepare("cli_save_missing");
    let rows = r#"[{"projectId": 1, "activityId": 1, "dates": {"2021-12-13": {"duration": "01:00"}}}]"#;

    rts_db(&db_path)
        .args(["save", "--timesheet", "42", "--rows", rows])
        .assert()
        .success()
        .stdout(contains("Timesheet 42 not found"));
}

#[test]
fn delete_rows_validates_entries() {
    let db_path = prepare("cli_delete_rows");
    let rows = r#"[{"projectId": 1, "activityId": 1, "dates": {"2021-12-13": {"duration": "01:00"}, "2021-12-14": {"duration": "01:00"}}}]"#;
    rts_db(&db_path)
        .args(["save", "--timesheet", "1", "--rows", rows])
        .assert()
        .success();

    rts_db(&db_path)
        .args(["delete-rows", "--timesheet", "1", "--entries", r#"[1, {"id": "2"}]"#])
        .assert()
        .success()
        .stdout(contains("2 item(s) deleted"));

    rts_db(&db_path)
        .args(["delete-rows", "--timesheet", "1", "--entries", r#"[{"id": 1, "x": 2}]"#])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn workflow_actions_through_cli() {
    let db_path = prepare("cli_workflow");

    rts_db(&db_path)
        .args(["timesheet", "actions", "1"])
        .assert()
        .success()
        .stdout(contains("SUBMIT").and(contains("MODIFY")));

    rts_db(&db_path)
        .args(["timesheet", "action", "1", "submit", "--by", "1"])
        .assert()
        .success()
        .stdout(contains("SUBMITTED"));

    rts_db(&db_path)
        .args(["timesheet", "action", "1", "2", "--by", "1", "--comment", "ok"])
        .assert()
        .success()
        .stdout(contains("APPROVED"));

    rts_db(&db_path)
        .args(["timesheet", "action", "1", "submit", "--by", "1"])
        .assert()
        .failure()
        .code(1);

    rts_db(&db_path)
        .args(["timesheet", "history", "1"])
        .assert()
        .success()
        .stdout(contains("CREATE").and(contains("APPROVE")).and(contains("ok")));
}

#[test]
fn report_exports_csv() {
    let db_path = prepare("cli_report_csv");
    let rows = r#"[{"projectId": 1, "activityId": 1, "dates": {"2021-12-13": {"duration": "02:30"}}}]"#;
    rts_db(&db_path)
        .args(["save", "--timesheet", "1", "--rows", rows])
        .assert()
        .success();

    rts_db(&db_path)
        .args(["report", "timesheet"])
        .assert()
        .success()
        .stdout(contains("Ada Lovelace").and(contains("2.50")));

    let out = temp_out("cli_report_csv", "csv");
    rts_db(&db_path)
        .args(["report", "timesheet", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("csv written");
    assert!(content.starts_with("employee_name,date,project_name,activity_name,duration,comment"));
    assert!(content.contains("Ada Lovelace,2021-12-13,Website,design,2.50,"));

    let json_out = temp_out("cli_report_employee", "json");
    rts_db(&db_path)
        .args([
            "report", "employee", "--emp", "1", "--format", "json", "--file", &json_out, "--force",
        ])
        .assert()
        .success();
    let json = fs::read_to_string(&json_out).expect("json written");
    assert!(json.contains("\"customer_name\": \"Acme\""));
    assert!(json.contains("\"total_duration\": 9000"));
}

#[test]
fn theme_check_and_update() {
    let db_path = setup_test_db("cli_theme");
    init_cli_db(&db_path);

    rts_db(&db_path)
        .args(["theme", "check"])
        .assert()
        .success()
        .stdout(contains("Theme Name: default").and(contains("#FF7B1D")));

    rts_db(&db_path)
        .args(["theme", "update", "--gradient-end", "#123456"])
        .assert()
        .success()
        .stdout(contains("New gradient end color: #123456"));

    rts_db(&db_path)
        .args(["theme", "check"])
        .assert()
        .success()
        .stdout(contains("Primary Color: #28A848").and(contains("#123456")));

    rts_db(&db_path)
        .args(["theme", "update", "--primary", "red"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Invalid color value"));
}

#[test]
fn log_print_shows_operations() {
    let db_path = prepare("cli_log");

    rts_db(&db_path)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("create")));
}

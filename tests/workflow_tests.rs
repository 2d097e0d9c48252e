use rtimesheet::core::timesheet::TimesheetService;
use rtimesheet::core::workflow::{allowed_actions, next_state};
use rtimesheet::db::queries;
use rtimesheet::errors::AppError;
use rtimesheet::models::grid::TimesheetGrid;
use rtimesheet::models::item::TimesheetItem;
use rtimesheet::models::row::{DateCell, SubmittedRow};
use rtimesheet::models::timesheet::{TimesheetAction as A, TimesheetState as S};
use rtimesheet::utils::date::date_range;

mod common;
use common::{date, open_seeded};

#[test]
fn transitions_follow_the_state_machine() {
    assert_eq!(next_state(S::Initial, A::Create).expect("create"), S::NotSubmitted);
    assert_eq!(next_state(S::NotSubmitted, A::Submit).expect("submit"), S::Submitted);
    assert_eq!(next_state(S::Submitted, A::Approve).expect("approve"), S::Approved);
    assert_eq!(next_state(S::Submitted, A::Reject).expect("reject"), S::Rejected);
    assert_eq!(next_state(S::Rejected, A::Submit).expect("resubmit"), S::Submitted);
    assert_eq!(next_state(S::Approved, A::Reset).expect("reset"), S::NotSubmitted);
    assert_eq!(next_state(S::Approved, A::View).expect("view"), S::Approved);

    assert!(matches!(
        next_state(S::NotSubmitted, A::Approve),
        Err(AppError::InvalidTransition { .. })
    ));
    assert!(next_state(S::Approved, A::Modify).is_err());
}

#[test]
fn allowed_actions_always_include_view() {
    assert_eq!(allowed_actions(S::NotSubmitted), vec![A::View, A::Submit, A::Modify]);
    assert_eq!(allowed_actions(S::Submitted), vec![A::View, A::Approve, A::Reject, A::Reset]);
    assert_eq!(allowed_actions(S::Approved), vec![A::View, A::Reset]);
}

#[test]
fn action_codes_and_names_parse() {
    assert_eq!(A::parse("submit"), Some(A::Submit));
    assert_eq!(A::parse("2"), Some(A::Approve));
    assert_eq!(A::parse("6"), Some(A::Create));
    assert_eq!(A::parse("9"), None);
    assert_eq!(A::parse("archive"), None);
    assert_eq!(A::Reset.code(), 4);
}

#[test]
fn perform_action_stores_state_and_history() {
    let (mut pool, seed) = open_seeded("workflow_perform");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let submitted = service
        .perform_action(ts.id, A::Submit, seed.emp, None)
        .expect("submit")
        .expect("exists");
    assert_eq!(submitted.state, S::Submitted);

    let rejected = service
        .perform_action(ts.id, A::Reject, seed.other_emp, Some("missing friday"))
        .expect("reject")
        .expect("exists");
    assert_eq!(rejected.state, S::Rejected);

    let reloaded = service.get_timesheet(ts.id).expect("get").expect("exists");
    assert_eq!(reloaded.state, S::Rejected);

    let err = service.perform_action(ts.id, A::Approve, seed.other_emp, None);
    assert!(matches!(err, Err(AppError::InvalidTransition { .. })));

    let logs = service.action_logs(ts.id).expect("logs");
    let actions: Vec<A> = logs.iter().map(|l| l.action).collect();
    assert_eq!(actions, vec![A::Create, A::Submit, A::Reject]);
    assert_eq!(logs[2].comment.as_deref(), Some("missing friday"));
    assert_eq!(logs[2].performed_by, seed.other_emp);

    assert_eq!(
        service.allowed_actions(ts.id).expect("actions"),
        Some(vec![A::View, A::Submit, A::Modify])
    );
    assert!(service.perform_action(999, A::Submit, seed.emp, None).expect("no error").is_none());
}

#[test]
fn grid_append_spills_into_extra_rows() {
    let dates = date_range(date("2021-12-13"), date("2021-12-19"));
    let mut grid = TimesheetGrid::new(&dates);

    let item = |id: i64, day: &str, secs: i64| {
        let mut i = TimesheetItem::new(1, 1, 3, 1, date(day), secs);
        i.id = id;
        i
    };

    assert_eq!(grid.append(item(1, "2021-12-13", 3600), "Website", "design"), 0);
    assert_eq!(grid.append(item(2, "2021-12-14", 1800), "Website", "design"), 0);
    // same pair, same date: next row bucket
    assert_eq!(grid.append(item(3, "2021-12-13", 600), "Website", "design"), 1);
    assert_eq!(grid.append(item(4, "2021-12-13", 60), "Website", "design"), 2);

    assert_eq!(grid.rows().len(), 3);
    assert_eq!(grid.rows()[0].total, 5400);
    assert_eq!(grid.total(), 6060);

    let monday = grid
        .columns()
        .find(|c| c.date == date("2021-12-13"))
        .expect("column");
    assert_eq!(monday.total, 4260);
    assert_eq!(grid.columns().count(), 7);
}

#[test]
fn detailed_timesheet_groups_items_by_pair() {
    let (mut pool, seed) = open_seeded("workflow_detailed");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let rows = vec![
        SubmittedRow::new(seed.project, seed.design)
            .with_cell("2021-12-13", DateCell::duration("01:00"))
            .with_cell("2021-12-14", DateCell::duration("02:00")),
        SubmittedRow::new(seed.other_project, seed.meetings).with_cell("2021-12-15", DateCell::duration("00:15")),
    ];
    service.save_rows(ts.id, &rows).expect("save");

    // a second item for an occupied (pair, date) slot spills into its own row
    let extra = TimesheetItem::new(ts.id, seed.emp, seed.project, seed.design, date("2021-12-13"), 1800);
    queries::insert_item(&pool.conn, &extra).expect("insert");
    let service = TimesheetService::new(&mut pool, 1);

    let detail = service.detailed_timesheet(ts.id).expect("detail").expect("exists");
    assert_eq!(detail.columns.len(), 7);
    assert_eq!(detail.rows.len(), 3);
    assert_eq!(detail.rows[0].project_name, "Website");
    assert_eq!(detail.rows[0].activity_name, "design");
    assert_eq!(detail.total(), 3600 + 7200 + 1800 + 900);

    assert!(service.detailed_timesheet(404).expect("detail").is_none());
}

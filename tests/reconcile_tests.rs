use rtimesheet::core::timesheet::TimesheetService;
use rtimesheet::db::queries;
use rtimesheet::errors::AppError;
use rtimesheet::models::item::TimesheetItem;
use rtimesheet::models::row::{DateCell, SubmittedRow};

mod common;
use common::{date, open_seeded};

#[test]
fn new_cell_is_inserted_with_duration_in_seconds() {
    let (mut pool, seed) = open_seeded("reconcile_new_cell");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let rows = vec![
        SubmittedRow::new(seed.project, seed.design).with_cell("2021-12-13", DateCell::duration("02:30")),
    ];

    let outcome = service.save_rows(ts.id, &rows).expect("save").expect("timesheet exists");

    assert_eq!(outcome.inserted, 1);
    assert_eq!(outcome.updated, 0);
    assert_eq!(outcome.items.len(), 1);

    let item = &outcome.items[0];
    assert!(item.id > 0);
    assert_eq!(item.duration, Some(9000));
    assert_eq!(item.comment, None);
    assert_eq!(item.emp_number, seed.emp);
    assert_eq!(item.date, date("2021-12-13"));

    let stored = queries::items_by_timesheet_id(&pool.conn, ts.id).expect("items");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].duration, Some(9000));
}

#[test]
fn only_new_cells_insert_one_item_each() {
    let (mut pool, seed) = open_seeded("reconcile_only_new");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let rows = vec![
        SubmittedRow::new(seed.project, seed.design)
            .with_cell("2021-12-13", DateCell::duration("01:00"))
            .with_cell("2021-12-14", DateCell::duration("02:00")),
        SubmittedRow::new(seed.project, seed.coding).with_cell("2021-12-13", DateCell::duration("03:00")),
        SubmittedRow::new(seed.other_project, seed.meetings)
            .with_cell("2021-12-17", DateCell::duration("00:30")),
    ];

    let outcome = service.save_rows(ts.id, &rows).expect("save").expect("exists");
    assert_eq!(outcome.inserted, 4);
    assert_eq!(outcome.updated, 0);

    let stored = queries::items_by_timesheet_id(&pool.conn, ts.id).expect("items");
    assert_eq!(stored.len(), 4);
}

#[test]
fn same_pair_on_different_dates_stays_separate() {
    let (mut pool, seed) = open_seeded("reconcile_different_dates");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let rows = vec![
        SubmittedRow::new(seed.project, seed.design)
            .with_cell("2021-12-13", DateCell::duration("01:00"))
            .with_cell("2021-12-14", DateCell::duration("01:00")),
    ];
    service.save_rows(ts.id, &rows).expect("save");

    let stored = queries::items_by_timesheet_id(&pool.conn, ts.id).expect("items");
    assert_eq!(stored.len(), 2);
    assert_ne!(stored[0].date, stored[1].date);
}

#[test]
fn saving_the_same_rows_twice_is_idempotent() {
    let (mut pool, seed) = open_seeded("reconcile_idempotent");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let rows = vec![
        SubmittedRow::new(seed.project, seed.design)
            .with_cell("2021-12-13", DateCell::duration("01:15"))
            .with_cell("2021-12-14", DateCell::duration("07:45").with_comment("release")),
    ];

    let first = service.save_rows(ts.id, &rows).expect("save").expect("exists");
    let second = service.save_rows(ts.id, &rows).expect("save").expect("exists");

    assert_eq!(first.inserted, 2);
    assert_eq!(second.inserted, 0);
    assert_eq!(second.updated, 2);

    let stored = queries::items_by_timesheet_id(&pool.conn, ts.id).expect("items");
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].duration, Some(4500));
    assert_eq!(stored[1].duration, Some(27900));
    assert_eq!(stored[1].comment.as_deref(), Some("release"));
}

#[test]
fn missing_comment_keeps_the_stored_one() {
    let (mut pool, seed) = open_seeded("reconcile_null_comment");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let with_comment = vec![
        SubmittedRow::new(seed.project, seed.design)
            .with_cell("2021-12-13", DateCell::duration("01:00").with_comment("kickoff")),
    ];
    service.save_rows(ts.id, &with_comment).expect("save");

    let without_comment = vec![
        SubmittedRow::new(seed.project, seed.design).with_cell("2021-12-13", DateCell::duration("04:00")),
    ];
    let outcome = service.save_rows(ts.id, &without_comment).expect("save").expect("exists");
    assert_eq!(outcome.updated, 1);

    let stored = queries::items_by_timesheet_id(&pool.conn, ts.id).expect("items");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].duration, Some(14400));
    assert_eq!(stored[0].comment.as_deref(), Some("kickoff"));
}

#[test]
fn distinct_explicit_ids_with_same_key_stay_distinct() {
    let (mut pool, seed) = open_seeded("reconcile_distinct_ids");
    let ts = TimesheetService::new(&mut pool, 1)
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    // two stored items sharing one natural key
    let mut first = TimesheetItem::new(ts.id, seed.emp, seed.project, seed.design, date("2021-12-13"), 3600);
    let a = queries::insert_item(&pool.conn, &first).expect("insert");
    first.duration = Some(7200);
    let b = queries::insert_item(&pool.conn, &first).expect("insert");
    assert_ne!(a, b);

    let mut service = TimesheetService::new(&mut pool, 1);
    let edits = vec![
        SubmittedRow::new(seed.project, seed.design)
            .with_cell("2021-12-13", DateCell::duration("05:00").with_id(b)),
        SubmittedRow::new(seed.project, seed.design)
            .with_cell("2021-12-13", DateCell::duration("06:00").with_id(a)),
    ];
    let outcome = service.save_rows(ts.id, &edits).expect("save").expect("exists");
    assert_eq!(outcome.inserted, 0);
    assert_eq!(outcome.updated, 2);

    let stored = queries::items_by_timesheet_id(&pool.conn, ts.id).expect("items");
    assert_eq!(stored.len(), 2);
    let by_id = |id: i64| stored.iter().find(|i| i.id == id).expect("stored item");
    assert_eq!(by_id(a).duration, Some(6 * 3600));
    assert_eq!(by_id(b).duration, Some(5 * 3600));
}

#[test]
fn repeated_id_less_cells_store_one_row_per_key() {
    let (mut pool, seed) = open_seeded("reconcile_repeated_key");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let rows = vec![
        SubmittedRow::new(seed.project, seed.coding).with_cell("2021-12-16", DateCell::duration("01:00")),
        SubmittedRow::new(seed.project, seed.coding)
            .with_cell("2021-12-16", DateCell::duration("03:00").with_comment("late")),
    ];

    let first = service.save_rows(ts.id, &rows).expect("save").expect("exists");
    assert_eq!((first.inserted, first.updated), (1, 0));

    let second = service.save_rows(ts.id, &rows).expect("save").expect("exists");
    assert_eq!((second.inserted, second.updated), (0, 1));

    let stored = queries::items_by_timesheet_id(&pool.conn, ts.id).expect("items");
    assert_eq!(stored.len(), 1);
    // the later cell wins
    assert_eq!(stored[0].duration, Some(10800));
    assert_eq!(stored[0].comment.as_deref(), Some("late"));
}

#[test]
fn unknown_explicit_id_is_inserted() {
    let (mut pool, seed) = open_seeded("reconcile_unknown_id");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let rows = vec![
        SubmittedRow::new(seed.project, seed.design)
            .with_cell("2021-12-13", DateCell::duration("01:00").with_id(999)),
    ];
    let outcome = service.save_rows(ts.id, &rows).expect("save").expect("exists");

    assert_eq!(outcome.inserted, 1);
    assert_ne!(outcome.items[0].id, 999);
}

#[test]
fn ids_of_another_timesheet_are_not_matched() {
    let (mut pool, seed) = open_seeded("reconcile_foreign_id");
    let mut service = TimesheetService::new(&mut pool, 1);
    let mine = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");
    let theirs = service
        .create_timesheet_by_date(seed.other_emp, date("2021-12-15"))
        .expect("create");

    let foreign = service
        .save_rows(
            theirs.id,
            &[SubmittedRow::new(seed.project, seed.design).with_cell("2021-12-13", DateCell::duration("01:00"))],
        )
        .expect("save")
        .expect("exists");
    let foreign_id = foreign.items[0].id;

    let outcome = service
        .save_rows(
            mine.id,
            &[SubmittedRow::new(seed.project, seed.design)
                .with_cell("2021-12-13", DateCell::duration("08:00").with_id(foreign_id))],
        )
        .expect("save")
        .expect("exists");

    assert_eq!(outcome.inserted, 1);
    let untouched = queries::item_by_id(&pool.conn, foreign_id).expect("query").expect("still there");
    assert_eq!(untouched.duration, Some(3600));
    assert_eq!(untouched.timesheet_id, theirs.id);
}

#[test]
fn activity_of_another_project_is_rejected_and_nothing_persisted() {
    let (mut pool, seed) = open_seeded("reconcile_consistency");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let rows = vec![
        SubmittedRow::new(seed.project, seed.design).with_cell("2021-12-13", DateCell::duration("01:00")),
        // meetings belongs to the other project
        SubmittedRow::new(seed.project, seed.meetings).with_cell("2021-12-14", DateCell::duration("01:00")),
    ];

    let err = service.save_rows(ts.id, &rows).expect_err("must fail");
    match err {
        AppError::Consistency(msg) => {
            assert_eq!(
                msg,
                format!(
                    "The project activity (id: {}) does not belong to the provided project (id: {})",
                    seed.meetings, seed.project
                )
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let stored = queries::items_by_timesheet_id(&pool.conn, ts.id).expect("items");
    assert!(stored.is_empty());
}

#[test]
fn unknown_activity_is_rejected() {
    let (mut pool, seed) = open_seeded("reconcile_unknown_activity");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let rows = vec![SubmittedRow::new(seed.project, 4242).with_cell("2021-12-13", DateCell::duration("01:00"))];
    let err = service.save_rows(ts.id, &rows).expect_err("must fail");
    assert!(matches!(err, AppError::Consistency(ref m) if m.contains("4242")));
}

#[test]
fn malformed_rows_are_shape_errors() {
    let (mut pool, seed) = open_seeded("reconcile_shape");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let no_dates = SubmittedRow {
        project_id: Some(seed.project),
        activity_id: Some(seed.design),
        dates: None,
    };
    assert!(matches!(
        service.save_rows(ts.id, &[no_dates]),
        Err(AppError::Shape(_))
    ));

    let no_duration = SubmittedRow::new(seed.project, seed.design).with_cell("2021-12-13", DateCell::default());
    assert!(matches!(
        service.save_rows(ts.id, &[no_duration]),
        Err(AppError::Shape(_))
    ));

    let bad_date = SubmittedRow::new(seed.project, seed.design).with_cell("13/12/2021", DateCell::duration("01:00"));
    assert!(matches!(
        service.save_rows(ts.id, &[bad_date]),
        Err(AppError::InvalidDate(_))
    ));

    let bad_duration = SubmittedRow::new(seed.project, seed.design).with_cell("2021-12-13", DateCell::duration("2h"));
    assert!(matches!(
        service.save_rows(ts.id, &[bad_duration]),
        Err(AppError::InvalidDuration(_))
    ));
}

#[test]
fn rows_parsed_from_json_accept_string_and_null_ids() {
    let (mut pool, seed) = open_seeded("reconcile_json_rows");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let json = format!(
        r#"[{{"projectId": {p}, "activityId": {a}, "dates": {{"2021-12-13": {{"duration": "01:30", "id": null}}}}}}]"#,
        p = seed.project,
        a = seed.design
    );
    let rows = SubmittedRow::parse_list(&json).expect("rows");
    let created = service.save_rows(ts.id, &rows).expect("save").expect("exists");
    let id = created.items[0].id;

    let json = format!(
        r#"[{{"projectId": {p}, "activityId": {a}, "dates": {{"2021-12-13": {{"duration": "02:00", "id": "{id}", "comment": "more"}}}}}}]"#,
        p = seed.project,
        a = seed.design,
        id = id
    );
    let rows = SubmittedRow::parse_list(&json).expect("rows");
    let updated = service.save_rows(ts.id, &rows).expect("save").expect("exists");

    assert_eq!(updated.updated, 1);
    assert_eq!(updated.items[0].id, id);
    assert_eq!(updated.items[0].duration, Some(7200));
    assert_eq!(updated.items[0].comment.as_deref(), Some("more"));
}

#[test]
fn saving_into_a_missing_timesheet_returns_none() {
    let (mut pool, seed) = open_seeded("reconcile_missing_ts");
    let mut service = TimesheetService::new(&mut pool, 1);

    let rows = vec![SubmittedRow::new(seed.project, seed.design).with_cell("2021-12-13", DateCell::duration("01:00"))];
    assert!(service.save_rows(777, &rows).expect("no error").is_none());
}

#[test]
fn storage_failure_mid_flush_rolls_back_every_write() {
    let (mut pool, seed) = open_seeded("reconcile_rollback");
    let mut service = TimesheetService::new(&mut pool, 1);
    let ts = service
        .create_timesheet_by_date(seed.emp, date("2021-12-15"))
        .expect("create");

    let initial = vec![
        SubmittedRow::new(seed.project, seed.design).with_cell("2021-12-13", DateCell::duration("01:00")),
    ];
    service.save_rows(ts.id, &initial).expect("save");

    // the update of the stored item is written, then the insert fails
    pool.conn
        .execute_batch(
            "CREATE TRIGGER reject_insert BEFORE INSERT ON timesheet_items
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .expect("trigger");

    let mut service = TimesheetService::new(&mut pool, 1);
    let rows = vec![
        SubmittedRow::new(seed.project, seed.design)
            .with_cell("2021-12-13", DateCell::duration("04:00").with_comment("changed")),
        SubmittedRow::new(seed.project, seed.coding).with_cell("2021-12-14", DateCell::duration("02:00")),
    ];
    let err = service.save_rows(ts.id, &rows).expect_err("insert aborted");
    assert!(matches!(err, AppError::Db(_)));

    let stored = queries::items_by_timesheet_id(&pool.conn, ts.id).expect("items");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].duration, Some(3600));
    assert_eq!(stored[0].comment, None);
}

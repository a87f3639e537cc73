use tests::{prelude::*, record, tests};

tests!(
    child_takes_parent_key,
    missing_parent,
    unrelated_tables,
    child_still_needs_required_fields,
);

async fn child_takes_parent_key(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let service = db
        .create("marketplace_service", record!("title" => "Tiling"))
        .await
        .unwrap();

    let booking = db
        .create_child(
            "marketplace_service",
            Key::from(Value::from("1")),
            "marketplace_booking",
            record!("service_id" => 99, "notes" => "Tuesday"),
        )
        .await
        .unwrap();

    assert_eq!(
        booking.record.get("service_id"),
        service.record.get("id")
    );
    assert_eq!(booking.record.get("notes"), Some(&Value::from("Tuesday")));
}

async fn missing_parent(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let err = db
        .create_child(
            "marketplace_service",
            Key::from(9),
            "marketplace_booking",
            record!(),
        )
        .await
        .unwrap_err();

    assert!(err.is_record_not_found());
    assert_eq!(test.log().inserts(), 0);
}

async fn unrelated_tables(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let err = db
        .create_child(
            "marketplace_booking",
            Key::from(1),
            "marketplace_service",
            record!("title" => "Backwards"),
        )
        .await
        .unwrap_err();

    assert!(err.is_unknown_table());
    assert!(test.log().is_empty());
}

async fn child_still_needs_required_fields(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    db.create("academy_learningpathway", record!("title" => "Rust"))
        .await
        .unwrap();

    let err = db
        .create_child(
            "academy_learningpathway",
            Key::from(1),
            "academy_modulestep",
            record!("order" => 1),
        )
        .await
        .unwrap_err();

    assert!(err.is_required_field_missing());
    assert_eq!(err.missing_fields(), Some(&["title".to_string()][..]));
}

use tests::{prelude::*, record, tests};

tests!(
    unknown_parent_is_rejected,
    unique_violation_is_rejected,
    delete_cascades_to_children,
    delete_restricted_by_children,
    delete_nulls_optional_references,
    enum_values_are_checked,
);

async fn unknown_parent_is_rejected(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let err = db
        .create(
            "marketplace_booking",
            record!("service_id" => 404),
        )
        .await
        .unwrap_err();
    assert!(err.is_integrity_constraint(), "{err}");
}

async fn unique_violation_is_rejected(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    db.create("auth_user", record!("username" => "ada"))
        .await
        .unwrap();
    let err = db
        .create("auth_user", record!("username" => "ada"))
        .await
        .unwrap_err();
    assert!(err.is_integrity_constraint(), "{err}");
}

async fn delete_cascades_to_children(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let service = db
        .create("marketplace_service", record!("title" => "Tiling"))
        .await
        .unwrap();
    let booking = db
        .create(
            "marketplace_booking",
            record!("service_id" => service.key.values()[0].clone()),
        )
        .await
        .unwrap();
    assert_eq!(booking.record.get("status"), Some(&Value::from("pending")));

    db.delete("marketplace_service", service.key).await.unwrap();

    let err = db
        .read("marketplace_booking", booking.key)
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
}

async fn delete_restricted_by_children(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let user = db
        .create("auth_user", record!("username" => "ada"))
        .await
        .unwrap();
    db.create("users_profile", record!("user_id" => 1, "bio" => "hi"))
        .await
        .unwrap();

    let err = db.delete("auth_user", user.key.clone()).await.unwrap_err();
    assert!(err.is_integrity_constraint(), "{err}");

    // The row is still there.
    db.read("auth_user", user.key).await.unwrap();
}

async fn delete_nulls_optional_references(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let category = db
        .create("marketplace_category", record!("name" => "Garden"))
        .await
        .unwrap();
    let service = db
        .create(
            "marketplace_service",
            record!("title" => "Mowing", "category_id" => 1),
        )
        .await
        .unwrap();

    db.delete("marketplace_category", category.key).await.unwrap();

    let service = db.read("marketplace_service", service.key).await.unwrap();
    assert_eq!(service.get("category_id"), Some(&Value::Null));
}

async fn enum_values_are_checked(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    db.create("marketplace_service", record!("title" => "Tiling"))
        .await
        .unwrap();
    let booking = db
        .create(
            "marketplace_booking",
            record!("service_id" => 1, "status" => "confirmed"),
        )
        .await
        .unwrap();
    assert_eq!(booking.record.get("status"), Some(&Value::from("confirmed")));

    let updated = db
        .update(
            "marketplace_booking",
            booking.key,
            record!("status" => "lost"),
        )
        .await
        .unwrap();
    assert_eq!(updated.record.get("status"), Some(&Value::from("confirmed")));
    assert_eq!(updated.warnings.len(), 1);
    assert_eq!(updated.warnings[0].field(), "status");
}

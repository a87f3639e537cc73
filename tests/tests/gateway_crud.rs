use kiri::FieldWarning;
use tests::{prelude::*, record, tests};

tests!(
    create_returns_stored_row,
    create_drops_unknown_and_generated_fields,
    create_requires_non_defaulted_columns,
    create_coerces_payload_values,
    read_is_repeatable,
    read_missing_row,
    read_key_of_wrong_type,
    update_changes_only_given_fields,
    update_ignores_key_columns,
    update_with_nothing_to_write_reads_row,
    update_missing_row,
    delete_then_read,
    delete_missing_row,
    composite_keys,
    unknown_table_everywhere,
);

async fn create_returns_stored_row(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let created = db
        .create(
            "marketplace_category",
            record!("name" => "Home repair", "slug" => "home-repair"),
        )
        .await
        .unwrap();

    assert_eq!(created.key, Key::from(1));
    assert!(created.warnings.is_empty());
    assert_eq!(
        created.record,
        record!(
            "id" => 1,
            "name" => "Home repair",
            "slug" => "home-repair",
        )
    );

    let read = db.read("marketplace_category", Key::from(1)).await.unwrap();
    assert_eq!(read, created.record);
    assert_eq!(test.log().inserts(), 1);
}

async fn create_drops_unknown_and_generated_fields(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let created = db
        .create(
            "marketplace_service",
            record!(
                "id" => 500,
                "title" => "Tiling",
                "legacy_rating" => 4.5,
            ),
        )
        .await
        .unwrap();

    assert_eq!(created.record.get("id"), Some(&Value::I64(1)));
    assert!(!created.record.contains("legacy_rating"));
    assert_eq!(
        created.warnings,
        vec![
            FieldWarning::UnknownField {
                field: "legacy_rating".into()
            },
            FieldWarning::GeneratedKey { field: "id".into() },
        ]
    );
}

async fn read_is_repeatable(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let created = db
        .create(
            "marketplace_service",
            record!("title" => "Tiling", "price" => 40, "description" => "Bathrooms"),
        )
        .await
        .unwrap();
    test.log().clear();

    let first = db.read("marketplace_service", created.key.clone()).await.unwrap();
    let second = db.read("marketplace_service", created.key).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, created.record);
    assert_eq!(test.log().selects(), 2);
    assert_eq!(test.log().len(), 2);
}

async fn create_requires_non_defaulted_columns(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let err = db
        .create("marketplace_service", record!("description" => "no title"))
        .await
        .unwrap_err();

    assert!(err.is_required_field_missing());
    assert_eq!(err.missing_fields(), Some(&["title".to_string()][..]));
    assert_eq!(test.log().inserts(), 0);

    // An explicit null does not satisfy a NOT NULL column either.
    let err = db
        .create("marketplace_service", record!("title" => Value::Null))
        .await
        .unwrap_err();
    assert!(err.is_required_field_missing());
}

async fn create_coerces_payload_values(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let created = db
        .create(
            "marketplace_service",
            record!(
                "title" => 42,
                "price" => "19.5",
                "is_active" => 0,
                "created_at" => "not a date",
            ),
        )
        .await
        .unwrap();

    assert_eq!(created.record.get("title"), Some(&Value::from("42")));
    assert_eq!(created.record.get("price"), Some(&Value::F64(19.5)));
    assert_eq!(created.record.get("is_active"), Some(&Value::Bool(false)));
    assert_eq!(created.record.get("created_at"), Some(&Value::Null));
    assert_eq!(
        created.warnings,
        vec![FieldWarning::TypeMismatch {
            field: "created_at".into(),
            expected: "timestamp".into(),
            found: "string".into(),
        }]
    );
}

async fn read_missing_row(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let err = db
        .read("marketplace_service", Key::from(999_999))
        .await
        .unwrap_err();

    assert!(err.is_record_not_found());
    assert_eq!(
        err.to_string(),
        "record not found: table=marketplace_service key=(999999)"
    );
}

async fn read_key_of_wrong_type(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    db.create("marketplace_category", record!("name" => "Garden"))
        .await
        .unwrap();

    // Path segments arrive as strings and are coerced to the key's type.
    let read = db
        .read("marketplace_category", Key::from(Value::from("1")))
        .await
        .unwrap();
    assert_eq!(read.get("name"), Some(&Value::from("Garden")));

    test.log().clear();
    let err = db
        .read("marketplace_category", Key::from(Value::from("abc")))
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
    assert!(test.log().is_empty());
}

async fn update_changes_only_given_fields(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    let created = db
        .create(
            "marketplace_service",
            record!("title" => "Tiling", "description" => "Walls", "price" => 40),
        )
        .await
        .unwrap();

    let updated = db
        .update("marketplace_service", created.key, record!("price" => 55.25))
        .await
        .unwrap();

    assert_eq!(updated.record.get("price"), Some(&Value::F64(55.25)));
    assert_eq!(updated.record.get("title"), Some(&Value::from("Tiling")));
    assert_eq!(updated.record.get("description"), Some(&Value::from("Walls")));
    assert!(updated.warnings.is_empty());
}

async fn update_ignores_key_columns(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    let created = db
        .create("marketplace_category", record!("name" => "Garden"))
        .await
        .unwrap();

    let updated = db
        .update(
            "marketplace_category",
            created.key.clone(),
            record!("id" => 77, "name" => "Gardening"),
        )
        .await
        .unwrap();

    assert_eq!(updated.record.get("id"), Some(&Value::I64(1)));
    assert_eq!(updated.record.get("name"), Some(&Value::from("Gardening")));
    assert_eq!(updated.warnings.len(), 1);
    assert_eq!(updated.warnings[0].field(), "id");

    let err = db
        .read("marketplace_category", Key::from(77))
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
}

async fn update_with_nothing_to_write_reads_row(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    let created = db
        .create("marketplace_category", record!("name" => "Garden"))
        .await
        .unwrap();

    let updated = db
        .update(
            "marketplace_category",
            created.key,
            record!("legacy_rating" => 3),
        )
        .await
        .unwrap();

    assert_eq!(updated.record, created.record);
    assert_eq!(test.log().updates(), 0);
}

async fn update_missing_row(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let err = db
        .update(
            "marketplace_category",
            Key::from(12),
            record!("name" => "Ghost"),
        )
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());

    let err = db
        .update("marketplace_category", Key::from(12), record!())
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
}

async fn delete_then_read(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    let created = db
        .create("marketplace_category", record!("name" => "Garden"))
        .await
        .unwrap();

    db.delete("marketplace_category", created.key.clone())
        .await
        .unwrap();

    let err = db
        .read("marketplace_category", created.key)
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
    assert_eq!(test.log().deletes(), 1);
}

async fn delete_missing_row(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let err = db
        .delete("marketplace_category", Key::from(5))
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
}

async fn composite_keys(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let created = db
        .create(
            "catalog_translation",
            record!("item_id" => 3, "locale" => "en", "label" => "Plumbing"),
        )
        .await
        .unwrap();
    assert_eq!(
        created.key,
        Key::new(vec![Value::I64(3), Value::from("en")])
    );
    assert_eq!(created.key.to_path(), "3,en");

    let path = Key::new(
        Key::split_path("3,en")
            .into_iter()
            .map(Value::from)
            .collect(),
    );
    let read = db.read("catalog_translation", path).await.unwrap();
    assert_eq!(read.get("label"), Some(&Value::from("Plumbing")));

    // A key with the wrong number of components matches nothing.
    let err = db
        .read("catalog_translation", Key::from(3))
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());

    let updated = db
        .update(
            "catalog_translation",
            created.key.clone(),
            record!("label" => "Plomberie", "locale" => "fr"),
        )
        .await
        .unwrap();
    assert_eq!(updated.record.get("locale"), Some(&Value::from("en")));
    assert_eq!(updated.record.get("label"), Some(&Value::from("Plomberie")));

    db.delete("catalog_translation", created.key).await.unwrap();
}

async fn unknown_table_everywhere(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    let err = db.read("marketplace_servce", Key::from(1)).await.unwrap_err();
    assert!(err.is_unknown_table());

    let err = db
        .create("marketplace_servce", record!("title" => "x"))
        .await
        .unwrap_err();
    assert!(err.is_unknown_table());

    let err = db
        .list("marketplace_servce", Page::default())
        .await
        .unwrap_err();
    assert!(err.is_unknown_table());

    let err = db
        .update("marketplace_servce", Key::from(1), record!())
        .await
        .unwrap_err();
    assert!(err.is_unknown_table());

    let err = db
        .delete("marketplace_servce", Key::from(1))
        .await
        .unwrap_err();
    assert!(err.is_unknown_table());

    assert!(test.log().is_empty());
}

use kiri::schema::{OnDelete, Type};
use kiri_driver_sqlite::{Connection, Sqlite};
use tests::{fixture, prelude::*, record, tests};

tests!(
    lists_tables_in_creation_order,
    introspects_column_types,
    introspects_requiredness,
    introspects_foreign_keys,
    introspects_composite_keys,
    every_table_has_a_primary_key,
);

async fn lists_tables_in_creation_order(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;

    assert_eq!(
        db.tables(),
        vec![
            "marketplace_category",
            "marketplace_service",
            "marketplace_booking",
            "auth_user",
            "users_profile",
            "blog_post",
            "blog_comment",
            "academy_learningpathway",
            "academy_modulestep",
            "catalog_translation",
        ]
    );
    assert!(test.log().is_empty());
}

async fn introspects_column_types(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    let catalog = db.catalog();
    let service = catalog.lookup("marketplace_service").unwrap();

    let types: Vec<(&str, &Type)> = service
        .columns
        .iter()
        .map(|column| (column.name.as_str(), &column.ty))
        .collect();
    assert_eq!(
        types,
        vec![
            ("id", &Type::Integer),
            ("category_id", &Type::Integer),
            ("title", &Type::Text),
            ("description", &Type::Text),
            ("price", &Type::Real),
            ("is_active", &Type::Boolean),
            ("created_at", &Type::Timestamp),
        ]
    );

    let booking = catalog.lookup("marketplace_booking").unwrap();
    assert_eq!(
        booking.column("status").map(|column| &column.ty),
        Some(&Type::Enum(vec![
            "pending".into(),
            "confirmed".into(),
            "cancelled".into()
        ]))
    );
}

async fn introspects_requiredness(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    let catalog = db.catalog();
    let service = catalog.lookup("marketplace_service").unwrap();

    let required: Vec<&str> = service
        .columns
        .iter()
        .filter(|column| column.is_required())
        .map(|column| column.name.as_str())
        .collect();
    assert_eq!(required, vec!["title"]);

    let id = service.column("id").unwrap();
    assert!(id.primary_key && id.auto_increment && !id.nullable);
    assert!(service.column("price").unwrap().has_default);
}

async fn introspects_foreign_keys(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    let catalog = db.catalog();

    let booking = catalog.lookup("marketplace_booking").unwrap();
    let fk = booking.references_to("marketplace_service").unwrap();
    assert_eq!(fk.column, "service_id");
    assert_eq!(fk.references_column, "id");
    assert_eq!(fk.on_delete, OnDelete::Cascade);

    let profile = catalog.lookup("users_profile").unwrap();
    assert_eq!(
        profile.references_to("auth_user").map(|fk| fk.on_delete),
        Some(OnDelete::Restrict)
    );

    let post = catalog.lookup("blog_post").unwrap();
    assert_eq!(
        post.references_to("auth_user").map(|fk| fk.on_delete),
        Some(OnDelete::NoAction)
    );
    assert!(post.references_to("marketplace_service").is_none());
}

async fn introspects_composite_keys(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    let catalog = db.catalog();
    let translation = catalog.lookup("catalog_translation").unwrap();

    assert_eq!(translation.primary_key_names(), vec!["item_id", "locale"]);
    assert!(translation
        .primary_key_columns()
        .all(|column| !column.auto_increment));
    assert_eq!(
        translation.parse_key("3,en"),
        Some(Key::new(vec![Value::I64(3), Value::from("en")]))
    );
    assert_eq!(translation.parse_key("3"), None);
}

async fn every_table_has_a_primary_key(test: &mut DbTest) {
    let db = test.setup_db(&mut Db::builder()).await;
    let catalog = db.catalog();

    for table in catalog.tables() {
        let schema = catalog.lookup(&table.name).unwrap();
        assert!(
            !schema.primary_key_names().is_empty(),
            "{} has no primary key",
            table.name
        );
    }
}

#[tokio::test]
async fn unknown_table_is_reported() {
    let mut test = DbTest::sqlite();
    let db = test.setup_db(&mut Db::builder()).await;

    let err = db.catalog().lookup("marketplace_servce").map(|_| ()).unwrap_err();
    assert!(err.is_unknown_table());
    assert_eq!(err.to_string(), "unknown table: marketplace_servce");
}

#[tokio::test]
async fn refresh_swaps_the_catalog() {
    let path = fixture::temp_db_path("refresh");
    let _ = std::fs::remove_file(&path);

    let mut admin = Connection::open(&path).unwrap();
    admin.execute_batch(fixture::MARKETPLACE).unwrap();

    let mut builder = Db::builder();
    builder.map("blog_post", "content", "body");
    let db = builder.build(Sqlite::open(&path)).await.unwrap();

    let before = db.catalog();
    admin
        .execute_batch(
            "CREATE TABLE marketplace_review (
                id INTEGER PRIMARY KEY,
                rating INTEGER NOT NULL
            );
            ALTER TABLE blog_post DROP COLUMN body;",
        )
        .unwrap();

    // Until refreshed, the gateway serves the old snapshot.
    let err = db
        .create("marketplace_review", record!("rating" => 5))
        .await
        .unwrap_err();
    assert!(err.is_unknown_table());

    let after = db.refresh().await.unwrap();
    assert!(before.get("marketplace_review").is_none());
    assert!(after.get("marketplace_review").is_some());
    assert!(before.lookup("blog_post").unwrap().has_column("body"));
    assert!(!after.lookup("blog_post").unwrap().has_column("body"));

    let stale = db.mapper().stale(&after);
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].external, "content");

    let review = db
        .create("marketplace_review", record!("rating" => 5))
        .await
        .unwrap();
    assert_eq!(review.key, Key::from(1));

    // The stale alias no longer resolves to a column and is dropped.
    let post = db
        .create("blog_post", record!("title" => "Hi", "content" => "gone"))
        .await
        .unwrap();
    assert_eq!(post.warnings.len(), 1);
    assert_eq!(post.warnings[0].field(), "content");

    drop(admin);
    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn unreachable_store_fails_introspection() {
    let dir = std::env::temp_dir().join("kiri-missing-dir");
    let _ = std::fs::remove_dir_all(&dir);

    let err = Db::builder()
        .build(Sqlite::open(dir.join("nested").join("db.sqlite3")))
        .await
        .unwrap_err();

    assert!(err.is_schema_introspection());
    assert!(err
        .to_string()
        .starts_with("schema introspection failed: unable to connect to the store: "));
}

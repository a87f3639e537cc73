//! The marketplace schema the integration tests run against.

/// Tables of the marketplace service, as a deployment would declare them.
pub const MARKETPLACE: &str = r#"
CREATE TABLE marketplace_category (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT
);

CREATE TABLE marketplace_service (
    id INTEGER PRIMARY KEY,
    category_id INTEGER REFERENCES marketplace_category(id) ON DELETE SET NULL,
    title TEXT NOT NULL,
    description TEXT,
    price DECIMAL(10, 2) NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    created_at DATETIME
);

CREATE TABLE marketplace_booking (
    id INTEGER PRIMARY KEY,
    service_id INTEGER NOT NULL REFERENCES marketplace_service(id) ON DELETE CASCADE,
    status VARCHAR(16) NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'confirmed', 'cancelled')),
    notes TEXT
);

CREATE TABLE auth_user (
    id INTEGER PRIMARY KEY,
    username VARCHAR(150) NOT NULL UNIQUE,
    email VARCHAR(254)
);

CREATE TABLE users_profile (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL UNIQUE REFERENCES auth_user(id) ON DELETE RESTRICT,
    bio TEXT
);

CREATE TABLE blog_post (
    id INTEGER PRIMARY KEY,
    user_id INTEGER REFERENCES auth_user(id),
    title TEXT NOT NULL,
    body TEXT
);

CREATE TABLE blog_comment (
    id INTEGER PRIMARY KEY,
    post_id INTEGER NOT NULL REFERENCES blog_post(id) ON DELETE CASCADE,
    text TEXT NOT NULL
);

CREATE TABLE academy_learningpathway (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL
);

CREATE TABLE academy_modulestep (
    id INTEGER PRIMARY KEY,
    pathway_id INTEGER NOT NULL REFERENCES academy_learningpathway(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    "order" INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE catalog_translation (
    item_id INTEGER NOT NULL,
    locale TEXT NOT NULL,
    label TEXT NOT NULL,
    PRIMARY KEY (item_id, locale)
);
"#;

/// Aliases older clients send for the blog tables.
pub fn blog_aliases(builder: &mut kiri::db::Builder) -> &mut kiri::db::Builder {
    builder
        .map_first_of("blog_post", "content", ["body", "text"])
        .map_first_of("blog_post", "author_id", ["user_id", "author"])
        .map("blog_comment", "content", "text")
}

/// A path in the temp directory unique to this process and `name`.
pub fn temp_db_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("kiri-{name}-{}.sqlite3", std::process::id()))
}

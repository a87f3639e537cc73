#![forbid(unsafe_code)]

pub mod config;
pub use config::Config;

mod http;

mod middleware;

pub mod routes;
pub use routes::Routes;

pub mod telemetry;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use kiri::Db;
use std::sync::Arc;

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Db,
    pub routes: Arc<Routes>,
}

impl AppState {
    /// State with the default resource aliases.
    pub fn new(db: Db) -> Self {
        Self::with_routes(db, Routes::default())
    }

    pub fn with_routes(db: Db, routes: Routes) -> Self {
        Self {
            db,
            routes: Arc::new(routes),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::root))
        .route("/tables", get(http::handlers::tables))
        .route("/admin/refresh", post(http::handlers::refresh))
        .route(
            "/:resource",
            get(http::handlers::list).post(http::handlers::create),
        )
        .route(
            "/:resource/:id",
            get(http::handlers::read)
                .put(http::handlers::update)
                .delete(http::handlers::delete),
        )
        .route(
            "/:parent/:id/:child",
            post(http::handlers::create_child),
        )
        .layer(from_fn(middleware::request_tracing::request_tracing_middleware))
        .with_state(state)
}

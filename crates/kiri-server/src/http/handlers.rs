use super::response::{api_error_response, error_json, put_warning_headers, ApiFailure};
use crate::AppState;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kiri::{Error, FieldWarning, Key, Page, Record, Value};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    skip: Option<u64>,
    limit: Option<u64>,
}

pub(crate) async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to Kiri.ng API" }))
}

pub(crate) async fn tables(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "tables": state.db.tables() }))
}

pub(crate) async fn refresh(State(state): State<AppState>) -> Result<Response, ApiFailure> {
    let catalog = state.db.refresh().await?;
    Ok(Json(json!({ "tables": catalog.list_tables() })).into_response())
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, ApiFailure> {
    let table = state.routes.resolve(&resource);
    let Query(params) = params.map_err(|rejection| {
        Error::invalid_pagination(format!(
            "skip and limit must be non-negative integers: {}",
            rejection.body_text()
        ))
    })?;
    let page = Page::from_query(params.skip, params.limit)?;

    let rows = state.db.list(table, page).await?;
    let body: Vec<serde_json::Value> = rows.iter().map(Record::to_json).collect();

    Ok(Json(body).into_response())
}

pub(crate) async fn read(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Response, ApiFailure> {
    let table = state.routes.resolve(&resource);
    let record = state.db.read(table, path_key(&id)).await?;

    Ok(Json(record.to_json()).into_response())
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let table = state.routes.resolve(&resource);
    let Some((payload, not_scalar)) = decode(payload) else {
        return Ok(invalid_payload());
    };

    let created = state.db.create(table, payload).await?;

    Ok(written(
        StatusCode::CREATED,
        &created.record,
        not_scalar.into_iter().chain(created.warnings).collect(),
    ))
}

pub(crate) async fn create_child(
    State(state): State<AppState>,
    Path((parent, id, child)): Path<(String, String, String)>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let parent = state.routes.resolve(&parent);
    let child = state.routes.resolve(&child);
    let Some((payload, not_scalar)) = decode(payload) else {
        return Ok(invalid_payload());
    };

    let created = state
        .db
        .create_child(parent, path_key(&id), child, payload)
        .await?;

    Ok(written(
        StatusCode::CREATED,
        &created.record,
        not_scalar.into_iter().chain(created.warnings).collect(),
    ))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let table = state.routes.resolve(&resource);
    let Some((payload, not_scalar)) = decode(payload) else {
        return Ok(invalid_payload());
    };

    let updated = state.db.update(table, path_key(&id), payload).await?;

    Ok(written(
        StatusCode::OK,
        &updated.record,
        not_scalar.into_iter().chain(updated.warnings).collect(),
    ))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Response, ApiFailure> {
    let table = state.routes.resolve(&resource);
    state.db.delete(table, path_key(&id)).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Each comma-separated component of the id segment, uncoerced.
fn path_key(id: &str) -> Key {
    Key::new(Key::split_path(id).into_iter().map(Value::from).collect())
}

/// Splits a JSON object into a record and warnings for non-scalar members.
///
/// Bodies that are not well-formed JSON objects yield `None`.
fn decode(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Option<(Record, Vec<FieldWarning>)> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!(rejection = %rejection.body_text(), "unreadable request body");
            return None;
        }
    };
    let object = payload.as_object()?;
    let (record, rejected) = Record::from_json(object);

    let warnings = rejected
        .into_iter()
        .map(|field| FieldWarning::NotScalar { field })
        .collect();

    Some((record, warnings))
}

fn written(status: StatusCode, record: &Record, warnings: Vec<FieldWarning>) -> Response {
    let mut response = (status, Json(record.to_json())).into_response();
    put_warning_headers(response.headers_mut(), &warnings);
    response
}

fn invalid_payload() -> Response {
    api_error_response(
        StatusCode::BAD_REQUEST,
        error_json(
            "invalid_payload",
            "request body must be a JSON object",
            serde_json::Value::Null,
        ),
    )
}

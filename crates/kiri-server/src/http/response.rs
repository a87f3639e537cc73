use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use kiri::{Error, FieldWarning};
use serde::Serialize;
use serde_json::{json, Value};

/// Response header listing the payload fields that were not written.
pub(crate) const DROPPED_FIELDS_HEADER: &str = "x-kiri-dropped-fields";

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ApiError {
    pub(crate) code: &'static str,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub(crate) details: Value,
}

pub(crate) fn api_error_response(status: StatusCode, err: ApiError) -> Response {
    let body = Json(json!({ "error": err }));
    (status, body).into_response()
}

pub(crate) fn error_json(code: &'static str, message: &str, details: Value) -> ApiError {
    ApiError {
        code,
        message: message.to_string(),
        details,
    }
}

/// The status and error code a gateway error is reported with.
pub(crate) fn classify(err: &Error) -> (StatusCode, &'static str) {
    if err.is_unknown_table() {
        (StatusCode::NOT_FOUND, "unknown_table")
    } else if err.is_record_not_found() {
        (StatusCode::NOT_FOUND, "not_found")
    } else if err.is_required_field_missing() {
        (StatusCode::BAD_REQUEST, "required_field_missing")
    } else if err.is_invalid_pagination() {
        (StatusCode::BAD_REQUEST, "invalid_pagination")
    } else if err.is_integrity_constraint() {
        (StatusCode::CONFLICT, "integrity_constraint")
    } else if err.is_store_unavailable() {
        (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "internal")
    }
}

/// A gateway error on its way to the client.
#[derive(Debug)]
pub(crate) struct ApiFailure(pub(crate) Error);

impl From<Error> for ApiFailure {
    fn from(err: Error) -> Self {
        ApiFailure(err)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, code) = classify(&self.0);

        if status.is_server_error() {
            tracing::error!(error = %self.0, code, "request failed");
        } else {
            tracing::debug!(error = %self.0, code, "request rejected");
        }

        let details = match self.0.missing_fields() {
            Some(fields) => json!({ "missing": fields }),
            None => Value::Null,
        };

        api_error_response(status, error_json(code, &self.0.to_string(), details))
    }
}

/// Adds the dropped-fields header when any field was dropped.
pub(crate) fn put_warning_headers(headers: &mut HeaderMap, warnings: &[FieldWarning]) {
    if warnings.is_empty() {
        return;
    }

    let fields = warnings
        .iter()
        .map(FieldWarning::field)
        .collect::<Vec<_>>()
        .join(",");

    if let Ok(value) = HeaderValue::from_str(&fields) {
        headers.insert(DROPPED_FIELDS_HEADER, value);
    }
}

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::SentinelError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps the error taxonomy onto HTTP status codes: bad input is the
/// caller's fault, a missing scan is 404, a collaborator failure is a bad
/// gateway, everything else is internal.
pub fn error_response(err: &SentinelError) -> (StatusCode, Json<Value>) {
    let status = match err {
        SentinelError::Validation(_) => StatusCode::BAD_REQUEST,
        SentinelError::NotFound(_) => StatusCode::NOT_FOUND,
        SentinelError::Collaborator(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

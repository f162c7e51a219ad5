use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::models::error_response;
use crate::api::AppState;
use crate::errors::SentinelError;
use crate::scanner::SubmitRequest;

pub async fn create_scan(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let record = state
        .submission_flow()
        .submit(&req)
        .await
        .map_err(|e| error_response(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(&record).map_err(|e| error_response(&SentinelError::Json(e)))?),
    ))
}

pub async fn list_scans(State(state): State<AppState>) -> Json<Value> {
    let scans = state.store.get_all();
    Json(json!({ "scans": scans, "total": scans.len() }))
}

pub async fn get_scan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.store.get_by_id(&id) {
        Some(record) => Ok(Json(json!(record))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Scan not found"})),
        )),
    }
}

pub async fn get_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let record = state
        .viewer()
        .resolve(&id)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(json!(record)))
}

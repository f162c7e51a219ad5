use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::AppState;

pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    // Local history first; the collaborator only when the id is unknown here.
    if let Some(record) = state.store.get_by_id(&id) {
        return Ok(Json(json!({
            "id": record.id,
            "status": record.status,
            "progress": record.progress,
            "created_at": record.created_at,
            "completed_at": record.completed_at,
        })));
    }

    match state.executor.get_job_status(&id).await {
        Ok(job) => Ok(Json(json!({
            "id": job.job_id,
            "status": job.status,
            "progress": job.progress,
            "created_at": job.created_at,
        }))),
        Err(_) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Scan not found"})),
        )),
    }
}

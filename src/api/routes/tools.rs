use axum::Json;
use serde_json::{json, Value};

use crate::scanner::registered_tools;

pub async fn list_tools() -> Json<Value> {
    let tools = registered_tools();
    Json(json!({ "tools": tools, "total": tools.len() }))
}

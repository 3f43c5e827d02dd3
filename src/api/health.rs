use axum::Json;
use serde_json::{json, Value};

/// Liveness check; deliberately does not touch the database
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "DayFlow HR API is running"
    }))
}

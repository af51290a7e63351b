pub mod analyze;
pub mod recommend;

use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "app": "clinic-triage-backend"
    }))
}

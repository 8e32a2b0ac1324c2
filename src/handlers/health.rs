use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::ContentSearch;
use crate::state::EnvironmentCheck;

pub async fn health(
    State(search): State<Arc<dyn ContentSearch>>,
    State(environment): State<EnvironmentCheck>,
) -> Response {
    match search.probe().await {
        Ok(record_count) => Json(json!({
            "status": "ok",
            "message": "All systems operational",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "environment": environment,
            "database": {
                "connected": true,
                "recordCount": record_count,
            },
        }))
        .into_response(),
        Err(e) => {
            log::error!("Health check failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": "Database connection failed",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ChatError};
use crate::models::{ChatAnswer, ChatRequest};
use crate::services::{ClientInfo, RagPipeline};

pub async fn post_chat(
    State(rag): State<Arc<RagPipeline>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatAnswer>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::debug!("Rejected chat body: {rejection}");
            return Err(ChatError::InvalidMessage.into());
        }
    };

    let client = ClientInfo::from_headers(&headers);
    let message = request.message.unwrap_or_default();
    let answer = rag.answer(&message, &client).await?;
    Ok(Json(answer))
}

pub async fn chat_status() -> Json<Value> {
    Json(json!({
        "message": "Chat API is working",
        "status": "ok",
    }))
}

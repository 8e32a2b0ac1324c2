use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

pub const INVALID_MESSAGE: &str = "메시지를 입력해주세요.";
pub const SEARCH_FAILED: &str = "검색 중 오류가 발생했습니다.";
pub const GENERATION_FAILED: &str = "답변 생성 중 오류가 발생했습니다.";

/// Failures talking to Supabase or OpenAI.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("embedding request failed: {0}")]
    Embedding(String),
    #[error("chat completion failed: {0}")]
    Generation(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("supabase returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("메시지를 입력해주세요.")]
    InvalidMessage,
    #[error("search failed: {0}")]
    Search(ServiceError),
    #[error("answer generation failed: {0}")]
    Upstream(ServiceError),
}

/// Error surface of the JSON API. Every variant renders as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::InvalidMessage => ApiError::BadRequest(INVALID_MESSAGE.to_string()),
            ChatError::Search(_) => ApiError::Internal(SEARCH_FAILED.to_string()),
            ChatError::Upstream(_) => ApiError::Internal(GENERATION_FAILED.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        log::error!("Service error: {e}");
        ApiError::Internal(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials | AuthError::Unauthorized => {
                ApiError::Unauthorized(e.to_string())
            }
            other => {
                log::error!("Auth error: {other}");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

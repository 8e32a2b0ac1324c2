use leptos::prelude::*;
use thiserror::Error;

pub const SESSION_COOKIE_NAME: &str = "admin_session";
pub const ADMIN_SUBJECT: &str = "admin";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("비밀번호가 올바르지 않습니다.")]
    InvalidCredentials,
    #[error("관리자 로그인이 필요합니다.")]
    Unauthorized,
    #[error("Failed to verify password hash: {0}")]
    PasswordHash(String),
    #[error("Failed to create session token: {0}")]
    TokenCreation(String),
    #[error("Cookie error: {0}")]
    CookieError(String),
}

pub fn to_server_error(e: AuthError) -> ServerFnError {
    ServerFnError::ServerError(e.to_string())
}

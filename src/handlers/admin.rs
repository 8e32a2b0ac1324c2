use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, AuthSettings};
use crate::error::ApiError;
use crate::models::{AnalyticsReport, LogsPage};
use crate::services::AnalyticsService;

const INVALID_LOGS_QUERY: &str = "잘못된 페이지 요청입니다.";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn login(
    State(settings): State<Arc<AuthSettings>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let cookie = auth::login(&settings, &body.password)?;
    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (
        jar.add(auth::expired_session_cookie()),
        Json(json!({ "success": true })),
    )
}

pub async fn session(
    State(settings): State<Arc<AuthSettings>>,
    jar: CookieJar,
) -> Json<Value> {
    Json(json!({ "authenticated": auth::has_admin_session(&jar, &settings) }))
}

pub async fn analytics(
    State(analytics): State<Arc<AnalyticsService>>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    Ok(Json(analytics.report().await?))
}

pub async fn logs(
    State(analytics): State<Arc<AnalyticsService>>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<LogsPage>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        log::debug!("Rejected logs query: {rejection}");
        ApiError::BadRequest(INVALID_LOGS_QUERY.to_string())
    })?;
    Ok(Json(analytics.logs(query.page, query.limit).await?))
}

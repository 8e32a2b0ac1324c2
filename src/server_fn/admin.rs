use leptos::prelude::*;

use crate::models::{AnalyticsReport, LogsPage};

#[server(GetAnalytics, "/api")]
pub async fn get_analytics() -> Result<AnalyticsReport, ServerFnError> {
    use crate::auth::require_admin_session;
    use crate::error::ApiError;

    let state = require_admin_session().await?;
    state
        .analytics
        .report()
        .await
        .map_err(|e| ApiError::from(e).into())
}

#[server(GetLogs, "/api")]
pub async fn get_logs(page: u32, limit: u32) -> Result<LogsPage, ServerFnError> {
    use crate::auth::require_admin_session;
    use crate::error::ApiError;

    let state = require_admin_session().await?;
    state
        .analytics
        .logs(Some(page), Some(limit))
        .await
        .map_err(|e| ApiError::from(e).into())
}

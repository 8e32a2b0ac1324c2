use std::collections::BTreeMap;

use leptos::prelude::*;

use crate::models::{CommunityContent, ContentFilter, PostDetails};

#[cfg(feature = "ssr")]
fn fetch_failed(e: crate::error::ServiceError) -> ServerFnError {
    log::error!("Error fetching contents: {e}");
    ServerFnError::ServerError("콘텐츠 조회 중 오류가 발생했습니다.".to_string())
}

#[server(ListContents, "/api")]
pub async fn list_contents(filter: ContentFilter) -> Result<Vec<CommunityContent>, ServerFnError> {
    let state = crate::auth::api_state()?;
    state.contents.list(&filter).await.map_err(fetch_failed)
}

#[server(ContentsByIds, "/api")]
pub async fn contents_by_ids(ids: Vec<i64>) -> Result<Vec<CommunityContent>, ServerFnError> {
    let state = crate::auth::api_state()?;
    state.contents.by_ids(&ids).await.map_err(fetch_failed)
}

#[server(ContentsByAuthor, "/api")]
pub async fn contents_by_author(author: String) -> Result<Vec<CommunityContent>, ServerFnError> {
    let state = crate::auth::api_state()?;
    state.contents.by_author(&author).await.map_err(fetch_failed)
}

#[server(FetchPostDetails, "/api")]
pub async fn fetch_post_details(
    ids: Vec<i64>,
) -> Result<BTreeMap<i64, PostDetails>, ServerFnError> {
    let state = crate::auth::api_state()?;
    state.contents.post_details(&ids).await.map_err(|e| {
        log::error!("Error fetching post details: {e}");
        ServerFnError::ServerError("본문 조회 중 오류가 발생했습니다.".to_string())
    })
}

#[server(UpdatePostMonth, "/api")]
pub async fn update_post_month(id: i64, post_month: Option<i32>) -> Result<(), ServerFnError> {
    use crate::auth::require_admin_session;
    use crate::models::is_valid_post_month;

    if !is_valid_post_month(post_month) {
        return Err(ServerFnError::ServerError(
            "여행 월은 0부터 12 사이여야 합니다.".to_string(),
        ));
    }
    let state = require_admin_session().await?;
    state.contents.update_post_month(id, post_month).await.map_err(|e| {
        log::error!("Error updating post_month: {e}");
        ServerFnError::ServerError("업데이트 중 오류가 발생했습니다.".to_string())
    })
}

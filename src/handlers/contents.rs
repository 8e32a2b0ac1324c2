use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ServiceError};
use crate::models::{is_valid_post_month, CommunityContent, ContentFilter, PostDetails};
use crate::services::contents::exclude_qa;
use crate::services::ContentStore;

pub const CONTENT_FETCH_FAILED: &str = "콘텐츠 조회 중 오류가 발생했습니다.";
pub const DETAILS_FETCH_FAILED: &str = "본문 조회 중 오류가 발생했습니다.";
pub const UPDATE_FAILED: &str = "업데이트 중 오류가 발생했습니다.";

#[derive(Debug, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
    #[serde(default)]
    pub exclude_qa: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PostMonthUpdate {
    pub post_month: Option<i32>,
}

fn failed(message: &'static str) -> impl FnOnce(ServiceError) -> ApiError {
    move |e| {
        log::error!("{message} {e}");
        ApiError::Internal(message.to_string())
    }
}

pub async fn query(
    State(store): State<Arc<dyn ContentStore>>,
    Json(filter): Json<ContentFilter>,
) -> Result<Json<Vec<CommunityContent>>, ApiError> {
    let contents = store.list(&filter).await.map_err(failed(CONTENT_FETCH_FAILED))?;
    Ok(Json(contents))
}

pub async fn by_ids(
    State(store): State<Arc<dyn ContentStore>>,
    Json(request): Json<IdsRequest>,
) -> Result<Json<Vec<CommunityContent>>, ApiError> {
    let contents = store
        .by_ids(&request.ids)
        .await
        .map_err(failed(CONTENT_FETCH_FAILED))?;
    Ok(Json(contents))
}

pub async fn by_author(
    State(store): State<Arc<dyn ContentStore>>,
    Path(author): Path<String>,
    Query(query): Query<AuthorQuery>,
) -> Result<Json<Vec<CommunityContent>>, ApiError> {
    let contents = store
        .by_author(&author)
        .await
        .map_err(failed(CONTENT_FETCH_FAILED))?;
    let contents = if query.exclude_qa {
        exclude_qa(contents)
    } else {
        contents
    };
    Ok(Json(contents))
}

pub async fn details(
    State(store): State<Arc<dyn ContentStore>>,
    Json(request): Json<IdsRequest>,
) -> Result<Json<BTreeMap<i64, PostDetails>>, ApiError> {
    let details = store
        .post_details(&request.ids)
        .await
        .map_err(failed(DETAILS_FETCH_FAILED))?;
    Ok(Json(details))
}

pub async fn update_post_month(
    State(store): State<Arc<dyn ContentStore>>,
    Path(id): Path<i64>,
    Json(update): Json<PostMonthUpdate>,
) -> Result<Json<PostMonthUpdate>, ApiError> {
    if !is_valid_post_month(update.post_month) {
        return Err(ApiError::BadRequest(
            "여행 월은 0부터 12 사이여야 합니다.".to_string(),
        ));
    }
    store
        .update_post_month(id, update.post_month)
        .await
        .map_err(failed(UPDATE_FAILED))?;
    Ok(Json(update))
}

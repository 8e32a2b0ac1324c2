pub mod admin;
pub mod chat;
pub mod contents;
pub mod health;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::auth::middleware::require_admin;
use crate::state::ApiState;

/// JSON API routes. Admin and write routes sit behind `require_admin`.
pub fn api_router<S>(state: ApiState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/api/admin/analytics", get(admin::analytics))
        .route("/api/admin/logs", get(admin::logs))
        .route(
            "/api/contents/{id}/post-month",
            patch(contents::update_post_month),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/api/chat", post(chat::post_chat).get(chat::chat_status))
        .route("/api/health", get(health::health))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/session", get(admin::session))
        .route("/api/contents/query", post(contents::query))
        .route("/api/contents/by-ids", post(contents::by_ids))
        .route("/api/contents/author/{author}", get(contents::by_author))
        .route("/api/contents/details", post(contents::details))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::server::tests::settings_for;
    use crate::config::SearchSettings;
    use crate::error::ServiceError;
    use crate::models::CommunityContent;
    use crate::services::chat_logs::MockChatLogStore;
    use crate::services::contents::MockContentStore;
    use crate::services::embeddings::MockEmbedder;
    use crate::services::generation::MockChatModel;
    use crate::services::prompt::travel_match;
    use crate::services::rag::tests::untouched;
    use crate::services::search::MockContentSearch;
    use crate::services::{AnalyticsService, RagPipeline};
    use crate::state::EnvironmentCheck;

    const PASSWORD: &str = "grindelwald";

    struct Mocks {
        embedder: MockEmbedder,
        search: MockContentSearch,
        model: MockChatModel,
        logs: MockChatLogStore,
        analytics_logs: MockChatLogStore,
        health_search: MockContentSearch,
        contents: MockContentStore,
    }

    impl Mocks {
        fn new() -> Self {
            let (embedder, search, model, logs) = untouched();
            Self {
                embedder,
                search,
                model,
                logs,
                analytics_logs: MockChatLogStore::new(),
                health_search: MockContentSearch::new(),
                contents: MockContentStore::new(),
            }
        }

        fn into_router(self) -> Router {
            let rag = RagPipeline::new(
                Arc::new(self.embedder),
                Arc::new(self.search),
                Arc::new(self.model),
                Arc::new(self.logs),
                SearchSettings::default(),
            );
            let state = ApiState {
                rag: Arc::new(rag),
                analytics: Arc::new(AnalyticsService::new(Arc::new(self.analytics_logs))),
                search: Arc::new(self.health_search),
                contents: Arc::new(self.contents),
                auth: Arc::new(settings_for(PASSWORD)),
                environment: EnvironmentCheck {
                    supabase_url: true,
                    supabase_key: true,
                    openai_key: false,
                },
            };
            api_router(state)
        }
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login_cookie(router: &Router) -> String {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/login",
                json!({ "password": PASSWORD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_chat_success_returns_answer_and_sources() {
        let mut mocks = Mocks::new();
        mocks.embedder.checkpoint();
        mocks.search.checkpoint();
        mocks.model.checkpoint();
        mocks.logs.checkpoint();
        mocks.embedder.expect_embed().times(1).returning(|_| Ok(vec![0.3]));
        mocks
            .search
            .expect_match_content()
            .times(1)
            .returning(|_, _| Ok(vec![travel_match(9, "그린델발트", 0.873)]));
        mocks
            .model
            .expect_complete()
            .times(1)
            .returning(|_, _| Ok("피르스트에 꼭 가보세요.".to_string()));
        mocks
            .logs
            .expect_insert()
            .withf(|log| !log.error_occurred && log.user_agent == "unknown")
            .times(1)
            .returning(|_| Ok(()));

        let response = mocks
            .into_router()
            .oneshot(json_request(
                "POST",
                "/api/chat",
                json!({ "message": "그린델발트 추천" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["response"], "피르스트에 꼭 가보세요.");
        assert_eq!(body["sources"][0]["title"], "그린델발트");
        assert_eq!(body["sources"][0]["similarity"], 0.873);
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_and_missing_messages() {
        for body in [json!({ "message": "   " }), json!({}), json!({ "message": 42 })] {
            let response = Mocks::new()
                .into_router()
                .oneshot(json_request("POST", "/api/chat", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await["error"], "메시지를 입력해주세요.");
        }
    }

    #[tokio::test]
    async fn test_chat_search_failure_is_500_without_generation() {
        let mut mocks = Mocks::new();
        mocks.embedder.checkpoint();
        mocks.search.checkpoint();
        mocks.logs.checkpoint();
        mocks.embedder.expect_embed().returning(|_| Ok(vec![0.3]));
        mocks.search.expect_match_content().returning(|_, _| {
            Err(ServiceError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        });
        mocks
            .logs
            .expect_insert()
            .withf(|log| log.error_occurred)
            .times(1)
            .returning(|_| Ok(()));

        let response = mocks
            .into_router()
            .oneshot(json_request("POST", "/api/chat", json!({ "message": "베른" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "검색 중 오류가 발생했습니다.");
    }

    #[tokio::test]
    async fn test_chat_status_endpoint() {
        let response = Mocks::new()
            .into_router()
            .oneshot(get_request("/api/chat", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Chat API is working", "status": "ok" })
        );
    }

    #[tokio::test]
    async fn test_health_reports_database_and_environment() {
        let mut mocks = Mocks::new();
        mocks.health_search.expect_probe().returning(|| Ok(1));
        let response = mocks
            .into_router()
            .oneshot(get_request("/api/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["recordCount"], 1);
        assert_eq!(body["environment"]["supabaseUrl"], true);
        assert_eq!(body["environment"]["openaiKey"], false);

        let mut mocks = Mocks::new();
        mocks
            .health_search
            .expect_probe()
            .returning(|| Err(ServiceError::Request("connection refused".to_string())));
        let response = mocks
            .into_router()
            .oneshot(get_request("/api/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["status"], "error");
    }

    #[tokio::test]
    async fn test_admin_routes_require_session() {
        let router = Mocks::new().into_router();
        for uri in ["/api/admin/analytics", "/api/admin/logs?page=1&limit=10"] {
            let response = router.clone().oneshot(get_request(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = router
            .oneshot(get_request("/api/admin/logs", Some("admin_session=forged")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let response = Mocks::new()
            .into_router()
            .oneshot(json_request(
                "POST",
                "/api/admin/login",
                json!({ "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_session_and_logout() {
        let router = Mocks::new().into_router();
        let cookie = login_cookie(&router).await;
        assert!(cookie.starts_with("admin_session="));

        let response = router
            .clone()
            .oneshot(get_request("/api/admin/session", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["authenticated"], true);

        let response = router
            .clone()
            .oneshot(get_request("/api/admin/session", None))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["authenticated"], false);

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/admin/logout")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let cleared = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(cleared.starts_with("admin_session=;"));
    }

    #[tokio::test]
    async fn test_logs_pagination_with_session() {
        let mut mocks = Mocks::new();
        mocks
            .analytics_logs
            .expect_page()
            .withf(|from, to| *from == 10 && *to == 19)
            .returning(|_, _| Ok((Vec::new(), 23)));
        let router = mocks.into_router();
        let cookie = login_cookie(&router).await;

        let response = router
            .oneshot(get_request("/api/admin/logs?page=2&limit=10", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["pagination"],
            json!({ "page": 2, "limit": 10, "total": 23, "totalPages": 3 })
        );
    }

    #[tokio::test]
    async fn test_logs_past_the_last_page_are_empty() {
        let mut mocks = Mocks::new();
        mocks
            .analytics_logs
            .expect_page()
            .withf(|from, to| *from == 980 && *to == 989)
            .returning(|_, _| Ok((Vec::new(), 45)));
        let router = mocks.into_router();
        let cookie = login_cookie(&router).await;

        let response = router
            .oneshot(get_request("/api/admin/logs?page=99", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["logs"], json!([]));
        assert_eq!(
            body["pagination"],
            json!({ "page": 99, "limit": 10, "total": 45, "totalPages": 5 })
        );
    }

    #[tokio::test]
    async fn test_malformed_logs_query_is_a_json_400() {
        let router = Mocks::new().into_router();
        let cookie = login_cookie(&router).await;

        let response = router
            .oneshot(get_request("/api/admin/logs?page=abc", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "잘못된 페이지 요청입니다.");
    }

    #[tokio::test]
    async fn test_post_month_update_validates_and_requires_admin() {
        let mut mocks = Mocks::new();
        mocks
            .contents
            .expect_update_post_month()
            .withf(|id, month| *id == 67838 && *month == Some(7))
            .times(1)
            .returning(|_, _| Ok(()));
        let router = mocks.into_router();

        let unauthenticated = router
            .clone()
            .oneshot(json_request(
                "PATCH",
                "/api/contents/67838/post-month",
                json!({ "post_month": 7 }),
            ))
            .await
            .unwrap();
        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

        let cookie = login_cookie(&router).await;
        let patch = |month: Value| {
            Request::builder()
                .method("PATCH")
                .uri("/api/contents/67838/post-month")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, &cookie)
                .body(Body::from(json!({ "post_month": month }).to_string()))
                .unwrap()
        };

        let invalid = router.clone().oneshot(patch(json!(13))).await.unwrap();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let ok = router.oneshot(patch(json!(7))).await.unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(body_json(ok).await, json!({ "post_month": 7 }));
    }

    #[tokio::test]
    async fn test_author_contents_can_exclude_qa() {
        let mut mocks = Mocks::new();
        mocks
            .contents
            .expect_by_author()
            .withf(|author| author == "알프스러버")
            .returning(|_| {
                Ok(["❓질문게시판 Q&A", "★인터라켄★"]
                    .iter()
                    .enumerate()
                    .map(|(i, category)| CommunityContent {
                        id: i as i64,
                        title: format!("글 {i}"),
                        category: Some(category.to_string()),
                        author: Some("알프스러버".to_string()),
                        date: None,
                        view_count: None,
                        comments: None,
                        url: None,
                        post_month: None,
                    })
                    .collect())
            });
        let router = mocks.into_router();

        let encoded = urlencoding::encode("알프스러버");
        let response = router
            .clone()
            .oneshot(get_request(
                &format!("/api/contents/author/{encoded}?exclude_qa=true"),
                None,
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["category"], "★인터라켄★");

        let response = router
            .oneshot(get_request(&format!("/api/contents/author/{encoded}"), None))
            .await
            .unwrap();
        assert_eq!(body_json(response).await.as_array().map(Vec::len), Some(2));
    }
}

use leptos::prelude::*;

use crate::models::ChatAnswer;

#[server(AskQuestion, "/api")]
pub async fn ask_question(message: String) -> Result<ChatAnswer, ServerFnError> {
    use http::HeaderMap;

    use crate::auth::api_state;
    use crate::error::ApiError;
    use crate::services::ClientInfo;

    let state = api_state()?;
    let headers = leptos_axum::extract::<HeaderMap>()
        .await
        .unwrap_or_default();

    state
        .rag
        .answer(&message, &ClientInfo::from_headers(&headers))
        .await
        .map_err(|e| ApiError::from(e).into())
}

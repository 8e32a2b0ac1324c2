use leptos::prelude::*;

#[cfg(feature = "ssr")]
use crate::state::ApiState;

#[cfg(feature = "ssr")]
pub fn api_state() -> Result<ApiState, ServerFnError> {
    use_context::<crate::state::AppState>()
        .map(|state| state.api)
        .ok_or_else(|| ServerFnError::new("App state not found"))
}

/// Server-function counterpart of the `require_admin` middleware.
#[cfg(feature = "ssr")]
pub async fn require_admin_session() -> Result<ApiState, ServerFnError> {
    use super::types::{to_server_error, AuthError};
    use axum_extra::extract::cookie::CookieJar;

    let state = api_state()?;
    let jar = leptos_axum::extract::<CookieJar>()
        .await
        .map_err(|e| ServerFnError::new(format!("Cookie jar error: {e}")))?;

    if super::has_admin_session(&jar, &state.auth) {
        Ok(state)
    } else {
        Err(to_server_error(AuthError::Unauthorized))
    }
}

#[cfg(feature = "ssr")]
fn set_cookie(cookie: axum_extra::extract::cookie::Cookie<'static>) -> Result<(), ServerFnError> {
    use super::types::{to_server_error, AuthError};
    use http::{HeaderName, HeaderValue};

    let response_options = use_context::<leptos_axum::ResponseOptions>()
        .ok_or_else(|| ServerFnError::new("Response options not found"))?;
    let cookie_value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| to_server_error(AuthError::CookieError(e.to_string())))?;
    response_options.insert_header(HeaderName::from_static("set-cookie"), cookie_value);
    Ok(())
}

#[server(AdminLogin, "/api")]
pub async fn admin_login(password: String) -> Result<(), ServerFnError> {
    use super::types::to_server_error;

    let state = api_state()?;
    let cookie = super::login(&state.auth, &password).map_err(to_server_error)?;
    set_cookie(cookie)?;
    log::info!("Login successful, session cookie set");
    Ok(())
}

#[server(AdminLogout, "/api")]
pub async fn admin_logout() -> Result<(), ServerFnError> {
    log::info!("Clearing admin session");
    set_cookie(super::expired_session_cookie())
}

#[server(AdminSession, "/api")]
pub async fn admin_session() -> Result<bool, ServerFnError> {
    use axum_extra::extract::cookie::CookieJar;

    let state = api_state()?;
    let jar = match leptos_axum::extract::<CookieJar>().await {
        Ok(jar) => jar,
        Err(_) => return Ok(false),
    };
    Ok(super::has_admin_session(&jar, &state.auth))
}

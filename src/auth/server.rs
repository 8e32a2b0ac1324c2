use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::{create_session_token, secure, verify_session_token, AuthError, SESSION_COOKIE_NAME};
use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub password_hash_b64: String,
    pub jwt_secret: String,
    pub session_hours: i64,
}

impl AuthSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            password_hash_b64: config.admin_password_hash.clone(),
            jwt_secret: config.jwt_secret.clone(),
            session_hours: config.session_hours,
        }
    }
}

pub fn session_cookie(token: String, hours: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::hours(hours))
        .build()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::seconds(-1))
        .build()
}

/// Exchanges the admin password for a session cookie.
pub fn login(settings: &AuthSettings, password: &str) -> Result<Cookie<'static>, AuthError> {
    if !secure::verify_password(password, &settings.password_hash_b64)? {
        log::warn!("Rejected admin login attempt");
        return Err(AuthError::InvalidCredentials);
    }
    let token = create_session_token(&settings.jwt_secret, settings.session_hours)?;
    log::info!("Admin session created");
    Ok(session_cookie(token, settings.session_hours))
}

pub fn has_admin_session(jar: &CookieJar, settings: &AuthSettings) -> bool {
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| verify_session_token(c.value(), &settings.jwt_secret).is_ok())
        .unwrap_or(false)
}

pub mod middleware {
    use std::sync::Arc;

    use axum::{
        extract::{Request, State},
        middleware::Next,
        response::{IntoResponse, Response},
    };
    use axum_extra::extract::CookieJar;
    use log::debug;

    use super::{has_admin_session, AuthSettings};
    use crate::auth::AuthError;
    use crate::error::ApiError;

    /// Rejects requests without a valid `admin_session` cookie with 401.
    pub async fn require_admin(
        cookie_jar: CookieJar,
        State(settings): State<Arc<AuthSettings>>,
        request: Request,
        next: Next,
    ) -> Response {
        debug!(
            "Admin middleware - Processing request to: {} {}",
            request.method(),
            request.uri()
        );

        if has_admin_session(&cookie_jar, &settings) {
            next.run(request).await
        } else {
            debug!("Admin middleware - No valid session");
            ApiError::from(AuthError::Unauthorized).into_response()
        }
    }
}

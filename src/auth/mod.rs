pub mod api;
pub mod auth_components;
pub mod context;
#[cfg(feature = "ssr")]
pub mod secure;
#[cfg(feature = "ssr")]
pub mod server;
mod types;

pub use api::*;
pub use auth_components::*;
pub use types::*;

#[cfg(feature = "ssr")]
pub use server::*;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

#[cfg(feature = "ssr")]
pub fn create_session_token(secret: &str, hours: i64) -> Result<String, AuthError> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now();
    let claims = Claims {
        sub: ADMIN_SUBJECT.to_string(),
        exp: (now + chrono::Duration::hours(hours)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenCreation(e.to_string()))
}

#[cfg(feature = "ssr")]
pub fn verify_session_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        log::debug!("Session token rejected: {e}");
        AuthError::Unauthorized
    })?;

    if token_data.claims.sub != ADMIN_SUBJECT {
        return Err(AuthError::Unauthorized);
    }
    Ok(token_data.claims)
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_round_trip() {
        let token = create_session_token("s3cret", 24).unwrap();
        let claims = verify_session_token(&token, "s3cret").unwrap();
        assert_eq!(claims.sub, ADMIN_SUBJECT);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_session_token_rejects_wrong_secret_and_expiry() {
        let token = create_session_token("s3cret", 24).unwrap();
        assert!(matches!(
            verify_session_token(&token, "other"),
            Err(AuthError::Unauthorized)
        ));

        let expired = create_session_token("s3cret", -2).unwrap();
        assert!(matches!(
            verify_session_token(&expired, "s3cret"),
            Err(AuthError::Unauthorized)
        ));
        assert!(verify_session_token("garbage", "s3cret").is_err());
    }
}

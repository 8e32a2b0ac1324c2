use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::STANDARD as b64, Engine as _};

use super::AuthError;

/// Checks `password` against a base64-encoded argon2 PHC string.
pub fn verify_password(password: &str, hash_b64: &str) -> Result<bool, AuthError> {
    log::debug!("Attempting to verify password");

    let hash = String::from_utf8(
        b64.decode(hash_b64.trim())
            .map_err(|e| AuthError::PasswordHash(format!("Failed to decode base64: {e}")))?,
    )
    .map_err(|e| AuthError::PasswordHash(format!("Failed to convert to string: {e}")))?;

    let parsed_hash = PasswordHash::new(&hash)
        .map_err(|e| AuthError::PasswordHash(format!("Failed to parse hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Produces the value expected in `ADMIN_PASSWORD_HASH`.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(b64.encode(hash.to_string()))
}

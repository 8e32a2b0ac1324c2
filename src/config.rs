use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4-turbo-preview";
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MATCH_COUNT: i32 = 3;
pub const DEFAULT_SESSION_HOURS: i64 = 24;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Retrieval parameters handed to the vector search as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub match_threshold: f64,
    pub match_count: i32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            match_count: DEFAULT_MATCH_COUNT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    pub openai_api_key: String,
    /// Base64-encoded argon2 PHC string, see `bin/hash_password.rs`.
    pub admin_password_hash: String,
    pub jwt_secret: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub search: SearchSettings,
    pub session_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            supabase_url: required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            supabase_key: required("SUPABASE_KEY")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            admin_password_hash: required("ADMIN_PASSWORD_HASH")?,
            jwt_secret: required("JWT_SECRET")?,
            embedding_model: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            search: SearchSettings {
                match_threshold: parse_or(&lookup, "MATCH_THRESHOLD", DEFAULT_MATCH_THRESHOLD)?,
                match_count: parse_or(&lookup, "MATCH_COUNT", DEFAULT_MATCH_COUNT)?,
            },
            session_hours: parse_or(&lookup, "SESSION_HOURS", DEFAULT_SESSION_HOURS)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("SUPABASE_URL", "https://abc.supabase.co/"),
            ("SUPABASE_KEY", "anon-key"),
            ("OPENAI_API_KEY", "sk-test"),
            ("ADMIN_PASSWORD_HASH", "aGFzaA=="),
            ("JWT_SECRET", "secret"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_apply() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.supabase_url, "https://abc.supabase.co");
        assert_eq!(config.embedding_model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.search, SearchSettings::default());
        assert_eq!(config.session_hours, 24);
    }

    #[test]
    fn test_missing_required_variable() {
        let mut env = base_env();
        env.remove("JWT_SECRET");
        assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("JWT_SECRET"));

        env.insert("JWT_SECRET", "   ");
        assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_overrides_and_invalid_numbers() {
        let mut env = base_env();
        env.insert("MATCH_THRESHOLD", "0.5");
        env.insert("MATCH_COUNT", "5");
        let config = load(&env).unwrap();
        assert_eq!(config.search.match_threshold, 0.5);
        assert_eq!(config.search.match_count, 5);

        env.insert("MATCH_COUNT", "many");
        assert_eq!(
            load(&env).unwrap_err(),
            ConfigError::Invalid {
                name: "MATCH_COUNT",
                value: "many".to_string()
            }
        );
    }
}

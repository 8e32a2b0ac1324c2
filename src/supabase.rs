use postgrest::{Builder, Postgrest};
use serde::de::DeserializeOwned;

use crate::error::ServiceError;

pub fn build_client(url: &str, key: &str) -> Postgrest {
    let client = Postgrest::new(format!("{url}/rest/v1"))
        .insert_header("apikey", key)
        .insert_header("Authorization", format!("Bearer {key}"));

    log::debug!("Supabase client created");
    client
}

/// A PostgREST response read to completion.
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: u16,
    pub content_range: Option<String>,
    pub body: String,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_for_status(self) -> Result<Self, ServiceError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ServiceError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T, ServiceError> {
        let response = self.error_for_status()?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Row total reported for `exact_count()` queries.
    pub fn total(&self) -> Option<u64> {
        self.content_range.as_deref().and_then(content_range_total)
    }
}

pub async fn send(builder: Builder) -> Result<RestResponse, ServiceError> {
    let response = builder
        .execute()
        .await
        .map_err(|e| ServiceError::Request(e.to_string()))?;

    let status = response.status().as_u16();
    let content_range = response
        .headers()
        .get("content-range")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::Request(e.to_string()))?;

    Ok(RestResponse {
        status,
        content_range,
        body,
    })
}

pub async fn read_json<T: DeserializeOwned>(builder: Builder) -> Result<T, ServiceError> {
    send(builder).await?.json()
}

/// Parses the total out of `0-9/120` or `*/0`.
pub fn content_range_total(header: &str) -> Option<u64> {
    header
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_range_total() {
        assert_eq!(content_range_total("0-9/120"), Some(120));
        assert_eq!(content_range_total("*/0"), Some(0));
        assert_eq!(content_range_total("0-9/*"), None);
        assert_eq!(content_range_total("garbage"), None);
    }

    #[test]
    fn test_json_rejects_error_status() {
        let response = RestResponse {
            status: 404,
            content_range: None,
            body: r#"{"message":"function not found"}"#.to_string(),
        };
        match response.json::<Vec<i64>>() {
            Err(ServiceError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("function not found"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_json_decodes_success_body() {
        let response = RestResponse {
            status: 206,
            content_range: Some("0-1/42".to_string()),
            body: "[1,2]".to_string(),
        };
        assert_eq!(response.total(), Some(42));
        assert_eq!(response.json::<Vec<i64>>().unwrap(), vec![1, 2]);
    }
}

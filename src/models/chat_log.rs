use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::travel::SourceDescriptor;

/// Insert payload for `chat_logs`. One is written per chat request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewChatLog {
    pub user_question: String,
    pub ai_response: String,
    /// JSON-encoded list of [`SourceDescriptor`]s.
    pub sources: String,
    pub similarity_scores: Vec<f64>,
    pub search_results_count: i32,
    pub response_time_ms: i64,
    pub embedding_time_ms: i64,
    pub search_time_ms: i64,
    pub llm_time_ms: i64,
    pub user_ip: String,
    pub user_agent: String,
    pub error_occurred: bool,
    pub error_message: Option<String>,
}

impl NewChatLog {
    pub fn decoded_sources(&self) -> Vec<SourceDescriptor> {
        serde_json::from_str(&self.sources).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatLogView {
    pub id: i64,
    pub user_question: String,
    pub ai_response: Option<String>,
    pub sources: Option<String>,
    pub similarity_scores: Option<Vec<f64>>,
    pub search_results_count: Option<i32>,
    pub response_time_ms: Option<i64>,
    pub embedding_time_ms: Option<i64>,
    pub search_time_ms: Option<i64>,
    pub llm_time_ms: Option<i64>,
    pub user_ip: Option<String>,
    pub user_agent: Option<String>,
    #[serde(default)]
    pub error_occurred: bool,
    pub error_message: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// The subset of columns the manual statistics fallback reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatLogTiming {
    pub response_time_ms: Option<i64>,
    pub embedding_time_ms: Option<i64>,
    pub search_time_ms: Option<i64>,
    pub llm_time_ms: Option<i64>,
    pub search_results_count: Option<i32>,
    #[serde(default)]
    pub error_occurred: bool,
    pub created_at: Option<DateTime<Utc>>,
}

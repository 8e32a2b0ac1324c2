use async_trait::async_trait;
use postgrest::Postgrest;
use serde::Deserialize;

use crate::error::ServiceError;
use crate::models::{ChatLogTiming, ChatLogView, DailyStats, NewChatLog, OverallStats};
use crate::supabase::{self, RestResponse};

const TIMING_COLUMNS: &str = "response_time_ms,embedding_time_ms,search_time_ms,llm_time_ms,search_results_count,error_occurred,created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatLogStore: Send + Sync {
    async fn insert(&self, log: NewChatLog) -> Result<(), ServiceError>;

    /// Newest-first rows in the inclusive range `from..=to`, plus the total
    /// row count.
    async fn page(&self, from: usize, to: usize) -> Result<(Vec<ChatLogView>, u64), ServiceError>;

    async fn daily_stats(&self, limit: usize) -> Result<Vec<DailyStats>, ServiceError>;

    /// `Ok(None)` when the `get_overall_stats` function is unavailable.
    async fn overall_stats(&self) -> Result<Option<OverallStats>, ServiceError>;

    async fn timings(&self) -> Result<Vec<ChatLogTiming>, ServiceError>;

    /// Questions of successful chats, newest first.
    async fn recent_questions(&self, limit: usize) -> Result<Vec<String>, ServiceError>;
}

/// Status PostgREST answers with when the requested range starts past the
/// last row. The total still comes back as `*/N`.
const RANGE_NOT_SATISFIABLE: u16 = 416;

fn page_rows(response: RestResponse) -> Result<(Vec<ChatLogView>, u64), ServiceError> {
    let total = response.total();
    if response.status == RANGE_NOT_SATISFIABLE {
        return Ok((Vec::new(), total.unwrap_or(0)));
    }
    let logs: Vec<ChatLogView> = response.json()?;
    let total = total.unwrap_or(logs.len() as u64);
    Ok((logs, total))
}

pub struct SupabaseChatLogStore {
    client: Postgrest,
}

impl SupabaseChatLogStore {
    pub fn new(client: Postgrest) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct QuestionRow {
    user_question: String,
}

#[async_trait]
impl ChatLogStore for SupabaseChatLogStore {
    async fn insert(&self, log: NewChatLog) -> Result<(), ServiceError> {
        let body = serde_json::to_string(&log)?;
        supabase::send(self.client.from("chat_logs").insert(body))
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn page(&self, from: usize, to: usize) -> Result<(Vec<ChatLogView>, u64), ServiceError> {
        let response = supabase::send(
            self.client
                .from("chat_logs")
                .select("*")
                .order("created_at.desc")
                .range(from, to)
                .exact_count(),
        )
        .await?;

        page_rows(response)
    }

    async fn daily_stats(&self, limit: usize) -> Result<Vec<DailyStats>, ServiceError> {
        supabase::read_json(
            self.client
                .from("chat_analytics")
                .select("*")
                .order("date.desc")
                .limit(limit),
        )
        .await
    }

    async fn overall_stats(&self) -> Result<Option<OverallStats>, ServiceError> {
        let response = supabase::send(self.client.rpc("get_overall_stats", "{}")).await?;
        if !response.is_success() {
            log::warn!(
                "get_overall_stats unavailable ({}), falling back to manual aggregation",
                response.status
            );
            return Ok(None);
        }
        let rows: Vec<OverallStats> = response.json()?;
        Ok(rows.into_iter().next())
    }

    async fn timings(&self) -> Result<Vec<ChatLogTiming>, ServiceError> {
        supabase::read_json(self.client.from("chat_logs").select(TIMING_COLUMNS)).await
    }

    async fn recent_questions(&self, limit: usize) -> Result<Vec<String>, ServiceError> {
        let rows: Vec<QuestionRow> = supabase::read_json(
            self.client
                .from("chat_logs")
                .select("user_question")
                .eq("error_occurred", "false")
                .order("created_at.desc")
                .limit(limit),
        )
        .await?;
        Ok(rows.into_iter().map(|r| r.user_question).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_past_the_last_row_is_empty_with_total() {
        let response = RestResponse {
            status: 416,
            content_range: Some("*/45".to_string()),
            body: r#"{"code":"PGRST103","message":"Requested range not satisfiable"}"#.to_string(),
        };
        let (logs, total) = page_rows(response).unwrap();
        assert!(logs.is_empty());
        assert_eq!(total, 45);
    }

    #[test]
    fn test_page_keeps_other_errors() {
        let response = RestResponse {
            status: 500,
            content_range: None,
            body: "boom".to_string(),
        };
        assert!(matches!(
            page_rows(response),
            Err(ServiceError::Status { status: 500, .. })
        ));
    }

    #[test]
    fn test_page_reads_rows_and_total() {
        let response = RestResponse {
            status: 206,
            content_range: Some("0-0/0".to_string()),
            body: "[]".to_string(),
        };
        assert_eq!(page_rows(response).unwrap().1, 0);
    }
}

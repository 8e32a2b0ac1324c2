use std::sync::Arc;
use std::time::Instant;

use http::HeaderMap;
use log::{debug, error, info};

use crate::config::SearchSettings;
use crate::error::ChatError;
use crate::models::{ChatAnswer, NewChatLog, SourceDescriptor};
use crate::services::prompt::{build_context, build_user_prompt, SYSTEM_PROMPT};
use crate::services::{ChatLogStore, ChatModel, ContentSearch, Embedder};
use crate::utils::validate_message;

const UNKNOWN: &str = "unknown";

/// Where a chat request came from, as recorded in the log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

impl ClientInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            ip: header("x-forwarded-for")
                .or_else(|| header("x-real-ip"))
                .unwrap_or_else(|| UNKNOWN.to_string()),
            user_agent: header("user-agent").unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct StageTimings {
    embedding_ms: i64,
    search_ms: i64,
    llm_ms: i64,
}

struct Generated {
    response: String,
    sources: Vec<SourceDescriptor>,
    results_count: usize,
}

fn elapsed_ms(since: Instant) -> i64 {
    since.elapsed().as_millis() as i64
}

/// Embed, search, prompt, generate, log. Every step is a single awaited call.
pub struct RagPipeline {
    embedder: Arc<dyn Embedder>,
    search: Arc<dyn ContentSearch>,
    model: Arc<dyn ChatModel>,
    logs: Arc<dyn ChatLogStore>,
    settings: SearchSettings,
}

impl RagPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        search: Arc<dyn ContentSearch>,
        model: Arc<dyn ChatModel>,
        logs: Arc<dyn ChatLogStore>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            embedder,
            search,
            model,
            logs,
            settings,
        }
    }

    pub async fn answer(&self, message: &str, client: &ClientInfo) -> Result<ChatAnswer, ChatError> {
        if !validate_message(message) {
            return Err(ChatError::InvalidMessage);
        }

        let started = Instant::now();
        let mut timings = StageTimings::default();

        match self.generate(message, &mut timings).await {
            Ok(generated) => {
                let similarity_scores = generated.sources.iter().map(|s| s.similarity).collect();
                let sources = serde_json::to_string(&generated.sources)
                    .unwrap_or_else(|_| "[]".to_string());
                self.record(NewChatLog {
                    user_question: message.to_string(),
                    ai_response: generated.response.clone(),
                    sources,
                    similarity_scores,
                    search_results_count: generated.results_count as i32,
                    response_time_ms: elapsed_ms(started),
                    embedding_time_ms: timings.embedding_ms,
                    search_time_ms: timings.search_ms,
                    llm_time_ms: timings.llm_ms,
                    user_ip: client.ip.clone(),
                    user_agent: client.user_agent.clone(),
                    error_occurred: false,
                    error_message: None,
                })
                .await;

                info!(
                    "Answered in {}ms (embedding {}ms, search {}ms, llm {}ms)",
                    elapsed_ms(started),
                    timings.embedding_ms,
                    timings.search_ms,
                    timings.llm_ms
                );
                Ok(ChatAnswer {
                    response: generated.response,
                    sources: generated.sources,
                })
            }
            Err(e) => {
                error!("Chat API error: {e}");
                self.record(NewChatLog {
                    user_question: message.to_string(),
                    ai_response: String::new(),
                    sources: "[]".to_string(),
                    similarity_scores: Vec::new(),
                    search_results_count: 0,
                    response_time_ms: elapsed_ms(started),
                    embedding_time_ms: timings.embedding_ms,
                    search_time_ms: timings.search_ms,
                    llm_time_ms: timings.llm_ms,
                    user_ip: client.ip.clone(),
                    user_agent: client.user_agent.clone(),
                    error_occurred: true,
                    error_message: Some(e.to_string()),
                })
                .await;
                Err(e)
            }
        }
    }

    async fn generate(&self, message: &str, timings: &mut StageTimings) -> Result<Generated, ChatError> {
        let step = Instant::now();
        let embedding = self.embedder.embed(message).await;
        timings.embedding_ms = elapsed_ms(step);
        let embedding = embedding.map_err(ChatError::Upstream)?;

        let step = Instant::now();
        let matches = self.search.match_content(embedding, self.settings).await;
        timings.search_ms = elapsed_ms(step);
        let matches = matches.map_err(ChatError::Search)?;
        debug!("Retrieved {} chunks for prompt context", matches.len());

        let (context, sources) = build_context(&matches);
        let user_prompt = build_user_prompt(&context, message);

        let step = Instant::now();
        let response = self.model.complete(SYSTEM_PROMPT, &user_prompt).await;
        timings.llm_ms = elapsed_ms(step);
        let response = response.map_err(ChatError::Upstream)?;

        Ok(Generated {
            response,
            sources,
            results_count: matches.len(),
        })
    }

    async fn record(&self, log: NewChatLog) {
        if let Err(e) = self.logs.insert(log).await {
            error!("Failed to log chat interaction: {e}");
        }
    }
}

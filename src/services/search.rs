use async_trait::async_trait;
use postgrest::Postgrest;
use serde_json::json;

use crate::config::SearchSettings;
use crate::error::ServiceError;
use crate::models::TravelMatch;
use crate::supabase;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSearch: Send + Sync {
    async fn match_content(
        &self,
        embedding: Vec<f32>,
        settings: SearchSettings,
    ) -> Result<Vec<TravelMatch>, ServiceError>;

    /// Reads at most one row of the indexed corpus. Used by the health check.
    async fn probe(&self) -> Result<usize, ServiceError>;
}

pub struct SupabaseContentSearch {
    client: Postgrest,
}

impl SupabaseContentSearch {
    pub fn new(client: Postgrest) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentSearch for SupabaseContentSearch {
    async fn match_content(
        &self,
        embedding: Vec<f32>,
        settings: SearchSettings,
    ) -> Result<Vec<TravelMatch>, ServiceError> {
        let params = json!({
            "query_embedding": embedding,
            "match_threshold": settings.match_threshold,
            "match_count": settings.match_count,
        });

        let matches: Vec<TravelMatch> =
            supabase::read_json(self.client.rpc("match_travel_content", params.to_string()))
                .await?;
        log::debug!("Found {} relevant travel chunks", matches.len());
        Ok(matches)
    }

    async fn probe(&self) -> Result<usize, ServiceError> {
        let rows: Vec<serde_json::Value> = supabase::read_json(
            self.client.from("travel_content").select("id").limit(1),
        )
        .await?;
        Ok(rows.len())
    }
}

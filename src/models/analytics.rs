use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::chat_log::ChatLogView;

/// A row of the `chat_analytics` view. Only the date is interpreted here;
/// the aggregate columns are passed through to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyStats {
    pub date: String,
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverallStats {
    #[serde(deserialize_with = "lenient_i64")]
    pub total_interactions: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub successful_responses: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub failed_responses: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub success_rate: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_response_time_ms: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_embedding_time_ms: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_search_time_ms: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_llm_time_ms: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_search_results: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopQuestion {
    pub question: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsReport {
    #[serde(rename = "dailyStats")]
    pub daily_stats: Vec<DailyStats>,
    pub overall: OverallStats,
    #[serde(rename = "topQuestions")]
    pub top_questions: Vec<TopQuestion>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// Zero-based, inclusive row range for a PostgREST `range` query.
    pub fn row_range(&self) -> (usize, usize) {
        let start = (self.page.saturating_sub(1) as usize) * self.limit as usize;
        let end = start + (self.limit as usize).saturating_sub(1);
        (start, end)
    }

    /// 1-based bounds of the rows shown, for "showing a-b of n".
    pub fn showing(&self) -> (u64, u64) {
        if self.total == 0 {
            return (0, 0);
        }
        let first = u64::from(self.page.saturating_sub(1)) * u64::from(self.limit) + 1;
        if first > self.total {
            return (0, 0);
        }
        let last = (u64::from(self.page) * u64::from(self.limit)).min(self.total);
        (first, last)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogsPage {
    pub logs: Vec<ChatLogView>,
    pub pagination: Pagination,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() || s == "NaN" => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid number {s:?}: {e}"))),
        other => Err(D::Error::custom(format!(
            "expected number or numeric string, got {other}"
        ))),
    }
}

// Postgres numerics arrive as JSON numbers from the RPC and as strings from
// older dashboards, so both are accepted.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map(|n| n.round() as i64).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_total_pages() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next());

        let p = Pagination::new(2, 10, 25);
        assert_eq!((p.page, p.limit, p.total, p.total_pages), (2, 10, 25, 3));
        assert!(p.has_previous());
        assert!(p.has_next());

        let p = Pagination::new(3, 10, 30);
        assert_eq!(p.total_pages, 3);
        assert!(!p.has_next());
    }

    #[test]
    fn test_pagination_ranges() {
        assert_eq!(Pagination::new(1, 10, 25).row_range(), (0, 9));
        assert_eq!(Pagination::new(3, 10, 25).row_range(), (20, 29));
        assert_eq!(Pagination::new(3, 10, 25).showing(), (21, 25));
        assert_eq!(Pagination::new(1, 10, 0).showing(), (0, 0));
        assert_eq!(Pagination::new(99, 10, 45).showing(), (0, 0));
    }

    #[test]
    fn test_pagination_serializes_camel_case_total_pages() {
        let json = serde_json::to_value(Pagination::new(1, 10, 11)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 1, "limit": 10, "total": 11, "totalPages": 2})
        );
    }

    #[test]
    fn test_overall_stats_accepts_strings_and_numbers() {
        let stats: OverallStats = serde_json::from_value(serde_json::json!({
            "total_interactions": 12,
            "successful_responses": "10",
            "failed_responses": 2,
            "success_rate": "83.33",
            "avg_response_time_ms": 2410.0,
            "avg_embedding_time_ms": "180",
            "avg_search_time_ms": null,
            "avg_llm_time_ms": "NaN",
            "avg_search_results": "2.5"
        }))
        .unwrap();

        assert_eq!(stats.successful_responses, 10);
        assert_eq!(stats.success_rate, 83.33);
        assert_eq!(stats.avg_embedding_time_ms, 180.0);
        assert_eq!(stats.avg_search_time_ms, 0.0);
        assert_eq!(stats.avg_llm_time_ms, 0.0);
        assert_eq!(stats.avg_search_results, 2.5);
    }

    #[test]
    fn test_daily_stats_keeps_extra_columns() {
        let row: DailyStats = serde_json::from_value(serde_json::json!({
            "date": "2025-06-01",
            "total_questions": 40,
            "avg_response_time": 2100.5
        }))
        .unwrap();
        assert_eq!(row.date, "2025-06-01");
        assert_eq!(row.metrics.get("total_questions"), Some(&serde_json::json!(40)));
    }
}

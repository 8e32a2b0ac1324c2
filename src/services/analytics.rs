use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::{AnalyticsReport, ChatLogTiming, LogsPage, OverallStats, Pagination, TopQuestion};
use crate::services::ChatLogStore;

pub const DAILY_STATS_DAYS: usize = 30;
pub const RECENT_QUESTION_WINDOW: usize = 100;
pub const TOP_QUESTION_COUNT: usize = 10;
pub const QUESTION_KEY_CHARS: usize = 50;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn average(rows: &[&ChatLogTiming], field: impl Fn(&ChatLogTiming) -> i64) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| field(r) as f64).sum::<f64>() / rows.len() as f64
}

/// Aggregates raw timing rows when the database function is missing.
/// Averages only cover successful chats.
pub fn overall_from_rows(rows: &[ChatLogTiming]) -> OverallStats {
    let total = rows.len() as i64;
    let successful: Vec<&ChatLogTiming> = rows.iter().filter(|r| !r.error_occurred).collect();
    let success_count = successful.len() as i64;

    let success_rate = if total == 0 {
        0.0
    } else {
        round_to(success_count as f64 / total as f64 * 100.0, 2)
    };

    OverallStats {
        total_interactions: total,
        successful_responses: success_count,
        failed_responses: total - success_count,
        success_rate,
        avg_response_time_ms: round_to(average(&successful, |r| r.response_time_ms.unwrap_or(0)), 0),
        avg_embedding_time_ms: round_to(average(&successful, |r| r.embedding_time_ms.unwrap_or(0)), 0),
        avg_search_time_ms: round_to(average(&successful, |r| r.search_time_ms.unwrap_or(0)), 0),
        avg_llm_time_ms: round_to(average(&successful, |r| r.llm_time_ms.unwrap_or(0)), 0),
        avg_search_results: round_to(
            average(&successful, |r| i64::from(r.search_results_count.unwrap_or(0))),
            1,
        ),
    }
}

/// Counts questions by their lowercased first 50 characters. Ties keep the
/// order in which the question was first seen.
pub fn top_questions(questions: &[String], n: usize) -> Vec<TopQuestion> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<TopQuestion> = Vec::new();

    for question in questions {
        let key: String = question.to_lowercase().chars().take(QUESTION_KEY_CHARS).collect();
        match index.get(&key) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push(TopQuestion {
                    question: key,
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

pub fn clamp_page(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}

pub struct AnalyticsService {
    logs: Arc<dyn ChatLogStore>,
}

impl AnalyticsService {
    pub fn new(logs: Arc<dyn ChatLogStore>) -> Self {
        Self { logs }
    }

    pub async fn report(&self) -> Result<AnalyticsReport, ServiceError> {
        let daily_stats = self.logs.daily_stats(DAILY_STATS_DAYS).await?;

        let overall = match self.logs.overall_stats().await {
            Ok(Some(stats)) => stats,
            Ok(None) => overall_from_rows(&self.logs.timings().await?),
            Err(e) => {
                log::warn!("Overall stats query failed, aggregating manually: {e}");
                overall_from_rows(&self.logs.timings().await?)
            }
        };

        let questions = self.logs.recent_questions(RECENT_QUESTION_WINDOW).await?;

        Ok(AnalyticsReport {
            daily_stats,
            overall,
            top_questions: top_questions(&questions, TOP_QUESTION_COUNT),
        })
    }

    pub async fn logs(&self, page: Option<u32>, limit: Option<u32>) -> Result<LogsPage, ServiceError> {
        let (page, limit) = clamp_page(page, limit);
        let (from, to) = Pagination::new(page, limit, 0).row_range();
        let (logs, total) = self.logs.page(from, to).await?;
        log::debug!("Fetched {} chat logs (page {page}, total {total})", logs.len());

        Ok(LogsPage {
            logs,
            pagination: Pagination::new(page, limit, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::chat_logs::MockChatLogStore;

    fn timing(ms: i64, results: i32, failed: bool) -> ChatLogTiming {
        ChatLogTiming {
            response_time_ms: Some(ms),
            embedding_time_ms: Some(ms / 10),
            search_time_ms: Some(ms / 5),
            llm_time_ms: Some(ms / 2),
            search_results_count: Some(results),
            error_occurred: failed,
            created_at: None,
        }
    }

    #[test]
    fn test_overall_from_rows() {
        let rows = vec![
            timing(1000, 3, false),
            timing(2001, 2, false),
            timing(9000, 0, true),
        ];
        let stats = overall_from_rows(&rows);
        assert_eq!(stats.total_interactions, 3);
        assert_eq!(stats.successful_responses, 2);
        assert_eq!(stats.failed_responses, 1);
        assert_eq!(stats.success_rate, 66.67);
        assert_eq!(stats.avg_response_time_ms, 1501.0);
        assert_eq!(stats.avg_search_results, 2.5);
    }

    #[test]
    fn test_overall_from_no_rows_is_zero() {
        let stats = overall_from_rows(&[]);
        assert_eq!(stats, OverallStats::default());
        assert!(!stats.success_rate.is_nan());
    }

    #[test]
    fn test_top_questions_groups_by_prefix() {
        let long = format!("{}A", "가".repeat(50));
        let questions: Vec<String> = vec![
            "Zermatt?".into(),
            "zermatt?".into(),
            "스위스패스".into(),
            long.clone(),
            format!("{}b", "가".repeat(50)),
            "스위스패스".into(),
            "취리히".into(),
        ];
        let top = top_questions(&questions, 3);
        assert_eq!(
            top,
            vec![
                TopQuestion { question: "zermatt?".into(), count: 2 },
                TopQuestion { question: "스위스패스".into(), count: 2 },
                TopQuestion { question: "가".repeat(50), count: 2 },
            ]
        );
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(None, None), (1, 10));
        assert_eq!(clamp_page(Some(0), Some(0)), (1, 1));
        assert_eq!(clamp_page(Some(4), Some(500)), (4, 100));
    }

    #[tokio::test]
    async fn test_logs_pagination_reflects_known_total() {
        let mut store = MockChatLogStore::new();
        store
            .expect_page()
            .withf(|from, to| *from == 20 && *to == 29)
            .times(1)
            .returning(|_, _| Ok((Vec::new(), 45)));

        let page = AnalyticsService::new(Arc::new(store))
            .logs(Some(3), Some(10))
            .await
            .unwrap();

        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.pagination.limit, 10);
        assert_eq!(page.pagination.total, 45);
        assert_eq!(page.pagination.total_pages, 5);
    }

    #[tokio::test]
    async fn test_report_falls_back_when_rpc_missing() {
        let mut store = MockChatLogStore::new();
        store
            .expect_daily_stats()
            .withf(|limit| *limit == 30)
            .returning(|_| Ok(Vec::new()));
        store.expect_overall_stats().returning(|| Ok(None));
        store
            .expect_timings()
            .times(1)
            .returning(|| Ok(vec![timing(100, 1, false), timing(300, 3, true)]));
        store
            .expect_recent_questions()
            .withf(|limit| *limit == 100)
            .returning(|_| Ok(vec!["a".into(), "b".into(), "a".into()]));

        let report = AnalyticsService::new(Arc::new(store)).report().await.unwrap();
        assert_eq!(report.overall.total_interactions, 2);
        assert_eq!(report.overall.success_rate, 50.0);
        assert_eq!(report.top_questions[0], TopQuestion { question: "a".into(), count: 2 });
        assert_eq!(report.top_questions.len(), 2);
    }

    #[tokio::test]
    async fn test_report_uses_rpc_stats_when_available() {
        let mut store = MockChatLogStore::new();
        store.expect_daily_stats().returning(|_| Ok(Vec::new()));
        store.expect_overall_stats().returning(|| {
            Ok(Some(OverallStats {
                total_interactions: 7,
                ..Default::default()
            }))
        });
        store.expect_timings().never();
        store.expect_recent_questions().returning(|_| Ok(Vec::new()));

        let report = AnalyticsService::new(Arc::new(store)).report().await.unwrap();
        assert_eq!(report.overall.total_interactions, 7);
        assert!(report.top_questions.is_empty());
    }
}

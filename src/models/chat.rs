use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::travel::SourceDescriptor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatAnswer {
    pub response: String,
    pub sources: Vec<SourceDescriptor>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

// for client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sources: Vec<SourceDescriptor>,
    pub is_error: bool,
}

pub const WELCOME_MESSAGE: &str = "안녕하세요! 스위스 여행에 관해 궁금한 점을 물어보세요. 교통, 숙박, 관광지, 음식 등 어떤 것이든 도움드릴게요! 🇨🇭";
pub const CLIENT_ERROR_MESSAGE: &str =
    "죄송합니다. 일시적인 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

impl ChatMessage {
    pub fn welcome() -> Self {
        Self {
            id: "welcome".to_string(),
            role: Role::Assistant,
            content: WELCOME_MESSAGE.to_string(),
            timestamp: Utc::now(),
            sources: Vec::new(),
            is_error: false,
        }
    }

    pub fn user(content: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::User,
            content,
            timestamp: Utc::now(),
            sources: Vec::new(),
            is_error: false,
        }
    }

    pub fn assistant(answer: ChatAnswer) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: answer.response,
            timestamp: Utc::now(),
            sources: answer.sources,
            is_error: false,
        }
    }

    pub fn failure() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: CLIENT_ERROR_MESSAGE.to_string(),
            timestamp: Utc::now(),
            sources: Vec::new(),
            is_error: true,
        }
    }
}

pub const SAMPLE_QUESTIONS: [&str; 6] = [
    "리기산 가는 방법?",
    "융프라우요흐 티켓 가격은?",
    "루체른에서 하루 일정 추천해줘",
    "스위스 교통카드 추천",
    "취리히 공항에서 시내 가는 법",
    "인터라켄 숙박 추천",
];

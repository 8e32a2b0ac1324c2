use serde::{Deserialize, Serialize};

/// One row returned by the `match_travel_content` stored procedure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TravelMatch {
    pub id: i64,
    pub content: String,
    pub title: String,
    pub file_name: String,
    pub category: Option<String>,
    pub section_title: Option<String>,
    pub chunk_index: Option<i32>,
    pub total_chunks: Option<i32>,
    pub similarity: f64,
}

/// What the chat client shows under an answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceDescriptor {
    pub title: String,
    pub file_name: String,
    pub section_title: Option<String>,
    pub similarity: f64,
}

impl From<&TravelMatch> for SourceDescriptor {
    fn from(m: &TravelMatch) -> Self {
        Self {
            title: m.title.clone(),
            file_name: m.file_name.clone(),
            section_title: m.section_title.clone(),
            similarity: m.similarity,
        }
    }
}

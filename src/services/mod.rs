pub mod analytics;
pub mod chat_logs;
pub mod contents;
pub mod embeddings;
pub mod generation;
pub mod prompt;
pub mod rag;
pub mod search;

pub use analytics::AnalyticsService;
pub use chat_logs::{ChatLogStore, SupabaseChatLogStore};
pub use contents::{ContentStore, SupabaseContentStore};
pub use embeddings::{Embedder, OpenAiEmbedder};
pub use generation::{ChatModel, OpenAiChatModel};
pub use rag::{ClientInfo, RagPipeline};
pub use search::{ContentSearch, SupabaseContentSearch};

pub mod analytics;
pub mod chat;
pub mod chat_log;
pub mod community;
pub mod travel;

pub use analytics::*;
pub use chat::*;
pub use chat_log::*;
pub use community::*;
pub use travel::*;

pub mod admin;
pub mod chat;
pub mod contents;

pub use admin::*;
pub use chat::*;
pub use contents::*;

pub mod auth_nav;
pub mod browser;
pub mod chat;
pub mod contents;
pub mod footer;
pub mod markdown;
pub mod messagelist;
pub mod ui;

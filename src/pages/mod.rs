pub mod admin;
pub mod chat;
pub mod contents_author;
pub mod contents_multi;
pub mod contentslist;
pub mod home;

pub use admin::AdminPage;
pub use chat::ChatPage;
pub use contents_author::AuthorContentsPage;
pub use contents_multi::ContentsMultiPage;
pub use contentslist::ContentsListPage;
pub use home::HomePage;

pub mod catalog;
pub mod config;
pub mod reply;
pub mod responder;
pub mod state;
pub mod theme;

// Re-export main types for convenience
pub use catalog::{Notification, QueryIcon, SuggestedQuery, Template, SUGGESTED_QUERIES, TEMPLATES};
pub use config::Config;
pub use reply::{select_reply, Intent};
pub use responder::ReplyTask;
pub use state::{ChatMessage, ChatRole, ChatSession, PendingReply, WELCOME_MESSAGE};
pub use theme::Theme;

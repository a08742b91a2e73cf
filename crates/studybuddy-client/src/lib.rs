//! Chat session client for the StudyBuddy study-schedule assistant.
//!
//! Provides:
//! - An append-only conversation [`Transcript`]
//! - A [`ChatSession`] that fetches the CSRF token once and runs one
//!   request/response cycle per user message
//! - Interpretation of the server's [`ChatResponse`] into plain replies,
//!   clarification requests, and study schedules
//! - A [`ChatView`] seam so rendering stays out of the request logic
//! - A `reqwest`-backed [`HttpChatApi`] transport

pub mod api;
pub mod http;
pub mod response;
pub mod sanitize;
pub mod schedule;
pub mod session;
pub mod transcript;
pub mod view;

pub use api::{ChatApi, ChatRequest};
pub use http::{HttpChatApi, HttpSettings};
pub use response::{
    ChatReply, ChatResponse, ReplyExtension, ResponseStatus, Schedule, ScheduleMetadata, StudyBlock,
};
pub use sanitize::{display_text, suggestion_fill_text};
pub use schedule::{summarize, DaySummary, ScheduleView};
pub use session::{ChatSession, SharedChatSession};
pub use transcript::{Role, Transcript, Turn};
pub use view::{ChatEvent, ChatEventBus, ChatView, NullView};

use studybuddy_common::StudyBuddyError;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Parse error: {0}")]
    Parse(String),
    /// The server answered but reported a failure in its `error` field.
    #[error("{0}")]
    Application(String),
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<ChatError> for StudyBuddyError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Network(msg) => StudyBuddyError::Network(msg),
            other => StudyBuddyError::Chat(other.to_string()),
        }
    }
}

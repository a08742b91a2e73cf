//! Transport seam between the chat session and the remote API.

use async_trait::async_trait;

use crate::response::ChatResponse;
use crate::ChatError;

/// One `GET /chat` call.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    /// JSON-encoded transcript, current user turn included.
    pub history: &'a str,
    /// Sent as `X-CSRF-TOKEN`; empty when the token fetch failed.
    pub csrf_token: &'a str,
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `GET /csrf-token`.
    async fn fetch_csrf_token(&self) -> Result<String, ChatError>;

    /// `GET /chat-tips`.
    async fn fetch_tips(&self) -> Result<Vec<String>, ChatError>;

    /// `GET /chat`. Returns the decoded payload even when it carries an
    /// `error` field; interpreting it is the session's job.
    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, ChatError>;
}

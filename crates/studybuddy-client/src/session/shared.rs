//! Clonable handle for sharing one session across tasks.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::response::ChatReply;
use crate::transcript::Transcript;
use crate::ChatError;

use super::manager::ChatSession;

/// Queues sends on a shared session.
///
/// `tokio::sync::Mutex` grants the lock in request order, so replies land
/// in the transcript in the order sends were issued, each directly after
/// its own user turn.
#[derive(Clone)]
pub struct SharedChatSession {
    inner: Arc<Mutex<ChatSession>>,
}

impl SharedChatSession {
    pub fn new(session: ChatSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn send_user_message(
        &self,
        text: impl Into<String>,
    ) -> Result<Option<ChatReply>, ChatError> {
        let text = text.into();
        let mut session = self.inner.lock().await;
        session.send_user_message(&text).await
    }

    pub async fn load_tips(&self, limit: usize) -> Vec<String> {
        self.inner.lock().await.load_tips(limit).await
    }

    /// Snapshot of the transcript once in-flight sends have finished.
    pub async fn transcript(&self) -> Transcript {
        self.inner.lock().await.transcript().clone()
    }

    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }
}

//! Session struct, token acquisition, and accessors.

use std::fmt;
use std::sync::Arc;

use studybuddy_common::SessionId;
use tracing::{info, warn};

use crate::api::ChatApi;
use crate::transcript::Transcript;
use crate::view::{ChatEvent, ChatView};

/// One conversation with the study assistant.
///
/// Owns its transcript and CSRF token, so several sessions can run side
/// by side. `send_user_message` takes `&mut self`; sends on one session
/// are therefore strictly sequential.
pub struct ChatSession {
    pub(super) id: SessionId,
    pub(super) api: Arc<dyn ChatApi>,
    pub(super) view: Arc<dyn ChatView>,
    pub(super) transcript: Transcript,
    /// Fetched once; empty if that fetch failed.
    pub(super) csrf_token: String,
}

impl ChatSession {
    /// Create a session and fetch its CSRF token.
    ///
    /// A failed fetch is logged and leaves the token empty. The session is
    /// still usable, though the server may reject its requests.
    pub async fn initialize(api: Arc<dyn ChatApi>, view: Arc<dyn ChatView>) -> Self {
        let id = SessionId::new();
        let csrf_token = match api.fetch_csrf_token().await {
            Ok(token) => {
                info!(session = %id, "CSRF token fetched");
                token
            }
            Err(e) => {
                warn!(session = %id, "CSRF token fetch failed, continuing without one: {e}");
                String::new()
            }
        };

        Self {
            id,
            api,
            view,
            transcript: Transcript::new(),
            csrf_token,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn has_token(&self) -> bool {
        !self.csrf_token.is_empty()
    }

    /// Forget the conversation. The token is kept.
    pub fn reset(&mut self) {
        self.transcript.clear();
    }

    /// Fetch suggestion tips and keep the first `limit`.
    ///
    /// Failures are logged and yield no tips.
    pub async fn load_tips(&self, limit: usize) -> Vec<String> {
        match self.api.fetch_tips().await {
            Ok(mut tips) => {
                tips.truncate(limit);
                self.view.render(&ChatEvent::SuggestionsLoaded(tips.clone()));
                tips
            }
            Err(e) => {
                warn!(session = %self.id, "failed to load chat tips: {e}");
                Vec::new()
            }
        }
    }
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("csrf_token", &"[REDACTED]")
            .field("turns", &self.transcript.len())
            .finish()
    }
}

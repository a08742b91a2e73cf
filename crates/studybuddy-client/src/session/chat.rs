//! The send/receive cycle for one user message.

use studybuddy_common::new_correlation_id;
use tracing::{debug, warn};

use crate::api::ChatRequest;
use crate::response::{ChatReply, ReplyExtension};
use crate::transcript::Turn;
use crate::view::ChatEvent;
use crate::ChatError;

use super::manager::ChatSession;

impl ChatSession {
    /// Send one user message and record the assistant's reply.
    ///
    /// Blank input is ignored and returns `Ok(None)` without touching the
    /// transcript or the network. On any failure the transcript is rolled
    /// back to its state before the call, an error bubble is rendered, and
    /// the error is returned. Nothing is retried.
    pub async fn send_user_message(&mut self, text: &str) -> Result<Option<ChatReply>, ChatError> {
        let message = text.trim();
        if message.is_empty() {
            return Ok(None);
        }

        let checkpoint = self.transcript.len();
        self.transcript.push(Turn::user(message));
        self.view.render(&ChatEvent::UserMessage(message.to_string()));
        self.view.render(&ChatEvent::LoadingStarted);

        let request_id = new_correlation_id();
        debug!(
            session = %self.id,
            request = %request_id,
            turns = self.transcript.len(),
            "sending chat message"
        );

        let outcome = self.exchange(message).await;
        self.view.render(&ChatEvent::LoadingFinished);

        match outcome {
            Ok(reply) => {
                debug!(session = %self.id, request = %request_id, "chat reply received");
                self.render_reply(&reply);
                self.transcript.push(Turn::assistant(reply.text.clone()));
                Ok(Some(reply))
            }
            Err(e) => {
                warn!(session = %self.id, request = %request_id, "chat request failed: {e}");
                self.transcript.truncate(checkpoint);
                self.view.render(&ChatEvent::Error(format!("Error: {e}")));
                Err(e)
            }
        }
    }

    async fn exchange(&self, message: &str) -> Result<ChatReply, ChatError> {
        let history = self
            .transcript
            .to_json()
            .map_err(|e| ChatError::Parse(e.to_string()))?;

        let response = self
            .api
            .chat(ChatRequest {
                message,
                history: &history,
                csrf_token: &self.csrf_token,
            })
            .await?;

        response.into_reply()
    }

    fn render_reply(&self, reply: &ChatReply) {
        self.view
            .render(&ChatEvent::AssistantMessage(reply.display.clone()));
        match &reply.extension {
            ReplyExtension::Plain => {}
            ReplyExtension::Clarification(questions) => {
                self.view
                    .render(&ChatEvent::ClarificationNeeded(questions.clone()));
            }
            ReplyExtension::Schedule(schedule) => {
                self.view.render(&ChatEvent::ScheduleReady(schedule.clone()));
            }
        }
    }
}

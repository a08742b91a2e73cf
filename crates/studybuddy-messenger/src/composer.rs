//! Draft text plus an optional pending attachment.

use crate::attachment::Attachment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Trimmed; may be empty when only an attachment is sent.
    pub text: String,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Default)]
pub struct Composer {
    draft: String,
    attachment: Option<Attachment>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn insert_emoji(&mut self, emoji: &str) {
        self.draft.push_str(emoji);
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Replaces any attachment already pending.
    pub fn attach(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    /// Take the message to send and reset the composer.
    ///
    /// Returns `None`, leaving the draft untouched, when there is neither
    /// text nor an attachment.
    pub fn take_outgoing(&mut self) -> Option<OutgoingMessage> {
        let text = self.draft.trim();
        if text.is_empty() && self.attachment.is_none() {
            return None;
        }
        let message = OutgoingMessage {
            text: text.to_string(),
            attachment: self.attachment.take(),
        };
        self.draft.clear();
        Some(message)
    }
}

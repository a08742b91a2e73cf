//! Rendering seam: the session reports what happened, views decide how
//! it looks.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::schedule::ScheduleView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ChatEvent {
    UserMessage(String),
    LoadingStarted,
    LoadingFinished,
    /// Display-sanitized reply text.
    AssistantMessage(String),
    /// Shown as an assistant bubble but never recorded in the transcript.
    Error(String),
    ClarificationNeeded(Vec<String>),
    ScheduleReady(ScheduleView),
    SuggestionsLoaded(Vec<String>),
}

pub trait ChatView: Send + Sync {
    fn render(&self, event: &ChatEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl ChatView for NullView {
    fn render(&self, _event: &ChatEvent) {}
}

/// Fans chat events out to any number of async subscribers.
pub struct ChatEventBus {
    sender: broadcast::Sender<ChatEvent>,
}

impl ChatEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: ChatEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl ChatView for ChatEventBus {
    fn render(&self, event: &ChatEvent) {
        self.publish(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bus_delivers_in_order() {
        let bus = ChatEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.render(&ChatEvent::UserMessage("hi".into()));
        bus.render(&ChatEvent::LoadingStarted);

        assert_eq!(rx.recv().await.unwrap(), ChatEvent::UserMessage("hi".into()));
        assert_eq!(rx.recv().await.unwrap(), ChatEvent::LoadingStarted);
    }

    #[test]
    fn publish_without_subscribers_returns_zero() {
        let bus = ChatEventBus::new(4);
        assert_eq!(bus.publish(ChatEvent::LoadingFinished), 0);
    }

    #[test]
    fn event_json_is_tagged() {
        let json = serde_json::to_string(&ChatEvent::Error("Error: boom".into())).unwrap();
        assert_eq!(json, r#"{"type":"Error","data":"Error: boom"}"#);
    }
}

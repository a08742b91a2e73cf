//! Message log and send/receive flow.

use chrono::{DateTime, Local};
use studybuddy_config::Theme;
use tracing::debug;

use crate::attachment::Attachment;
use crate::composer::Composer;
use crate::emoji::EmojiPicker;
use crate::replies::ReplySimulator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

#[derive(Debug, Clone)]
pub struct MessengerEntry {
    pub direction: Direction,
    pub text: String,
    pub attachment: Option<Attachment>,
    pub at: DateTime<Local>,
}

impl MessengerEntry {
    /// `HH:MM` in local time.
    pub fn time_label(&self) -> String {
        self.at.format("%H:%M").to_string()
    }
}

pub struct Messenger {
    composer: Composer,
    picker: EmojiPicker,
    simulator: ReplySimulator,
    log: Vec<MessengerEntry>,
    /// Not persisted; each run starts light.
    theme: Theme,
}

impl Messenger {
    pub fn new(simulator: ReplySimulator) -> Self {
        Self {
            composer: Composer::new(),
            picker: EmojiPicker::new(),
            simulator,
            log: Vec::new(),
            theme: Theme::default(),
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    pub fn picker(&self) -> &EmojiPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut EmojiPicker {
        &mut self.picker
    }

    pub fn simulator(&self) -> &ReplySimulator {
        &self.simulator
    }

    pub fn log(&self) -> &[MessengerEntry] {
        &self.log
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Insert the emoji at `index` into the draft. Returns false if the
    /// index is out of range.
    pub fn pick_emoji(&mut self, index: usize) -> bool {
        match self.picker.pick(index) {
            Some(emoji) => {
                self.composer.insert_emoji(emoji);
                true
            }
            None => false,
        }
    }

    /// Send whatever the composer holds. `None` if there was nothing.
    pub fn send(&mut self) -> Option<&MessengerEntry> {
        let outgoing = self.composer.take_outgoing()?;
        self.picker.close();
        debug!(
            chars = outgoing.text.len(),
            attachment = outgoing.attachment.is_some(),
            "messenger send"
        );
        self.log.push(MessengerEntry {
            direction: Direction::Sent,
            text: outgoing.text,
            attachment: outgoing.attachment,
            at: Local::now(),
        });
        self.log.last()
    }

    pub fn record_reply(&mut self, text: impl Into<String>) -> &MessengerEntry {
        self.log.push(MessengerEntry {
            direction: Direction::Received,
            text: text.into(),
            attachment: None,
            at: Local::now(),
        });
        &self.log[self.log.len() - 1]
    }

    /// Wait for the simulated reply and record it.
    pub async fn receive_reply(&mut self) -> &MessengerEntry {
        let text = self.simulator.next_reply().await;
        self.record_reply(text)
    }
}

impl Default for Messenger {
    fn default() -> Self {
        Self::new(ReplySimulator::default())
    }
}

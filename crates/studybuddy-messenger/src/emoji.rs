//! Emoji picker state.

pub const EMOJI_PALETTE: &[&str] = &[
    "😀", "😂", "😊", "😍", "🤔", "😎", "😢", "😡", "👍", "👎", "🙏", "👏", "🎉", "❤️", "🔥", "✨",
];

#[derive(Debug, Default)]
pub struct EmojiPicker {
    open: bool,
}

impl EmojiPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Interaction anywhere outside the picker.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Emoji at `index`. The picker stays open so several can be picked in
    /// a row. `None` if out of range.
    pub fn pick(&self, index: usize) -> Option<&'static str> {
        EMOJI_PALETTE.get(index).copied()
    }
}

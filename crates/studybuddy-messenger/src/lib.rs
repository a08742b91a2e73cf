//! Self-contained demo messenger.
//!
//! No network: replies are picked from a canned list and arrive after a
//! short random delay. Supports one pending attachment per message and
//! an emoji picker that appends to the draft.

pub mod attachment;
pub mod composer;
pub mod emoji;
pub mod messenger;
pub mod replies;

pub use attachment::{Attachment, AttachmentKind};
pub use composer::{Composer, OutgoingMessage};
pub use emoji::{EmojiPicker, EMOJI_PALETTE};
pub use messenger::{Direction, Messenger, MessengerEntry};
pub use replies::{ReplySimulator, DEFAULT_REPLIES};

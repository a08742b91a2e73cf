//! Chat session: transcript, CSRF token, and the request/response cycle.

mod chat;
mod manager;
mod shared;


pub use manager::ChatSession;
pub use shared::SharedChatSession;

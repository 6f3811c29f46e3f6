//! Fixed prompt text attached to chat conversations.

pub const CHAT_SYSTEM: &str = "You are a friendly and helpful chat assistant. \
Keep answers concise, and reply in the same language the user writes in.";

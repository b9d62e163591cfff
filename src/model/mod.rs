pub mod chat_config;
pub mod conversation;
pub mod message;

pub mod chat;
pub mod example_loader;
pub mod llm_client;
pub mod prompt_builder;
pub mod retry;

mod prompt_text;

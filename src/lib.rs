pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod settings;
pub mod settings_io;

pub use engine::chat::RuleChat;
pub use engine::llm_client::{CompletionProvider, CompletionRequest, OpenAiClient};
pub use engine::retry::{RetryPolicy, Sleeper, ThreadSleeper};
pub use error::{ChatError, ConfigError, ProviderError};
pub use model::chat_config::{ChatConfig, Model};
pub use model::message::{Message, Role};

use std::path::PathBuf;

use thiserror::Error;

/// Invalid session configuration. Always raised before any file or network access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("temperature must be within [0, 1], got {0}")]
    TemperatureOutOfRange(f32),

    #[error("unsupported model '{0}' (expected gpt-4, gpt-4-32k or gpt-3.5-turbo-16k)")]
    UnsupportedModel(String),

    #[error("template hole '{0}' has no value")]
    MissingHole(String),

    #[error("unterminated placeholder starting at byte {0}")]
    UnterminatedPlaceholder(usize),
}

/// Failures reported by a completion provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("rate limit exceeded")]
    RateLimited,

    #[error("request timed out")]
    Timeout,

    #[error("provider error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("authentication rejected")]
    Authentication,

    #[error("invalid request ({status}): {message}")]
    InvalidRequest { status: u16, message: String },

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error("provider returned no choices")]
    EmptyResponse,
}

impl ProviderError {
    /// Rate limits, timeouts and generic provider faults are expected to clear up on their own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited | ProviderError::Timeout | ProviderError::Server { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read example rules from {path}")]
    Examples {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk example directory")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

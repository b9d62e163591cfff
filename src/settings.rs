use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::llm_client::DEFAULT_API_BASE;
use crate::engine::retry::DEFAULT_RETRY_DELAY;
use crate::model::chat_config::{Model, DEFAULT_TEMPERATURE};

/// Client-side settings persisted as JSON in the user's config directory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base: String,

    // Name of the environment variable holding the key, never the key itself
    pub api_key_env: String,

    pub examples_dir: PathBuf,
    pub model: Model,
    pub temperature: f32,
    pub retry_delay_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            api_key_env: "OPENAI_API_KEY".into(),
            examples_dir: PathBuf::from("../../src/cleanup_rules/java"),
            model: Model::default(),
            temperature: DEFAULT_TEMPERATURE,
            retry_delay_secs: DEFAULT_RETRY_DELAY.as_secs(),
            request_timeout_secs: 120,
        }
    }
}

impl ClientSettings {
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Relative example paths are taken from `base`, normally the working directory.
    pub fn examples_dir_from(&self, base: &Path) -> PathBuf {
        if self.examples_dir.is_absolute() {
            self.examples_dir.clone()
        } else {
            base.join(&self.examples_dir)
        }
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_in_defaults() {
        let settings: ClientSettings =
            serde_json::from_str(r#"{ "model": "gpt-4-32k", "retry_delay_secs": 3 }"#).unwrap();

        assert_eq!(settings.model, Model::Gpt4_32k);
        assert_eq!(settings.retry_delay(), Duration::from_secs(3));
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.temperature, 0.3);
    }

    #[test]
    fn relative_examples_dir_resolves_against_base() {
        let settings = ClientSettings::default();
        assert_eq!(
            settings.examples_dir_from(Path::new("/work/piranha/experimental/rule_inference")),
            PathBuf::from("/work/piranha/experimental/rule_inference/../../src/cleanup_rules/java")
        );

        let absolute = ClientSettings {
            examples_dir: PathBuf::from("/rules/java"),
            ..ClientSettings::default()
        };
        assert_eq!(absolute.examples_dir_from(Path::new("/elsewhere")), PathBuf::from("/rules/java"));
    }

    #[test]
    fn default_delay_matches_retry_policy() {
        assert_eq!(ClientSettings::default().retry_delay(), Duration::from_secs(10));
    }
}

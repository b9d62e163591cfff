use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Model {
    #[default]
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-32k")]
    Gpt4_32k,
    #[serde(rename = "gpt-3.5-turbo-16k")]
    Gpt35Turbo16k,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt4 => "gpt-4",
            Model::Gpt4_32k => "gpt-4-32k",
            Model::Gpt35Turbo16k => "gpt-3.5-turbo-16k",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt-4" => Ok(Model::Gpt4),
            "gpt-4-32k" => Ok(Model::Gpt4_32k),
            "gpt-3.5-turbo-16k" => Ok(Model::Gpt35Turbo16k),
            other => Err(ConfigError::UnsupportedModel(other.to_string())),
        }
    }
}

/// Fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    temperature: f32,
    model: Model,
    holes: HashMap<String, String>,
}

impl ChatConfig {
    pub fn new(
        holes: HashMap<String, String>,
        temperature: f32,
        model: Model,
    ) -> Result<Self, ConfigError> {
        // NaN fails both comparisons
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ConfigError::TemperatureOutOfRange(temperature));
        }

        Ok(Self {
            temperature,
            model,
            holes,
        })
    }

    /// Default temperature and model.
    pub fn with_holes(holes: HashMap<String, String>) -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            model: Model::default(),
            holes,
        }
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn holes(&self) -> &HashMap<String, String> {
        &self.holes
    }
}

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::model::chat_config::Model;
use crate::model::message::Message;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<Message>,
    pub temperature: f32,
    #[serde(rename = "n")]
    pub sample_count: u32,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    #[serde(default)]
    pub content: Option<String>,
}

/// Anything that can turn a conversation into completion samples.
pub trait CompletionProvider {
    /// Returns one string per requested sample, in provider order.
    fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>, ProviderError>;
}

/// Chat completions over HTTP, OpenAI wire format.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        api_base: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn authorized(&self, builder: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    pub fn test_connection(&self) -> Result<String, ProviderError> {
        let resp = self
            .authorized(self.client.get(format!("{}/models", self.api_base)))
            .send()
            .map_err(map_transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let resp: serde_json::Value = resp
            .json()
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(format!(
            "Connected ({} models available)",
            resp["data"].as_array().map(|a| a.len()).unwrap_or(0)
        ))
    }
}

impl CompletionProvider for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>, ProviderError> {
        let resp = self
            .authorized(self.client.post(format!("{}/chat/completions", self.api_base)))
            .json(request)
            .send()
            .map_err(map_transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let resp = resp
            .json::<ChatCompletionResponse>()
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        samples_from(resp)
    }
}

fn samples_from(resp: ChatCompletionResponse) -> Result<Vec<String>, ProviderError> {
    if resp.choices.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(resp
        .choices
        .into_iter()
        .map(|choice| choice.message.content.unwrap_or_default())
        .collect())
}

fn map_transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Connection(err.to_string())
    }
}

/// Maps a non-success HTTP status onto the provider error taxonomy.
pub fn classify_status(status: StatusCode, message: String) -> ProviderError {
    match status.as_u16() {
        429 => ProviderError::RateLimited,
        408 | 504 => ProviderError::Timeout,
        401 | 403 => ProviderError::Authentication,
        code if status.is_server_error() => ProviderError::Server {
            status: code,
            message,
        },
        code => ProviderError::InvalidRequest {
            status: code,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_wire_field_names() {
        let request = CompletionRequest {
            model: Model::Gpt4_32k,
            messages: vec![Message::user("hi")],
            temperature: 0.5,
            sample_count: 2,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4-32k",
                "messages": [{ "role": "user", "content": "hi" }],
                "temperature": 0.5,
                "n": 2,
            })
        );
    }

    #[test]
    fn decodes_choices_in_order() {
        let resp: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"a"}},{"message":{"role":"assistant","content":"b"}}]}"#,
        )
        .unwrap();

        assert_eq!(samples_from(resp).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn no_choices_is_an_error() {
        let resp: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(samples_from(resp).unwrap_err(), ProviderError::EmptyResponse);
    }

    #[test]
    fn status_classification() {
        let classify = |code: u16| classify_status(StatusCode::from_u16(code).unwrap(), "msg".into());

        assert_eq!(classify(429), ProviderError::RateLimited);
        assert_eq!(classify(408), ProviderError::Timeout);
        assert_eq!(classify(504), ProviderError::Timeout);
        assert_eq!(classify(401), ProviderError::Authentication);
        assert_eq!(
            classify(503),
            ProviderError::Server { status: 503, message: "msg".into() }
        );
        assert_eq!(
            classify(400),
            ProviderError::InvalidRequest { status: 400, message: "msg".into() }
        );

        assert!(classify(500).is_transient());
        assert!(!classify(404).is_transient());
    }
}

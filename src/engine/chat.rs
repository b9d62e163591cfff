use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::engine::example_loader::gather_examples;
use crate::engine::llm_client::{CompletionProvider, CompletionRequest};
use crate::engine::prompt_builder::PromptBuilder;
use crate::engine::retry::{RetryPolicy, Sleeper, ThreadSleeper};
use crate::error::{ChatError, ProviderError};
use crate::model::chat_config::ChatConfig;
use crate::model::conversation::Conversation;
use crate::model::message::Message;

/// One rule-refinement conversation with the completion provider.
///
/// Single-threaded: the retry loop blocks the caller while it waits out
/// transient provider failures.
pub struct RuleChat {
    config: ChatConfig,
    conversation: Conversation,
    provider: Box<dyn CompletionProvider>,
    retry: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
}

impl RuleChat {
    pub fn new(
        config: ChatConfig,
        provider: Box<dyn CompletionProvider>,
        examples_dir: &Path,
    ) -> Result<Self, ChatError> {
        Self::with_retry(
            config,
            provider,
            examples_dir,
            RetryPolicy::default(),
            Box::new(ThreadSleeper),
        )
    }

    pub fn with_retry(
        config: ChatConfig,
        provider: Box<dyn CompletionProvider>,
        examples_dir: &Path,
        retry: RetryPolicy,
        sleeper: Box<dyn Sleeper>,
    ) -> Result<Self, ChatError> {
        // Render the task first so a missing hole fails before touching the filesystem.
        let task = PromptBuilder::task(config.holes())?;
        let examples = gather_examples(examples_dir)?;
        let prompt = PromptBuilder::assemble(&examples, &task);

        Ok(Self {
            config,
            conversation: Conversation::new(prompt),
            provider,
            retry,
            sleeper,
        })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    /// Records a model reply, whether it came from the provider or elsewhere.
    pub fn append_assistant(&mut self, content: impl Into<String>) {
        self.conversation.append_assistant(content.into());
    }

    pub fn append_user_followup(&mut self, followup: impl Into<String>) {
        self.conversation.append_user(followup.into());
    }

    /// Returns the pending assistant reply if there is one, otherwise asks
    /// the provider for a single sample and records it.
    pub fn get_response(&mut self) -> Result<String, ChatError> {
        let mut samples = self.get_responses(1)?;
        Ok(samples.swap_remove(0))
    }

    /// Requests `n_samples` completions and records only the first one.
    /// A pending assistant reply is returned alone, without a provider call.
    pub fn get_responses(&mut self, n_samples: u32) -> Result<Vec<String>, ChatError> {
        if let Some(reply) = self.conversation.pending_reply() {
            info!("Returning pending assistant reply without a provider call");
            return Ok(vec![reply.to_string()]);
        }

        let samples = self.get_completion(n_samples)?;
        let first = samples.first().ok_or(ProviderError::EmptyResponse)?;
        self.conversation.append_assistant(first.clone());
        Ok(samples)
    }

    /// Runs the retry loop without touching the conversation.
    pub fn get_completion(&self, n_samples: u32) -> Result<Vec<String>, ChatError> {
        let request = CompletionRequest {
            model: self.config.model(),
            messages: self.conversation.messages().to_vec(),
            temperature: self.config.temperature(),
            sample_count: n_samples.max(1),
        };
        let expected = request.sample_count as usize;

        loop {
            debug!(
                model = %request.model,
                messages = request.messages.len(),
                "Attempting to get completion from provider"
            );
            debug!("{}", self.conversation.last().content);

            match self.provider.complete(&request) {
                Ok(samples) => {
                    if samples.len() != expected {
                        warn!(
                            "Requested {expected} samples, provider returned {}",
                            samples.len()
                        );
                    }
                    return Ok(samples);
                }
                Err(err) if self.retry.should_retry(&err) => {
                    error!("{err}");
                    info!(
                        "Provider unavailable. Sleeping for {}s.",
                        self.retry.delay.as_secs_f32()
                    );
                    self.sleeper.sleep(self.retry.delay);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

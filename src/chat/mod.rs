//! Conversational completions
//!
//! Free text from the front-end is forwarded to an OpenAI-compatible chat
//! completions endpoint as a single user message, and the first choice is
//! returned.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalogs::http_client;
use crate::{ExoskyError, Result};

/// Text-to-text completion service
pub trait CompletionService {
    fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiChat {
    client: reqwest::blocking::Client,
    url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl OpenAiChat {
    /// Creates a chat client
    ///
    /// # Arguments
    ///
    /// * `url` - Full `/chat/completions` endpoint URL
    /// * `api_key` - Bearer token; requests fail with a configuration error without one
    /// * `model` - Model name sent with every request
    /// * `max_tokens` - Reply length cap
    /// * `timeout` - Per-request timeout
    pub fn new(
        url: &str,
        api_key: Option<String>,
        model: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url.to_string(),
            api_key,
            model: model.to_string(),
            max_tokens,
        })
    }
}

impl CompletionService for OpenAiChat {
    fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ExoskyError::ConfigError("No chat API key configured".into()))?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };
        debug!("Sending {} character prompt to {}", prompt.len(), self.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|e| ExoskyError::ServiceError(format!("Chat request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ExoskyError::ServiceError(format!(
                "Chat service returned status: {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .map_err(|e| ExoskyError::DataError(format!("Invalid chat response: {}", e)))?;

        first_reply(body)
    }
}

fn first_reply(body: ChatResponse) -> Result<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ExoskyError::DataError("Chat response has no content".into()))
}

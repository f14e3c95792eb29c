//! The model inference collaborator.
//!
//! The core only needs one operation: send a single-turn prompt, get the
//! analysis text back. [`InferenceEngine`] is the seam; the production
//! implementation talks to an OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

/// Placeholder text used when the reply carries no usable content.
pub const EMPTY_RESPONSE: &str = "No response from model";

/// Errors from the inference collaborator.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("api error {status}: {body}")]
    Api { status: u16, body: String },
}

/// A collaborator that turns a review prompt into analysis text.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat-completions client.
pub struct OpenAiEngine {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiEngine {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("faultline/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl InferenceEngine for OpenAiEngine {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let url = format!(
            "{}/chat/completions",
            self.api_base.trim_end_matches('/')
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(InferenceError::Api { status, body });
        }

        let reply: ChatResponse = response.json().await?;
        Ok(extract_text(reply))
    }
}

/// The final message's text, or the placeholder for empty/malformed replies.
fn extract_text(reply: ChatResponse) -> String {
    reply
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| EMPTY_RESPONSE.to_string())
}

//! Environment-driven configuration.

use anyhow::Context;
use std::env;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: u32 = 3000;
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Runtime configuration for the inference collaborator.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model identifier passed through to the API.
    pub model: String,
    pub api_key: String,
    pub api_base: String,
    /// Maximum output tokens per completion.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request timeout enforced by the HTTP client.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `OPENAI_API_KEY` is required; everything else has a default.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let api_base =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = normalize_model(
            &env::var("FAULTLINE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        );

        let max_tokens = match env::var("FAULTLINE_MAX_TOKENS") {
            Ok(v) => v.parse().context("FAULTLINE_MAX_TOKENS must be a number")?,
            Err(_) => DEFAULT_MAX_TOKENS,
        };
        let temperature = match env::var("FAULTLINE_TEMPERATURE") {
            Ok(v) => v.parse().context("FAULTLINE_TEMPERATURE must be a number")?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            model,
            api_key,
            api_base,
            max_tokens,
            temperature,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}

/// Strip a provider prefix from a model identifier: `openai/gpt-4o` → `gpt-4o`.
fn normalize_model(name: &str) -> String {
    name.strip_prefix("openai/").unwrap_or(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_model_strips_prefix() {
        assert_eq!(normalize_model("openai/gpt-4o-mini"), "gpt-4o-mini");
        assert_eq!(normalize_model("gpt-4o-mini"), "gpt-4o-mini");
        assert_eq!(normalize_model("openai/"), "");
    }
}

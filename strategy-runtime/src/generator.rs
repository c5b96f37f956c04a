//! AI strategy generation: one chat-completion call turning a user prompt
//! into a validated [`StrategyFromAi`].

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StrategyError;
use crate::model::parse_strategy_json;
use crate::types::{StrategyFromAi, TokenSymbol};

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// AI provider configuration for strategy generation.
#[derive(Debug, Clone)]
pub enum AiProvider {
    /// OpenRouter (OpenAI-style chat completions). The default.
    OpenRouter { api_key: String, model: String },
    /// Anthropic API (Claude models).
    Anthropic { api_key: String, model: String },
}

impl AiProvider {
    pub fn model(&self) -> &str {
        match self {
            AiProvider::OpenRouter { model, .. } => model,
            AiProvider::Anthropic { model, .. } => model,
        }
    }

    pub fn provider_id(&self) -> &str {
        match self {
            AiProvider::OpenRouter { .. } => "openrouter",
            AiProvider::Anthropic { .. } => "anthropic",
        }
    }

    fn api_key(&self) -> &str {
        match self {
            AiProvider::OpenRouter { api_key, .. } => api_key,
            AiProvider::Anthropic { api_key, .. } => api_key,
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            AiProvider::OpenRouter { .. } => OPENROUTER_BASE_URL,
            AiProvider::Anthropic { .. } => ANTHROPIC_BASE_URL,
        }
    }
}

/// The fixed system prompt constraining model output to the strategy schema.
pub fn system_prompt() -> String {
    let symbols: Vec<&str> = TokenSymbol::ALL.iter().map(|s| s.as_str()).collect();
    let symbols = symbols.join(", ");
    [
        "You generate DeFi strategies for the Fluid Yield dapp.".to_string(),
        "All strategies target the Flare testnet deployment of the Strategy and Engine contracts.".to_string(),
        "You must output JSON only, with this exact shape: {\"name\", \"description\", \"summary\", \"riskLevel\", \"inputToken\", \"steps\": [{\"action\", \"outputToken\", \"marketToken\", \"label\"}]}.".to_string(),
        format!("Allowed inputToken symbols: {symbols}."),
        "Allowed step actions: SWAP.".to_string(),
        format!(
            "For SWAP steps, outputToken must be one of: {symbols}, and it must differ from the current token to avoid no-op swaps."
        ),
        "If the user requests an unsupported token, map it to the closest allowed token and STILL produce a valid strategy. Never respond with an error strategy or 'unsupported token' message.".to_string(),
        "Use no more than 10 steps, and each step must be a meaningful DeFi action on the allowed tokens.".to_string(),
        "riskLevel must be one of: low, medium, high. marketToken must always be null.".to_string(),
    ]
    .join(" ")
}

/// Seam between the HTTP layer and the concrete AI client, so handlers and
/// tests can inject a scripted generator.
#[async_trait]
pub trait StrategyGenerator: Send + Sync {
    async fn generate(&self, user_prompt: &str) -> Result<StrategyFromAi, StrategyError>;
}

pub struct AiStrategyGenerator {
    provider: AiProvider,
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl AiStrategyGenerator {
    pub fn new(provider: AiProvider) -> Self {
        let base_url = provider.default_base_url().to_string();
        Self {
            provider,
            client: reqwest::Client::new(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn call_openrouter(&self, user_prompt: &str) -> Result<String, StrategyError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.provider.api_key()))
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.provider.model(),
                "max_tokens": 2048,
                "temperature": 0.1,
                "messages": [
                    {"role": "system", "content": system_prompt()},
                    {"role": "user", "content": user_prompt}
                ]
            }))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| StrategyError::AiError(format!("OpenRouter call failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StrategyError::AiError(format!(
                "OpenRouter returned {status}: {body}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StrategyError::AiError(format!("Failed to parse OpenRouter response: {e}")))?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| StrategyError::AiError("OpenRouter response has no content".into()))
    }

    async fn call_anthropic(&self, user_prompt: &str) -> Result<String, StrategyError> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.provider.api_key())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.provider.model(),
                "max_tokens": 2048,
                "system": system_prompt(),
                "messages": [{"role": "user", "content": user_prompt}]
            }))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| StrategyError::AiError(format!("Anthropic call failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StrategyError::AiError(format!(
                "Anthropic returned {status}: {body}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StrategyError::AiError(format!("Failed to parse Anthropic response: {e}")))?;

        body["content"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| StrategyError::AiError("Anthropic response has no content".into()))
    }
}

#[async_trait]
impl StrategyGenerator for AiStrategyGenerator {
    async fn generate(&self, user_prompt: &str) -> Result<StrategyFromAi, StrategyError> {
        if self.provider.api_key().is_empty() {
            return Err(StrategyError::ConfigError(format!(
                "{} API key is not configured",
                self.provider.provider_id()
            )));
        }
        if user_prompt.trim().is_empty() {
            return Err(StrategyError::ValidationFailed("prompt cannot be empty".into()));
        }

        let content = match &self.provider {
            AiProvider::OpenRouter { .. } => self.call_openrouter(user_prompt).await?,
            AiProvider::Anthropic { .. } => self.call_anthropic(user_prompt).await?,
        };

        let strategy = parse_strategy_json(&content)?;
        tracing::info!(
            provider = self.provider.provider_id(),
            model = self.provider.model(),
            steps = strategy.steps.len(),
            "generated strategy"
        );
        Ok(strategy)
    }
}

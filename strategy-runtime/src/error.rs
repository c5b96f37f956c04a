use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Unknown token {symbol}")]
    UnknownToken { symbol: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("AI provider error: {0}")]
    AiError(String),

    #[error("Chain error: {0}")]
    ChainError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for StrategyError {
    fn from(e: reqwest::Error) -> Self {
        StrategyError::HttpError(e.to_string())
    }
}

impl From<serde_json::Error> for StrategyError {
    fn from(e: serde_json::Error) -> Self {
        StrategyError::SerializationError(e.to_string())
    }
}

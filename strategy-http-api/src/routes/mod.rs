pub mod chat;
pub mod deploy;
pub mod encode;
pub mod engine;
pub mod generate;
pub mod health;
pub mod strategies;
pub mod users;
pub mod wallet;

use axum::http::StatusCode;
use strategy_runtime::StrategyError;

/// Map runtime errors to response status: caller mistakes are 4xx, upstream
/// failures are 502, everything else is on us.
pub fn error_status(err: &StrategyError) -> StatusCode {
    match err {
        StrategyError::UnknownToken { .. } => StatusCode::BAD_REQUEST,
        StrategyError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StrategyError::AiError(_) | StrategyError::ChainError(_) => StatusCode::BAD_GATEWAY,
        StrategyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        StrategyError::ConfigError(_)
        | StrategyError::SerializationError(_)
        | StrategyError::HttpError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn reply_err(err: StrategyError) -> (StatusCode, String) {
    (error_status(&err), err.to_string())
}

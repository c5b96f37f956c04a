use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use strategy_runtime::types::StrategyFromAi;

use super::reply_err;
use crate::chat_store::{self, ROLE_ASSISTANT, ROLE_USER};
use crate::ApiState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub strategy: StrategyFromAi,
    pub fingerprint: String,
}

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/ai/strategy", post(generate))
}

async fn generate(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let prompt = request
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or((StatusCode::BAD_REQUEST, "Missing prompt".to_string()))?;

    let user_id = request
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or((StatusCode::BAD_REQUEST, "Missing user id".to_string()))?;

    let strategy = state.generator.generate(prompt).await.map_err(reply_err)?;

    if let Err(e) = chat_store::record_message(user_id, ROLE_USER, prompt) {
        tracing::warn!("Failed to persist user message: {e}");
    }
    match serde_json::to_string(&strategy) {
        Ok(strategy_json) => {
            if let Err(e) = chat_store::record_message(user_id, ROLE_ASSISTANT, &strategy_json) {
                tracing::warn!("Failed to persist assistant message: {e}");
            }
        }
        Err(e) => tracing::warn!("Failed to serialize strategy for chat history: {e}"),
    }

    tracing::info!(
        user_id = %user_id,
        strategy = %strategy.name,
        steps = strategy.steps.len(),
        "strategy generated"
    );

    Ok(Json(GenerateResponse {
        fingerprint: strategy.fingerprint(),
        strategy,
    }))
}

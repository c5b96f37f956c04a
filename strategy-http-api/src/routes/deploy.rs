use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use strategy_runtime::encoder;
use strategy_runtime::types::StrategyFromAi;

use super::reply_err;
use crate::ApiState;

#[derive(Deserialize)]
pub struct DeployRequest {
    pub strategy: StrategyFromAi,
}

#[derive(Serialize)]
pub struct DeployResponse {
    pub tx_hash: String,
    pub block_number: Option<u64>,
    pub gas_used: Option<String>,
}

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/strategies/deploy", post(deploy))
}

/// Server-side deployment through the operator key. The wallet front-end
/// is the primary path; this exists for operator tooling.
async fn deploy(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<DeployRequest>,
) -> Result<Json<DeployResponse>, (StatusCode, String)> {
    let chain = state.chain.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "Server-side deployment disabled: no operator key configured".to_string(),
    ))?;

    let strategy = request.strategy;
    strategy.validate().map_err(reply_err)?;

    let input_token = state
        .registry
        .resolve(strategy.input_token)
        .map_err(reply_err)?;

    let steps = encoder::build_steps_now(
        &strategy,
        &state.registry,
        state.contracts.swap_connector(),
    )
    .map_err(reply_err)?;

    let outcome = state
        .strategy_client
        .submit_create_strategy(chain, &strategy.name, input_token, &steps)
        .await
        .map_err(reply_err)?;

    tracing::info!(
        tx_hash = %outcome.tx_hash,
        strategy = %strategy.name,
        "strategy deployed by operator"
    );

    Ok(Json(DeployResponse {
        tx_hash: outcome.tx_hash,
        block_number: outcome.block_number,
        gas_used: outcome.gas_used.map(|g| g.to_string()),
    }))
}

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use alloy::primitives::Address;
use strategy_runtime::encoder;
use strategy_runtime::types::{EncodedStep, StrategyFromAi};

use super::reply_err;
use crate::ApiState;

#[derive(Deserialize)]
pub struct EncodeRequest {
    pub strategy: StrategyFromAi,
}

#[derive(Serialize)]
pub struct EncodeResponse {
    /// Strategy registry contract to send the transaction to.
    pub to: String,
    /// 0x-prefixed `createStrategy` calldata.
    pub data: String,
    pub value: String,
    pub input_token: Address,
    pub steps: Vec<EncodedStep>,
}

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/strategies/encode", post(encode))
}

async fn encode(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<EncodeRequest>,
) -> Result<Json<EncodeResponse>, (StatusCode, String)> {
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

    let tx = state
        .strategy_client
        .encode_create_strategy(&strategy.name, input_token, &steps)
        .map_err(reply_err)?;

    Ok(Json(EncodeResponse {
        to: tx.to,
        data: format!("0x{}", hex::encode(tx.data)),
        value: tx.value,
        input_token,
        steps,
    }))
}

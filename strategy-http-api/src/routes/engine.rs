use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use alloy::primitives::B256;
use strategy_runtime::engine_client::EngineClient;

use super::reply_err;
use crate::ApiState;

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineAction {
    Deposit,
    Withdraw,
}

#[derive(Deserialize)]
pub struct EngineEncodeRequest {
    pub action: EngineAction,
    pub strategy_id: String,
    /// Raw token units (deposit) or shares (withdraw), decimal string.
    pub amount: String,
}

#[derive(Serialize)]
pub struct EngineEncodeResponse {
    pub to: String,
    pub data: String,
    pub value: String,
}

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/engine/encode", post(encode))
}

/// Calldata for joining or exiting a deployed strategy, signed by the
/// user's wallet.
async fn encode(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<EngineEncodeRequest>,
) -> Result<Json<EngineEncodeResponse>, (StatusCode, String)> {
    let strategy_id: B256 = request
        .strategy_id
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid strategy id: {e}")))?;

    let client = EngineClient::new(state.contracts.engine, state.chain_id);
    let tx = match request.action {
        EngineAction::Deposit => client.encode_deposit(strategy_id, &request.amount),
        EngineAction::Withdraw => client.encode_withdraw(strategy_id, &request.amount),
    }
    .map_err(reply_err)?;

    Ok(Json(EngineEncodeResponse {
        to: tx.to,
        data: format!("0x{}", hex::encode(tx.data)),
        value: tx.value,
    }))
}

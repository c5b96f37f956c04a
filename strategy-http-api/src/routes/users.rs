use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use alloy::primitives::Address;
use strategy_runtime::types::UserStrategies;

use super::reply_err;
use crate::strategy_store;
use crate::wallet_store;
use crate::ApiState;

#[derive(Deserialize)]
pub struct LinkWalletRequest {
    pub address: String,
}

#[derive(Serialize)]
pub struct LinkWalletResponse {
    pub linked: bool,
    pub address: String,
}

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/users/{user_id}/wallets", post(link_wallet))
        .route("/users/{user_id}/strategies", get(user_strategies))
}

async fn link_wallet(
    Path(user_id): Path<String>,
    Json(request): Json<LinkWalletRequest>,
) -> Result<Json<LinkWalletResponse>, (StatusCode, String)> {
    let address: Address = request
        .address
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid wallet address: {e}")))?;

    let link = wallet_store::link_wallet(&user_id, &format!("{address:#x}"))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok(Json(LinkWalletResponse {
        linked: true,
        address: link.address,
    }))
}

async fn user_strategies(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserStrategies>, (StatusCode, String)> {
    let wallets = wallet_store::wallets_for_user(&user_id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let mut addresses = Vec::with_capacity(wallets.len());
    for wallet in &wallets {
        let address: Address = wallet.parse().map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Stored wallet {wallet} is not an address: {e}"),
            )
        })?;
        addresses.push(address);
    }

    let mut result = state
        .strategy_client
        .fetch_user_strategies(&state.provider, &addresses)
        .await
        .map_err(reply_err)?;

    result.created = strategy_store::attach_metadata(result.created)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;
    result.joined = strategy_store::attach_metadata(result.joined)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok(Json(result))
}

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use alloy::primitives::B256;
use strategy_runtime::model::parse_strategy_json;
use strategy_runtime::types::{StrategyFromAi, StrategyOverview};

use super::reply_err;
use crate::strategy_store::{self, StrategyMetadataRecord};
use crate::ApiState;

#[derive(Serialize)]
pub struct StrategyListResponse {
    pub strategies: Vec<StrategyOverview>,
}

#[derive(Serialize)]
pub struct StrategyDetailResponse {
    pub overview: StrategyOverview,
    /// Full persisted strategy when the stored response still parses;
    /// null otherwise.
    pub ai: Option<StrategyFromAi>,
}

#[derive(Deserialize)]
pub struct PersistMetadataRequest {
    pub strategy_id: String,
    pub curator: String,
    pub ai_response: String,
}

#[derive(Serialize)]
pub struct PersistMetadataResponse {
    pub recorded: bool,
    pub strategy_id: String,
}

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/strategies", get(list_strategies))
        .route("/strategies", post(persist_metadata))
        .route("/strategies/{id}", get(strategy_detail))
}

async fn list_strategies(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<StrategyListResponse>, (StatusCode, String)> {
    let all = state
        .strategy_client
        .fetch_all(&state.provider)
        .await
        .map_err(reply_err)?;

    let strategies = strategy_store::attach_metadata(all)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok(Json(StrategyListResponse { strategies }))
}

async fn strategy_detail(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<StrategyDetailResponse>, (StatusCode, String)> {
    let strategy_id: B256 = id
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid strategy id: {e}")))?;

    let all = state
        .strategy_client
        .fetch_all(&state.provider)
        .await
        .map_err(reply_err)?;
    let all = strategy_store::attach_metadata(all)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let overview = all
        .into_iter()
        .find(|s| s.id == strategy_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Strategy {id} not found")))?;

    let ai = strategy_store::metadata_for(&format!("{strategy_id:#x}"))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?
        .and_then(|row| parse_strategy_json(&row.ai_response).ok());

    Ok(Json(StrategyDetailResponse { overview, ai }))
}

async fn persist_metadata(
    Json(request): Json<PersistMetadataRequest>,
) -> Result<Json<PersistMetadataResponse>, (StatusCode, String)> {
    if request.strategy_id.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Missing strategy_id".into()));
    }

    // Derive the card fields when the response parses; keep the raw
    // response either way.
    let parsed = parse_strategy_json(&request.ai_response).ok();
    let record = StrategyMetadataRecord {
        strategy_id: request.strategy_id.clone(),
        curator: request.curator,
        ai_response: request.ai_response,
        description: parsed.as_ref().map(|s| s.description.clone()),
        summary: parsed.as_ref().map(|s| s.summary.clone()),
        risk_level: parsed.as_ref().map(|s| s.risk_level.as_str().to_string()),
        created_at: Utc::now(),
    };

    strategy_store::record_metadata(record)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok(Json(PersistMetadataResponse {
        recorded: true,
        strategy_id: request.strategy_id,
    }))
}

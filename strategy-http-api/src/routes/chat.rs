use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::chat_store;
use crate::ApiState;

#[derive(Deserialize)]
pub struct ChatListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Serialize)]
pub struct ChatListResponse {
    pub messages: Vec<chat_store::ChatMessage>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/chat/{user_id}", get(list_messages))
}

async fn list_messages(
    Path(user_id): Path<String>,
    Query(query): Query<ChatListQuery>,
) -> Result<Json<ChatListResponse>, (StatusCode, String)> {
    let limit = query.limit.unwrap_or(50).min(200);
    let offset = query.offset.unwrap_or(0);

    let result = chat_store::messages_for_user(&user_id, limit, offset)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok(Json(ChatListResponse {
        messages: result.messages,
        total: result.total,
        limit,
        offset,
    }))
}

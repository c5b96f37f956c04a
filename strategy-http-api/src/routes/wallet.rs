use axum::routing::post;
use axum::{http::StatusCode, Json, Router};
use std::sync::Arc;

use crate::wallet_auth;
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/wallet/auth/challenge", post(auth_challenge))
        .route("/wallet/auth/verify", post(auth_verify))
}

async fn auth_challenge(
    body: Json<wallet_auth::ChallengeRequest>,
) -> Result<Json<wallet_auth::ChallengeResponse>, (StatusCode, String)> {
    wallet_auth::challenge(body).await
}

async fn auth_verify(
    body: Json<wallet_auth::VerifyRequest>,
) -> Result<Json<wallet_auth::VerifyResponse>, (StatusCode, String)> {
    wallet_auth::verify(body).await
}

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::wallet_auth;
use crate::ApiState;

pub async fn auth_middleware(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = request.uri().path();

    // Skip auth for health check and wallet auth endpoints
    if path == "/health"
        || path == "/wallet/auth/challenge"
        || path == "/wallet/auth/verify"
    {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get("authorization")
        .or_else(|| request.headers().get("x-session-token"))
        .and_then(|v| v.to_str().ok());

    match auth_header {
        Some(header) => {
            let token = if header.len() > 7 && header.starts_with("Bearer ") {
                &header[7..]
            } else {
                header
            };

            // Wallet session token (sess_xxx)
            if token.starts_with("sess_") {
                if wallet_auth::validate_session(token).is_some() {
                    return Ok(next.run(request).await);
                }
                return Err(StatusCode::UNAUTHORIZED);
            }

            // Service API token
            if token == state.api_token {
                Ok(next.run(request).await)
            } else {
                Err(StatusCode::UNAUTHORIZED)
            }
        }
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

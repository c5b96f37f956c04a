//! Wallet session auth: EIP-191 challenge/response.
//!
//! The dapp's wallet signs a nonce challenge with `personal_sign`; the
//! recovered address gets an expiring `sess_` token accepted by the auth
//! middleware. Used to gate metadata writes to the curator's own wallet.

use std::sync::LazyLock;

use axum::{http::StatusCode, Json};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

const CHALLENGE_TTL_SECS: u64 = 300;
const SESSION_TTL_SECS: u64 = 3600;

struct PendingChallenge {
    nonce: String,
    created_at: u64,
}

pub struct WalletSession {
    pub token: String,
    /// 0x-prefixed, lowercased.
    pub address: String,
    pub created_at: u64,
    pub expires_at: u64,
}

/// nonce → PendingChallenge (expired entries swept on each new challenge)
static CHALLENGES: LazyLock<DashMap<String, PendingChallenge>> = LazyLock::new(DashMap::new);

/// token → WalletSession
static SESSIONS: LazyLock<DashMap<String, WalletSession>> = LazyLock::new(DashMap::new);

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn challenge_text(nonce: &str) -> String {
    format!("Fluid Yield wallet verification:\n{nonce}")
}

// ── Challenge endpoint ──────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ChallengeRequest {}

#[derive(Serialize)]
pub struct ChallengeResponse {
    pub challenge: String,
    pub nonce: String,
}

pub async fn challenge(
    Json(_body): Json<ChallengeRequest>,
) -> Result<Json<ChallengeResponse>, (StatusCode, String)> {
    let nonce = hex::encode(rand::random::<[u8; 16]>());

    let cutoff = now_secs().saturating_sub(CHALLENGE_TTL_SECS);
    CHALLENGES.retain(|_, v| v.created_at > cutoff);

    CHALLENGES.insert(
        nonce.clone(),
        PendingChallenge {
            nonce: nonce.clone(),
            created_at: now_secs(),
        },
    );

    Ok(Json(ChallengeResponse {
        challenge: challenge_text(&nonce),
        nonce,
    }))
}

// ── Verify endpoint ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub nonce: String,
    pub signature: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub token: String,
    pub address: String,
    pub expires_at: u64,
}

pub async fn verify(
    Json(body): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, (StatusCode, String)> {
    let pending = CHALLENGES
        .remove(&body.nonce)
        .map(|(_, v)| v)
        .ok_or((StatusCode::BAD_REQUEST, "Unknown or expired nonce".into()))?;

    if now_secs() - pending.created_at > CHALLENGE_TTL_SECS {
        return Err((StatusCode::BAD_REQUEST, "Challenge expired".into()));
    }

    let text = challenge_text(&pending.nonce);

    let sig_bytes = hex::decode(body.signature.strip_prefix("0x").unwrap_or(&body.signature))
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid signature hex: {e}")))?;

    let signature = alloy::signers::Signature::try_from(sig_bytes.as_slice())
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid signature: {e}")))?;

    // EIP-191 recovery from the personal_sign message
    let recovered = signature
        .recover_address_from_msg(text.as_bytes())
        .map_err(|e| {
            (
                StatusCode::UNAUTHORIZED,
                format!("Signature recovery failed: {e}"),
            )
        })?;

    let address = format!("{recovered:#x}");

    let now = now_secs();
    SESSIONS.retain(|_, v| v.expires_at > now);

    let token = format!("sess_{}", hex::encode(rand::random::<[u8; 24]>()));
    let expires_at = now + SESSION_TTL_SECS;

    SESSIONS.insert(
        token.clone(),
        WalletSession {
            token: token.clone(),
            address: address.clone(),
            created_at: now,
            expires_at,
        },
    );

    Ok(Json(VerifyResponse {
        token,
        address,
        expires_at,
    }))
}

/// Validate a session token, returning the wallet address it is bound to.
pub fn validate_session(token: &str) -> Option<String> {
    let entry = SESSIONS.get(token)?;
    if entry.expires_at <= now_secs() {
        drop(entry);
        SESSIONS.remove(token);
        return None;
    }
    Some(entry.address.clone())
}

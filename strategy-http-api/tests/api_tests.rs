//! Integration tests for the strategy-builder HTTP API.
//!
//! Tests route handlers with a real axum router: scripted generators for
//! the AI seam, wiremock for the one end-to-end generation test, and an
//! unreachable RPC endpoint for the chain-failure paths.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::Request;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use strategy_http_api::{build_router, chat_store, strategy_store, ApiState};
use strategy_runtime::chain::read_provider;
use strategy_runtime::contracts::DeployedContracts;
use strategy_runtime::generator::{AiProvider, AiStrategyGenerator, StrategyGenerator};
use strategy_runtime::strategy_client::StrategyClient;
use strategy_runtime::types::{
    RiskLevel, StrategyAction, StrategyFromAi, StrategyStep, TokenSymbol,
};
use strategy_runtime::{StrategyError, TokenRegistry};

const TEST_TOKEN: &str = "test-api-token-12345";
const STRATEGY_CONTRACT: &str = "0x0000000000000000000000000000000000000051";
// Port 1 is never listening; chain reads fail fast.
const DEAD_RPC: &str = "http://127.0.0.1:1";

const CONTRACTS_TOML: &str = r#"
    engine = "0x00000000000000000000000000000000000000e1"
    strategy = "0x0000000000000000000000000000000000000051"

    [connectors]
    spark_dex_v2 = "0x00000000000000000000000000000000000000c2"
"#;

/// Ensure a shared temp state dir is set for the entire test binary.
/// OnceCell-backed stores init once per process.
fn ensure_state_dir() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let tmp = tempfile::TempDir::new().unwrap();
        // SAFETY: called once before any other threads read this env var
        unsafe { std::env::set_var("STRATEGY_STATE_DIR", tmp.path()) };
        std::mem::forget(tmp);
    });
}

fn sample_strategy() -> StrategyFromAi {
    StrategyFromAi {
        name: "Stable Rotation".into(),
        description: "Rotate FLR into USDC.".into(),
        summary: "One swap into USDC.".into(),
        risk_level: RiskLevel::Low,
        input_token: TokenSymbol::Flr,
        steps: vec![StrategyStep {
            action: StrategyAction::Swap,
            output_token: TokenSymbol::Usdc,
            market_token: None,
            label: Some("enter stables".into()),
        }],
    }
}

enum Script {
    Ok,
    ConfigError,
    AiError,
}

struct ScriptedGenerator(Script);

#[async_trait::async_trait]
impl StrategyGenerator for ScriptedGenerator {
    async fn generate(&self, _user_prompt: &str) -> Result<StrategyFromAi, StrategyError> {
        match self.0 {
            Script::Ok => Ok(sample_strategy()),
            Script::ConfigError => Err(StrategyError::ConfigError(
                "openrouter API key is not configured".into(),
            )),
            Script::AiError => Err(StrategyError::AiError("OpenRouter returned 503".into())),
        }
    }
}

fn state_with(generator: Arc<dyn StrategyGenerator>, registry: TokenRegistry) -> Arc<ApiState> {
    ensure_state_dir();

    Arc::new(ApiState {
        generator,
        provider: read_provider(DEAD_RPC).expect("test provider"),
        strategy_client: StrategyClient::new(STRATEGY_CONTRACT.parse().unwrap(), 114),
        registry,
        contracts: DeployedContracts::from_toml_str(CONTRACTS_TOML).expect("test contracts"),
        chain: None,
        api_token: TEST_TOKEN.to_string(),
        chain_id: 114,
    })
}

fn test_state(script: Script) -> Arc<ApiState> {
    state_with(
        Arc::new(ScriptedGenerator(script)),
        TokenRegistry::flare_testnet(),
    )
}

fn auth_header() -> String {
    format!("Bearer {TEST_TOKEN}")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn generate_body(user_id: &str) -> String {
    serde_json::to_string(&serde_json::json!({
        "prompt": "rotate my FLR into stables",
        "user_id": user_id
    }))
    .unwrap()
}

fn encode_body() -> String {
    serde_json::to_string(&serde_json::json!({
        "strategy": sample_strategy()
    }))
    .unwrap()
}

// ── Auth ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_needs_no_auth() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn auth_required_for_routes() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/strategies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn auth_rejects_wrong_token() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/strategies")
                .header("authorization", "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

// ── Generation ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn generate_returns_strategy_and_records_chat() {
    let app = build_router(test_state(Script::Ok));
    let user_id = "user-generate-happy";

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ai/strategy")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(generate_body(user_id)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    assert_eq!(json["strategy"]["name"], "Stable Rotation");
    assert_eq!(json["strategy"]["inputToken"], "FLR");
    assert!(json["fingerprint"].as_str().unwrap().starts_with("0x"));

    // Both sides of the exchange land in chat history.
    let chat_response = app
        .oneshot(
            Request::builder()
                .uri(format!("/chat/{user_id}"))
                .header("authorization", auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(chat_response.status(), 200);
    let chat = json_body(chat_response).await;
    let messages = chat["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    let roles: Vec<&str> = messages.iter().map(|m| m["role"].as_str().unwrap()).collect();
    assert!(roles.contains(&"user"));
    assert!(roles.contains(&"assistant"));

    let assistant = messages.iter().find(|m| m["role"] == "assistant").unwrap();
    let stored: serde_json::Value =
        serde_json::from_str(assistant["content"].as_str().unwrap()).unwrap();
    assert_eq!(stored["name"], "Stable Rotation");
}

#[tokio::test]
async fn generate_requires_prompt() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ai/strategy")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(r#"{"user_id": "u1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn generate_requires_user_id() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ai/strategy")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(r#"{"prompt": "stables please"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn generate_surfaces_missing_credentials_as_500() {
    let app = build_router(test_state(Script::ConfigError));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ai/strategy")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(generate_body("user-config-error")))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn generate_surfaces_provider_failure_as_502() {
    let app = build_router(test_state(Script::AiError));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ai/strategy")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(generate_body("user-ai-error")))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn generate_through_real_client_and_mock_provider() {
    let mock_server = MockServer::start().await;

    let model_output = serde_json::json!({
        "name": "Mocked",
        "description": "From the wire.",
        "summary": "FLR -> USDC",
        "riskLevel": "medium",
        "inputToken": "FLR",
        "steps": [
            {"action": "SWAP", "outputToken": "USDC", "marketToken": null, "label": null}
        ]
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": model_output}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let generator = AiStrategyGenerator::new(AiProvider::OpenRouter {
        api_key: "test-key".into(),
        model: "test/model".into(),
    })
    .with_base_url(mock_server.uri());

    let state = state_with(Arc::new(generator), TokenRegistry::flare_testnet());
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ai/strategy")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(generate_body("user-wire")))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    assert_eq!(json["strategy"]["name"], "Mocked");
}

// ── Encoding ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn encode_returns_calldata_and_steps() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/strategies/encode")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(encode_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    assert_eq!(json["to"], STRATEGY_CONTRACT);
    assert!(json["data"].as_str().unwrap().starts_with("0x"));
    assert!(json["data"].as_str().unwrap().len() > 10);
    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["actionType"], 6);
    assert_eq!(steps[0]["amountRatio"], "0x2710");
}

#[tokio::test]
async fn encode_rejects_unknown_token() {
    // Registry missing every stable: resolving USDC is a hard stop.
    let registry = TokenRegistry::new(HashMap::from([(
        TokenSymbol::Flr,
        "0x0000000000000000000000000000000000000001"
            .parse::<Address>()
            .unwrap(),
    )]));
    let state = state_with(Arc::new(ScriptedGenerator(Script::Ok)), registry);
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/strategies/encode")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(encode_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn encode_rejects_structurally_invalid_strategy() {
    let app = build_router(test_state(Script::Ok));

    let mut strategy = sample_strategy();
    strategy.steps.clear();
    let body = serde_json::to_string(&serde_json::json!({ "strategy": strategy })).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/strategies/encode")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn engine_encode_builds_deposit_calldata() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/engine/encode")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({
                        "action": "deposit",
                        "strategy_id": format!("0x{}", "42".repeat(32)),
                        "amount": "1000000"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    assert_eq!(json["to"], "0x00000000000000000000000000000000000000e1");
    assert!(json["data"].as_str().unwrap().starts_with("0x"));

    // Malformed strategy id is a caller error.
    let bad = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/engine/encode")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({
                        "action": "withdraw",
                        "strategy_id": "nope",
                        "amount": "5"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(bad.status(), 400);
}

// ── Strategies ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_strategies_surfaces_chain_failure_as_502() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/strategies")
                .header("authorization", auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn persist_metadata_records_and_joins() {
    let app = build_router(test_state(Script::Ok));

    let strategy_id = format!("0x{}", "ab".repeat(32));
    let ai_response = serde_json::to_string(&sample_strategy()).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/strategies")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({
                        "strategy_id": strategy_id,
                        "curator": "0x0000000000000000000000000000000000000099",
                        "ai_response": ai_response
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    assert_eq!(json["recorded"], true);

    // The stored row carries the derived card fields and joins onto
    // overviews by id.
    let row = strategy_store::metadata_for(&strategy_id).unwrap().unwrap();
    assert_eq!(row.summary.as_deref(), Some("One swap into USDC."));
    assert_eq!(row.risk_level.as_deref(), Some("low"));

    let overview = strategy_runtime::types::StrategyOverview {
        id: strategy_id.parse().unwrap(),
        name: "Stable Rotation".into(),
        curator: "0x0000000000000000000000000000000000000099".parse().unwrap(),
        input_token: Address::ZERO,
        step_count: 1,
        ai: None,
    };
    let joined = strategy_store::attach_metadata(vec![overview]).unwrap();
    let ai = joined[0].ai.as_ref().expect("metadata joined");
    assert_eq!(ai.risk_level.as_deref(), Some("low"));
}

#[tokio::test]
async fn strategy_detail_rejects_malformed_id() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/strategies/not-an-id")
                .header("authorization", auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

// ── Chat history ────────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_history_paginates_newest_first() {
    let app = build_router(test_state(Script::Ok));
    let user_id = "user-pagination";

    for i in 0..3 {
        chat_store::record_message(user_id, "user", &format!("prompt {i}")).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/chat/{user_id}?limit=2&offset=0"))
                .header("authorization", auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(json["total"], 3);
    assert_eq!(messages[0]["content"], "prompt 2");
    assert_eq!(messages[1]["content"], "prompt 1");

    let response2 = app
        .oneshot(
            Request::builder()
                .uri(format!("/chat/{user_id}?limit=2&offset=2"))
                .header("authorization", auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json2 = json_body(response2).await;
    let messages2 = json2["messages"].as_array().unwrap();
    assert_eq!(messages2.len(), 1);
    assert_eq!(messages2[0]["content"], "prompt 0");
}

// ── Deploy ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deploy_without_operator_key_is_unavailable() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/strategies/deploy")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(encode_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
}

// ── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_without_wallets_has_empty_strategy_sets() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/user-no-wallets/strategies")
                .header("authorization", auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    assert_eq!(json["created"].as_array().unwrap().len(), 0);
    assert_eq!(json["joined"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn link_wallet_validates_address() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/user-link/wallets")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(r#"{"address": "not-an-address"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/user-link/wallets")
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"address": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    assert_eq!(json["linked"], true);
    assert_eq!(
        json["address"],
        "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
    );
}

#[tokio::test]
async fn user_with_wallet_hits_chain_and_surfaces_failure() {
    let app = build_router(test_state(Script::Ok));
    let user_id = "user-linked-wallet";

    let link = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/users/{user_id}/wallets"))
                .header("authorization", auth_header())
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(link.status(), 200);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/users/{user_id}/strategies"))
                .header("authorization", auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
}

// ── CORS ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn cors_preflight_needs_no_auth() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/ai/strategy")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .header(
                    "access-control-request-headers",
                    "authorization,content-type",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("access-control-allow-origin"));
    assert!(response.headers().contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn cors_headers_on_normal_requests() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("access-control-allow-origin"));
}

// ── Wallet auth ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn wallet_auth_issues_usable_session_token() {
    let app = build_router(test_state(Script::Ok));

    let challenge_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/wallet/auth/challenge")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(challenge_response.status(), 200);
    let challenge = json_body(challenge_response).await;
    let text = challenge["challenge"].as_str().unwrap().to_string();
    let nonce = challenge["nonce"].as_str().unwrap().to_string();

    let signer = PrivateKeySigner::random();
    let signature = signer.sign_message_sync(text.as_bytes()).unwrap();

    let verify_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/wallet/auth/verify")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({
                        "nonce": nonce,
                        "signature": format!("0x{}", hex::encode(signature.as_bytes()))
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(verify_response.status(), 200);
    let verify = json_body(verify_response).await;
    let token = verify["token"].as_str().unwrap().to_string();
    assert!(token.starts_with("sess_"));
    assert_eq!(
        verify["address"].as_str().unwrap().to_lowercase(),
        format!("{:#x}", signer.address())
    );

    // The session token is accepted by the auth middleware.
    let authed = app
        .oneshot(
            Request::builder()
                .uri("/chat/wallet-auth-user")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(authed.status(), 200);
}

#[tokio::test]
async fn wallet_verify_rejects_unknown_nonce() {
    let app = build_router(test_state(Script::Ok));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/wallet/auth/verify")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({
                        "nonce": "deadbeef",
                        "signature": format!("0x{}", "11".repeat(65))
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn wallet_verify_rejects_garbage_signature() {
    let app = build_router(test_state(Script::Ok));

    let challenge_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/wallet/auth/challenge")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    let challenge = json_body(challenge_response).await;
    let nonce = challenge["nonce"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/wallet/auth/verify")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({
                        "nonce": nonce,
                        "signature": "0xzznotsignature"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

use std::sync::Arc;

use strategy_http_api::{build_router, ApiState};
use strategy_runtime::chain::{read_provider, ChainClient};
use strategy_runtime::contracts::DeployedContracts;
use strategy_runtime::generator::{AiProvider, AiStrategyGenerator};
use strategy_runtime::strategy_client::StrategyClient;
use strategy_runtime::TokenRegistry;

fn setup_log() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};
    if tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {}
}

/// Pick the AI provider from the environment. A missing key is not fatal at
/// startup; generation requests will surface it as a configuration error.
fn build_ai_provider() -> AiProvider {
    let model = std::env::var("AI_MODEL_ID").unwrap_or_else(|_| "openrouter/auto".into());

    match std::env::var("AI_PROVIDER").as_deref() {
        Ok("anthropic") => AiProvider::Anthropic {
            api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            model,
        },
        _ => AiProvider::OpenRouter {
            api_key: std::env::var("OPENROUTER_API_KEY").unwrap_or_default(),
            model,
        },
    }
}

fn build_contracts() -> Result<DeployedContracts, Box<dyn std::error::Error>> {
    let path = std::env::var("CONTRACTS_FILE")
        .map_err(|_| "CONTRACTS_FILE must point at the deployed-contracts TOML")?;
    Ok(DeployedContracts::from_file(&path)?)
}

fn build_registry() -> Result<TokenRegistry, Box<dyn std::error::Error>> {
    match std::env::var("TOKENS_FILE") {
        Ok(path) => Ok(TokenRegistry::from_file(&path)?),
        Err(_) => Ok(TokenRegistry::flare_testnet()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_log();

    let api_token = std::env::var("API_TOKEN").map_err(|_| "API_TOKEN must be set")?;

    let rpc_url =
        std::env::var("RPC_URL").unwrap_or_else(|_| "http://localhost:8545".to_string());

    let chain_id: u64 = std::env::var("CHAIN_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(114);

    let contracts = build_contracts()?;
    let registry = build_registry()?;

    let provider = read_provider(&rpc_url)?;
    let strategy_client = StrategyClient::new(contracts.strategy, chain_id);

    // Server-side deployment only when an operator key is supplied.
    let chain = match std::env::var("OPERATOR_PRIVATE_KEY") {
        Ok(key) if !key.is_empty() => {
            let client = ChainClient::new(&rpc_url, &key, chain_id)?;
            tracing::info!("operator key configured; server-side deployment enabled");
            Some(client)
        }
        _ => None,
    };

    let ai_provider = build_ai_provider();
    tracing::info!(
        provider = ai_provider.provider_id(),
        model = ai_provider.model(),
        chain_id,
        "starting strategy API"
    );
    let generator = AiStrategyGenerator::new(ai_provider);

    let state = Arc::new(ApiState {
        generator: Arc::new(generator),
        provider,
        strategy_client,
        registry,
        contracts,
        chain,
        api_token,
        chain_id,
    });

    let port: u16 = std::env::var("HTTP_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()
        .unwrap_or(8080);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".into());

    let listener = tokio::net::TcpListener::bind(format!("{bind_addr}:{port}")).await?;
    tracing::info!("strategy API listening on {bind_addr}:{port}");

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}

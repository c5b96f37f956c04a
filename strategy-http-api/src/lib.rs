pub mod auth;
pub mod chat_store;
pub mod routes;
pub mod store;
pub mod strategy_store;
pub mod wallet_auth;
pub mod wallet_store;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use strategy_runtime::chain::{ChainClient, ReadProvider};
use strategy_runtime::contracts::DeployedContracts;
use strategy_runtime::generator::StrategyGenerator;
use strategy_runtime::strategy_client::StrategyClient;
use strategy_runtime::TokenRegistry;

pub struct ApiState {
    pub generator: Arc<dyn StrategyGenerator>,
    pub provider: ReadProvider,
    pub strategy_client: StrategyClient,
    pub registry: TokenRegistry,
    pub contracts: DeployedContracts,
    /// Present only when an operator key is configured; enables
    /// server-side deployment.
    pub chain: Option<ChainClient>,
    pub api_token: String,
    pub chain_id: u64,
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::generate::router())
        .merge(routes::encode::router())
        .merge(routes::engine::router())
        .merge(routes::strategies::router())
        .merge(routes::deploy::router())
        .merge(routes::users::router())
        .merge(routes::chat::router())
        .merge(routes::wallet::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .layer(cors)
        .with_state(state)
}

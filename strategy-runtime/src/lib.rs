pub mod chain;
pub mod contracts;
pub mod encoder;
pub mod engine_client;
pub mod error;
pub mod generator;
pub mod model;
pub mod strategy_client;
pub mod tokens;
pub mod types;

pub use error::StrategyError;
pub use tokens::TokenRegistry;
pub use types::*;

//! The strategy encoding pipeline: a validated [`StrategyFromAi`] walked
//! step by step into the ordered [`EncodedStep`] list `createStrategy`
//! expects.
//!
//! The walk keeps a running token: each step swaps the full running balance
//! into its output token, so a step whose output resolves to the running
//! token's address is a no-op and is dropped silently. Token resolution
//! failures are hard stops.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolValue;
use chrono::Utc;

use crate::error::StrategyError;
use crate::tokens::TokenRegistry;
use crate::types::{EncodedStep, StrategyFromAi};

/// Action tag the settlement contract dispatches to the swap connector.
pub const SWAP_ACTION_TYPE: u8 = 6;

/// Amount ratio denominator; every AI-built step routes the full running
/// balance.
pub const MAX_BPS: u64 = 10_000;

/// Default swap deadline offset: one hour.
pub const DEADLINE_SECS: u64 = 3600;

/// Encode a strategy's steps against a fixed deadline timestamp.
///
/// Pure and deterministic: identical inputs produce byte-identical output.
/// Returns an empty vector when every step is a no-op.
pub fn build_steps(
    strategy: &StrategyFromAi,
    registry: &TokenRegistry,
    connector: Address,
    deadline: u64,
) -> Result<Vec<EncodedStep>, StrategyError> {
    let mut running = registry.resolve(strategy.input_token)?;
    let mut steps = Vec::with_capacity(strategy.steps.len());

    for step in &strategy.steps {
        let out = registry.resolve(step.output_token)?;
        if out == running {
            continue;
        }

        let data = encode_swap_data(&[running, out], U256::ZERO, U256::from(deadline));
        steps.push(EncodedStep {
            connector,
            action_type: SWAP_ACTION_TYPE,
            assets_in: vec![running],
            asset_out: out,
            amount_ratio: U256::from(MAX_BPS),
            data,
        });
        running = out;
    }

    Ok(steps)
}

/// [`build_steps`] with the deadline set to now plus [`DEADLINE_SECS`].
pub fn build_steps_now(
    strategy: &StrategyFromAi,
    registry: &TokenRegistry,
    connector: Address,
) -> Result<Vec<EncodedStep>, StrategyError> {
    let deadline = Utc::now().timestamp().max(0) as u64 + DEADLINE_SECS;
    build_steps(strategy, registry, connector, deadline)
}

/// ABI-encode the swap connector payload:
/// `(address[] path, uint256 minAmountOut, uint256 deadline)`.
pub fn encode_swap_data(path: &[Address], min_amount_out: U256, deadline: U256) -> Bytes {
    Bytes::from((path.to_vec(), min_amount_out, deadline).abi_encode_params())
}

/// Inverse of [`encode_swap_data`]; round-trips exactly.
pub fn decode_swap_data(data: &[u8]) -> Result<(Vec<Address>, U256, U256), StrategyError> {
    <(Vec<Address>, U256, U256)>::abi_decode_params(data)
        .map_err(|e| StrategyError::SerializationError(format!("invalid swap payload: {e}")))
}

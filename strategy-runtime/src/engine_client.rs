//! Client for the execution engine contract.
//!
//! The engine moves user funds in and out of deployed strategies; the
//! service only encodes those calls for the wallet front-end to sign.

use alloy::primitives::{Address, B256, U256};
use alloy::sol_types::SolCall;

use crate::contracts::IEngine;
use crate::error::StrategyError;
use crate::strategy_client::EncodedTransaction;

#[derive(Debug, Clone)]
pub struct EngineClient {
    pub engine_address: Address,
    pub chain_id: u64,
}

impl EngineClient {
    pub fn new(engine_address: Address, chain_id: u64) -> Self {
        Self {
            engine_address,
            chain_id,
        }
    }

    fn parse_u256(amount: &str) -> Result<U256, StrategyError> {
        U256::from_str_radix(amount, 10)
            .map_err(|e| StrategyError::ValidationFailed(format!("Invalid amount '{amount}': {e}")))
    }

    /// Encode a deposit call: `deposit(bytes32 strategyId, uint256 amount)`.
    pub fn encode_deposit(
        &self,
        strategy_id: B256,
        amount: &str,
    ) -> Result<EncodedTransaction, StrategyError> {
        let call = IEngine::depositCall {
            strategyId: strategy_id,
            amount: Self::parse_u256(amount)?,
        };

        Ok(EncodedTransaction {
            to: format!("{:#x}", self.engine_address),
            data: call.abi_encode(),
            value: "0".into(),
        })
    }

    /// Encode a withdraw call: `withdraw(bytes32 strategyId, uint256 shares)`.
    pub fn encode_withdraw(
        &self,
        strategy_id: B256,
        shares: &str,
    ) -> Result<EncodedTransaction, StrategyError> {
        let call = IEngine::withdrawCall {
            strategyId: strategy_id,
            shares: Self::parse_u256(shares)?,
        };

        Ok(EncodedTransaction {
            to: format!("{:#x}", self.engine_address),
            data: call.abi_encode(),
            value: "0".into(),
        })
    }
}

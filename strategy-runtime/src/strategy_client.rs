//! Client for the on-chain strategy registry.
//!
//! Encodes `createStrategy` transaction data for the wallet front-end to
//! sign, reads deployed strategies back for listings, and can submit a
//! deployment directly when an operator key is configured.

use std::collections::HashSet;

use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;

use crate::chain::ChainClient;
use crate::contracts::IStrategyRegistry;
use crate::error::StrategyError;
use crate::types::{EncodedStep, StrategyOverview, UserStrategies};
use serde::{Deserialize, Serialize};

/// Encoded transaction data ready for wallet signing or submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedTransaction {
    pub to: String,
    pub data: Vec<u8>,
    pub value: String,
}

/// Outcome of a server-side deployment submission.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub tx_hash: String,
    pub block_number: Option<u64>,
    pub gas_used: Option<u128>,
}

#[derive(Debug, Clone)]
pub struct StrategyClient {
    pub strategy_address: Address,
    pub chain_id: u64,
}

impl StrategyClient {
    pub fn new(strategy_address: Address, chain_id: u64) -> Self {
        Self {
            strategy_address,
            chain_id,
        }
    }

    /// Encode a `createStrategy(string, address, StrategyStep[])` call.
    ///
    /// An empty step list is passed through unchanged; whether to accept it
    /// is the contract's decision.
    pub fn encode_create_strategy(
        &self,
        name: &str,
        input_token: Address,
        steps: &[EncodedStep],
    ) -> Result<EncodedTransaction, StrategyError> {
        use alloy::sol_types::SolCall;

        let sol_steps: Vec<IStrategyRegistry::StrategyStep> = steps
            .iter()
            .map(|s| IStrategyRegistry::StrategyStep {
                connector: s.connector,
                actionType: U256::from(s.action_type),
                assetsIn: s.assets_in.clone(),
                assetOut: s.asset_out,
                amountRatio: s.amount_ratio,
                data: s.data.clone(),
            })
            .collect();

        let call = IStrategyRegistry::createStrategyCall {
            name: name.to_string(),
            inputToken: input_token,
            steps: sol_steps,
        };

        Ok(EncodedTransaction {
            to: format!("{:#x}", self.strategy_address),
            data: call.abi_encode(),
            value: "0".into(),
        })
    }

    /// Read every deployed strategy and reduce it to overview form.
    pub async fn fetch_all<P: Provider>(
        &self,
        provider: &P,
    ) -> Result<Vec<StrategyOverview>, StrategyError> {
        let contract = IStrategyRegistry::new(self.strategy_address, provider);
        let records = contract
            .getAllStrategies()
            .call()
            .await
            .map_err(|e| StrategyError::ChainError(format!("getAllStrategies failed: {e}")))?;

        Ok(records.into_iter().map(overview_from_record).collect())
    }

    /// Ids of the strategies a wallet has joined.
    pub async fn fetch_user_ids<P: Provider>(
        &self,
        provider: &P,
        user: Address,
    ) -> Result<Vec<B256>, StrategyError> {
        let contract = IStrategyRegistry::new(self.strategy_address, provider);
        contract
            .getUserStrategies(user)
            .call()
            .await
            .map_err(|e| StrategyError::ChainError(format!("getUserStrategies failed: {e}")))
    }

    /// Split the full listing into created/joined sets for a user's linked
    /// wallets. Membership lookups fan out per wallet.
    pub async fn fetch_user_strategies<P: Provider>(
        &self,
        provider: &P,
        wallets: &[Address],
    ) -> Result<UserStrategies, StrategyError> {
        if wallets.is_empty() {
            return Ok(UserStrategies::default());
        }

        let all = self.fetch_all(provider).await?;

        let wallet_set: HashSet<Address> = wallets.iter().copied().collect();
        let created: Vec<StrategyOverview> = all
            .iter()
            .filter(|s| wallet_set.contains(&s.curator))
            .cloned()
            .collect();

        let lookups: Vec<_> = wallets
            .iter()
            .map(|w| self.fetch_user_ids(provider, *w))
            .collect();
        let results = futures::future::join_all(lookups).await;

        let mut joined_ids: HashSet<B256> = HashSet::new();
        for result in results {
            joined_ids.extend(result?);
        }

        let joined = all
            .into_iter()
            .filter(|s| joined_ids.contains(&s.id))
            .collect();

        Ok(UserStrategies { created, joined })
    }

    /// Submit `createStrategy` through an operator-keyed client and wait
    /// for the receipt.
    pub async fn submit_create_strategy(
        &self,
        chain: &ChainClient,
        name: &str,
        input_token: Address,
        steps: &[EncodedStep],
    ) -> Result<DeployOutcome, StrategyError> {
        let tx = self.encode_create_strategy(name, input_token, steps)?;

        let tx_request = alloy::rpc::types::TransactionRequest::default()
            .to(self.strategy_address)
            .input(alloy::primitives::Bytes::from(tx.data).into());

        let pending = chain
            .provider
            .send_transaction(tx_request)
            .await
            .map_err(|e| StrategyError::ChainError(format!("createStrategy send failed: {e}")))?;

        let tx_hash = format!("0x{}", hex::encode(pending.tx_hash().as_slice()));

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| StrategyError::ChainError(format!("receipt fetch failed: {e}")))?;

        Ok(DeployOutcome {
            tx_hash,
            block_number: receipt.block_number,
            gas_used: Some(receipt.gas_used.into()),
        })
    }
}

/// Reduce an on-chain record to its listing form. The input token is the
/// first step's first input asset; a step-less strategy shows the zero
/// address.
pub fn overview_from_record(record: IStrategyRegistry::StrategyRecord) -> StrategyOverview {
    let input_token = record
        .steps
        .first()
        .and_then(|s| s.assetsIn.first())
        .copied()
        .unwrap_or(Address::ZERO);

    StrategyOverview {
        id: record.strategyId,
        name: record.name,
        curator: record.curator,
        input_token,
        step_count: record.steps.len(),
        ai: None,
    }
}

//! Providers for the EVM chain the strategy contracts live on.
//!
//! The service mostly reads (strategy listings); writes happen through the
//! dapp's wallet front-end. An operator-keyed client exists for deployments
//! submitted server-side.

use alloy::network::{Ethereum, EthereumWallet};
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
};
use alloy::providers::{Identity, ProviderBuilder, RootProvider};
use alloy::signers::local::PrivateKeySigner;

use crate::error::StrategyError;

/// Provider produced by `ProviderBuilder::new().connect_http(...)`: fills
/// nonce, gas, and chain ID, no signer attached.
pub type ReadProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
    Ethereum,
>;

/// Provider with an operator wallet attached, able to sign and submit.
pub type SignerProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
    Ethereum,
>;

/// Build a read-only provider for RPC queries.
pub fn read_provider(rpc_url: &str) -> Result<ReadProvider, StrategyError> {
    let url: url::Url = rpc_url
        .parse()
        .map_err(|e| StrategyError::ConfigError(format!("Invalid RPC URL: {e}")))?;
    Ok(ProviderBuilder::new().connect_http(url))
}

/// An operator-keyed chain client for server-side strategy deployments.
pub struct ChainClient {
    pub provider: SignerProvider,
    pub wallet: EthereumWallet,
    pub chain_id: u64,
}

impl ChainClient {
    /// The private key should be a hex string (with or without "0x" prefix).
    pub fn new(rpc_url: &str, private_key: &str, chain_id: u64) -> Result<Self, StrategyError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| StrategyError::ConfigError(format!("Invalid private key: {e}")))?;

        let wallet = EthereumWallet::from(signer);

        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| StrategyError::ConfigError(format!("Invalid RPC URL: {e}")))?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.clone())
            .connect_http(url);

        Ok(Self {
            provider,
            wallet,
            chain_id,
        })
    }

    pub fn provider(&self) -> &SignerProvider {
        &self.provider
    }
}

//! Shared Solidity contract bindings for the settlement system.
//!
//! Uses alloy's `sol!` macro to generate type-safe ABI encoders/decoders
//! for the strategy registry and the execution engine.

use std::path::Path;

use alloy::primitives::Address;
use alloy::sol;
use serde::Deserialize;

use crate::error::StrategyError;

sol! {
    #[sol(rpc)]
    interface IStrategyRegistry {
        struct StrategyStep {
            address connector;
            uint256 actionType;
            address[] assetsIn;
            address assetOut;
            uint256 amountRatio;
            bytes data;
        }

        struct StrategyRecord {
            bytes32 strategyId;
            address curator;
            string name;
            string strategyDescription;
            StrategyStep[] steps;
            uint256 minDeposit;
        }

        function createStrategy(string calldata name, address inputToken, StrategyStep[] calldata steps) external returns (bytes32 strategyId);
        function getAllStrategies() external view returns (StrategyRecord[] memory);
        function getUserStrategies(address user) external view returns (bytes32[] memory);
    }

    #[sol(rpc)]
    interface IEngine {
        function deposit(bytes32 strategyId, uint256 amount) external;
        function withdraw(bytes32 strategyId, uint256 shares) external;
    }
}

/// Deployed contract addresses, loaded from a TOML file:
///
/// ```toml
/// engine = "0x…"
/// strategy = "0x…"
///
/// [connectors]
/// spark_dex_v2 = "0x…"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DeployedContracts {
    pub engine: Address,
    pub strategy: Address,
    #[serde(default)]
    pub oracle: Option<Address>,
    pub connectors: Connectors,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Connectors {
    #[serde(default)]
    pub kinetic: Option<Address>,
    pub spark_dex_v2: Address,
    #[serde(default)]
    pub spark_dex_v3: Option<Address>,
}

impl DeployedContracts {
    pub fn from_toml_str(s: &str) -> Result<Self, StrategyError> {
        toml::from_str(s)
            .map_err(|e| StrategyError::ConfigError(format!("invalid contracts file: {e}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StrategyError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StrategyError::ConfigError(format!(
                "cannot read contracts file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    /// The connector AI-built swap steps execute through.
    pub fn swap_connector(&self) -> Address {
        self.connectors.spark_dex_v2
    }
}

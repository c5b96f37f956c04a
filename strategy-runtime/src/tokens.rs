//! Static token registry: symbol → on-chain address.
//!
//! Address assignment is configuration, not algorithm: deployments load the
//! table from a TOML file, and the built-in table exists only as the testnet
//! default. Several symbols mapping to one address is legal — the encoder's
//! no-op elimination absorbs the resulting identity swaps.

use std::collections::HashMap;
use std::path::Path;

use alloy::primitives::Address;
use serde::Deserialize;

use crate::error::StrategyError;
use crate::types::TokenSymbol;

/// Flare testnet defaults. FLR resolves to the wrapped-native address, and
/// the stable symbols share one placeholder until their deployments land.
const SFLR_ADDRESS: &str = "0x4200000000000000000000000000000000000006";
const FXRP_ADDRESS: &str = "0x50c5725949A6F0c72E6C4a641F24049A917DB0Cb";
const USD_STABLE_ADDRESS: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";

#[derive(Debug, Clone)]
pub struct TokenRegistry {
    entries: HashMap<TokenSymbol, Address>,
}

#[derive(Debug, Deserialize)]
struct TokensFile {
    tokens: HashMap<String, Address>,
}

impl TokenRegistry {
    pub fn new(entries: HashMap<TokenSymbol, Address>) -> Self {
        Self { entries }
    }

    /// The built-in testnet table.
    pub fn flare_testnet() -> Self {
        let sflr: Address = SFLR_ADDRESS.parse().expect("valid wrapped-native address");
        let fxrp: Address = FXRP_ADDRESS.parse().expect("valid FXRP address");
        let stable: Address = USD_STABLE_ADDRESS.parse().expect("valid stable address");

        let entries = HashMap::from([
            (TokenSymbol::Flr, sflr),
            (TokenSymbol::Sflr, sflr),
            (TokenSymbol::Fxrp, fxrp),
            (TokenSymbol::Usdc, stable),
            (TokenSymbol::Usdt, stable),
            (TokenSymbol::Usdt0, stable),
        ]);
        Self { entries }
    }

    /// Load a registry from a TOML document of the form:
    ///
    /// ```toml
    /// [tokens]
    /// FLR = "0x4200000000000000000000000000000000000006"
    /// USDC = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, StrategyError> {
        let file: TokensFile = toml::from_str(s)
            .map_err(|e| StrategyError::ConfigError(format!("invalid tokens file: {e}")))?;

        let mut entries = HashMap::with_capacity(file.tokens.len());
        for (symbol, address) in file.tokens {
            let symbol = TokenSymbol::parse(&symbol).ok_or_else(|| {
                StrategyError::ConfigError(format!("unsupported token symbol {symbol} in tokens file"))
            })?;
            entries.insert(symbol, address);
        }

        if entries.is_empty() {
            return Err(StrategyError::ConfigError("tokens file has no entries".into()));
        }
        Ok(Self { entries })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StrategyError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StrategyError::ConfigError(format!("cannot read tokens file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Resolve a symbol to its address. Absence is a hard stop for the
    /// current request, never recoverable.
    pub fn resolve(&self, symbol: TokenSymbol) -> Result<Address, StrategyError> {
        self.entries
            .get(&symbol)
            .copied()
            .ok_or_else(|| StrategyError::UnknownToken {
                symbol: symbol.as_str().to_string(),
            })
    }

    pub fn contains(&self, symbol: TokenSymbol) -> bool {
        self.entries.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::flare_testnet()
    }
}

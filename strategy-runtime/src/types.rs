use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Token symbols the AI is allowed to reference.
///
/// The wire form matches what the model is prompted to emit (`"FLR"`,
/// `"USDT0"`, …); anything outside this set fails deserialization before it
/// can reach the encoder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenSymbol {
    Flr,
    Sflr,
    Fxrp,
    Usdc,
    Usdt,
    Usdt0,
}

impl TokenSymbol {
    /// Every supported symbol, in prompt order.
    pub const ALL: [TokenSymbol; 6] = [
        TokenSymbol::Flr,
        TokenSymbol::Sflr,
        TokenSymbol::Fxrp,
        TokenSymbol::Usdc,
        TokenSymbol::Usdt,
        TokenSymbol::Usdt0,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSymbol::Flr => "FLR",
            TokenSymbol::Sflr => "SFLR",
            TokenSymbol::Fxrp => "FXRP",
            TokenSymbol::Usdc => "USDC",
            TokenSymbol::Usdt => "USDT",
            TokenSymbol::Usdt0 => "USDT0",
        }
    }

    pub fn parse(s: &str) -> Option<TokenSymbol> {
        match s {
            "FLR" => Some(TokenSymbol::Flr),
            "SFLR" => Some(TokenSymbol::Sflr),
            "FXRP" => Some(TokenSymbol::Fxrp),
            "USDC" => Some(TokenSymbol::Usdc),
            "USDT" => Some(TokenSymbol::Usdt),
            "USDT0" => Some(TokenSymbol::Usdt0),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Step action types. SWAP is the only action the settlement contracts
/// currently accept from AI-built strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyAction {
    Swap,
}

/// One step of an AI-produced strategy, as emitted by the model.
///
/// `market_token` and `label` are nullable but required keys — a raw model
/// response that omits them goes through the normalization pass in
/// [`crate::model::parse_strategy_json`] before deserialization retries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategyStep {
    pub action: StrategyAction,
    pub output_token: TokenSymbol,
    /// Kept for backwards compatibility with stored rows; always null for
    /// new strategies.
    pub market_token: Option<String>,
    /// Optional human-readable description of the step.
    pub label: Option<String>,
}

/// A strategy as produced by the AI model, after schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategyFromAi {
    pub name: String,
    pub description: String,
    pub summary: String,
    pub risk_level: RiskLevel,
    pub input_token: TokenSymbol,
    pub steps: Vec<StrategyStep>,
}

/// One encoded strategy step, ready to be packed into `createStrategy`
/// calldata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EncodedStep {
    /// Connector contract executing this step on behalf of the engine.
    pub connector: Address,
    /// Numeric action tag understood by the settlement contract.
    pub action_type: u8,
    pub assets_in: Vec<Address>,
    pub asset_out: Address,
    /// Basis points of the running balance routed into this step.
    pub amount_ratio: U256,
    /// Opaque ABI payload consumed by the connector.
    pub data: Bytes,
}

/// AI metadata persisted alongside a deployed strategy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AiMetadata {
    pub description: Option<String>,
    pub summary: Option<String>,
    pub risk_level: Option<String>,
}

/// A deployed strategy as shown in listings: the on-chain record reduced to
/// its card fields, optionally joined with persisted AI metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyOverview {
    pub id: B256,
    pub name: String,
    pub curator: Address,
    /// Input token inferred from the first step's `assetsIn`; the zero
    /// address when the strategy has no steps.
    pub input_token: Address,
    pub step_count: usize,
    pub ai: Option<AiMetadata>,
}

/// Strategies associated with a user's linked wallets.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserStrategies {
    pub created: Vec<StrategyOverview>,
    pub joined: Vec<StrategyOverview>,
}

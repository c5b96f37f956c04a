//! Persisted AI metadata for deployed strategies, keyed by the on-chain
//! strategy id. The chain owns the canonical record; this store holds what
//! the contract does not: the model's description, summary, risk level, and
//! raw response.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use strategy_runtime::types::{AiMetadata, StrategyOverview};

use crate::store::{state_dir, PersistentStore};

static STRATEGIES: OnceCell<PersistentStore<StrategyMetadataRecord>> = OnceCell::new();

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyMetadataRecord {
    pub strategy_id: String,
    pub curator: String,
    /// Raw model response, re-parsed on read for the detail view.
    pub ai_response: String,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub risk_level: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub fn strategies() -> Result<&'static PersistentStore<StrategyMetadataRecord>, String> {
    STRATEGIES
        .get_or_try_init(|| {
            let path = state_dir().join("strategy-metadata.json");
            PersistentStore::open(path).map_err(|e| e.to_string())
        })
        .map_err(|e: String| e)
}

fn strategy_key(strategy_id: &str) -> String {
    format!("strategy:{}", strategy_id.to_lowercase())
}

pub fn record_metadata(record: StrategyMetadataRecord) -> Result<(), String> {
    let key = strategy_key(&record.strategy_id);
    strategies()?.insert(key, record).map_err(|e| e.to_string())
}

pub fn metadata_for(strategy_id: &str) -> Result<Option<StrategyMetadataRecord>, String> {
    strategies()?
        .get(&strategy_key(strategy_id))
        .map_err(|e| e.to_string())
}

/// All persisted rows indexed by lowercased strategy id. First write wins,
/// matching the dedup behavior of the listing view.
pub fn metadata_by_id() -> Result<HashMap<String, StrategyMetadataRecord>, String> {
    let mut by_id = HashMap::new();
    for row in strategies()?.values().map_err(|e| e.to_string())? {
        by_id
            .entry(row.strategy_id.to_lowercase())
            .or_insert(row);
    }
    Ok(by_id)
}

/// Join persisted AI metadata onto on-chain overviews.
pub fn join_metadata(
    overviews: Vec<StrategyOverview>,
    by_id: &HashMap<String, StrategyMetadataRecord>,
) -> Vec<StrategyOverview> {
    overviews
        .into_iter()
        .map(|mut overview| {
            let key = format!("{:#x}", overview.id);
            overview.ai = by_id.get(&key).map(|row| AiMetadata {
                description: row.description.clone(),
                summary: row.summary.clone(),
                risk_level: row.risk_level.clone(),
            });
            overview
        })
        .collect()
}

/// Fetch the store and join in one step, for route handlers.
pub fn attach_metadata(overviews: Vec<StrategyOverview>) -> Result<Vec<StrategyOverview>, String> {
    let by_id = metadata_by_id()?;
    Ok(join_metadata(overviews, &by_id))
}

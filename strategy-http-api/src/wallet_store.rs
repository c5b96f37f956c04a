//! Links between anonymous user ids and the wallet addresses they have
//! connected. Drives the created/joined split on the user strategies view.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::store::{state_dir, PersistentStore};

static WALLETS: OnceCell<PersistentStore<WalletLink>> = OnceCell::new();

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletLink {
    pub user_id: String,
    /// 0x-prefixed, lowercased.
    pub address: String,
    pub linked_at: DateTime<Utc>,
}

pub fn wallets() -> Result<&'static PersistentStore<WalletLink>, String> {
    WALLETS
        .get_or_try_init(|| {
            let path = state_dir().join("wallet-links.json");
            PersistentStore::open(path).map_err(|e| e.to_string())
        })
        .map_err(|e: String| e)
}

fn wallet_key(user_id: &str, address: &str) -> String {
    format!("wallet:{user_id}:{}", address.to_lowercase())
}

/// Idempotent: re-linking an address refreshes the timestamp.
pub fn link_wallet(user_id: &str, address: &str) -> Result<WalletLink, String> {
    let link = WalletLink {
        user_id: user_id.to_string(),
        address: address.to_lowercase(),
        linked_at: Utc::now(),
    };
    let key = wallet_key(&link.user_id, &link.address);
    wallets()?.insert(key, link.clone()).map_err(|e| e.to_string())?;
    Ok(link)
}

pub fn wallets_for_user(user_id: &str) -> Result<Vec<String>, String> {
    let uid = user_id.to_string();
    Ok(wallets()?
        .values()
        .map_err(|e| e.to_string())?
        .into_iter()
        .filter(|w| w.user_id == uid)
        .map(|w| w.address)
        .collect())
}

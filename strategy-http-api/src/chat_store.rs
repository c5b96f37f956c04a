//! Persisted chat history: the user's prompts and the assistant's strategy
//! responses, keyed by the dapp's anonymous user id.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::store::{state_dir, PersistentStore};

static MESSAGES: OnceCell<PersistentStore<ChatMessage>> = OnceCell::new();

pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub user_id: String,
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

pub fn messages() -> Result<&'static PersistentStore<ChatMessage>, String> {
    MESSAGES
        .get_or_try_init(|| {
            let path = state_dir().join("chat-history.json");
            PersistentStore::open(path).map_err(|e| e.to_string())
        })
        .map_err(|e: String| e)
}

fn message_key(user_id: &str, ts: &DateTime<Utc>, id: &str) -> String {
    format!("chat:{user_id}:{}:{id}", ts.timestamp_millis())
}

pub fn record_message(user_id: &str, role: &str, content: &str) -> Result<ChatMessage, String> {
    let message = ChatMessage {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        role: role.to_string(),
        content: content.to_string(),
        timestamp: Utc::now(),
    };
    let key = message_key(&message.user_id, &message.timestamp, &message.id);
    messages()?
        .insert(key, message.clone())
        .map_err(|e| e.to_string())?;
    Ok(message)
}

pub struct PaginatedMessages {
    pub messages: Vec<ChatMessage>,
    pub total: usize,
}

pub fn messages_for_user(
    user_id: &str,
    limit: usize,
    offset: usize,
) -> Result<PaginatedMessages, String> {
    let uid = user_id.to_string();
    let mut all: Vec<ChatMessage> = messages()?
        .values()
        .map_err(|e| e.to_string())?
        .into_iter()
        .filter(|m| m.user_id == uid)
        .collect();

    // Newest first
    all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let total = all.len();
    let page = all.into_iter().skip(offset).take(limit).collect();

    Ok(PaginatedMessages {
        messages: page,
        total,
    })
}

//! Database schema and types

use chrono::{DateTime, Utc};

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// JSON array of chat sessions
pub const KEY_CHAT_HISTORY: &str = "chatHistory";
/// JSON object with the progression profile
pub const KEY_GAMIFICATION_PROFILE: &str = "gamificationProfile";
/// JSON integer
pub const KEY_INTERACTION_COUNT: &str = "interactionCount";

/// A stored value with its last write time
#[derive(Debug, Clone)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

//! Session store: owns sessions, the progression profile and the
//! interaction counter, and mirrors every mutation to storage
//!
//! In-memory state is authoritative. Each key is decoded on its own at
//! load, so one corrupt entry never discards the others. Write failures
//! are logged and otherwise ignored.

use crate::db::{KEY_CHAT_HISTORY, KEY_GAMIFICATION_PROFILE, KEY_INTERACTION_COUNT};
use crate::progression::{apply_action, ActionKind, ProgressionEvent, ProgressionProfile};
use crate::runtime::Storage;
use crate::session::{ChatSession, Message, SessionCollection};
use rand::Rng;
use serde::de::DeserializeOwned;
use std::ops::RangeInclusive;

/// Seed for a missing counter, so a fresh install doesn't show zero
const INTERACTION_SEED: RangeInclusive<u64> = 3000..=5000;

pub struct SessionStore<S: Storage> {
    storage: S,
    sessions: SessionCollection,
    profile: ProgressionProfile,
    interaction_count: u64,
}

impl<S: Storage> SessionStore<S> {
    /// Load state from storage, falling back per key
    ///
    /// `greeting` opens the fresh session used when no history is stored.
    pub fn load(storage: S, greeting: &str) -> Self {
        let sessions = match decode::<Vec<ChatSession>>(&storage, KEY_CHAT_HISTORY) {
            Some(stored) if !stored.is_empty() => SessionCollection::from_sessions(stored),
            _ => SessionCollection::fresh(greeting),
        };
        let profile = decode::<ProgressionProfile>(&storage, KEY_GAMIFICATION_PROFILE)
            .unwrap_or_default()
            .normalized();
        let interaction_count = decode::<u64>(&storage, KEY_INTERACTION_COUNT)
            .unwrap_or_else(|| rand::thread_rng().gen_range(INTERACTION_SEED));

        tracing::info!(
            sessions = sessions.len(),
            level = profile.level,
            interaction_count,
            "Session store loaded"
        );

        Self {
            storage,
            sessions,
            profile,
            interaction_count,
        }
    }

    pub fn sessions(&self) -> &SessionCollection {
        &self.sessions
    }

    pub fn profile(&self) -> &ProgressionProfile {
        &self.profile
    }

    pub fn interaction_count(&self) -> u64 {
        self.interaction_count
    }

    /// Prepend a greeted session, make it active and return its id
    pub fn create_session(&mut self, greeting: &str) -> String {
        let id = self.sessions.create_session(greeting).id.clone();
        self.persist();
        id
    }

    /// Make `id` active; unknown ids change nothing
    pub fn select_session(&mut self, id: &str) -> bool {
        let selected = self.sessions.select_session(id);
        if selected {
            self.persist();
        }
        selected
    }

    /// Append to a session; unknown ids change nothing
    pub fn append_message(&mut self, session_id: &str, message: Message) -> bool {
        let appended = self.sessions.append_message(session_id, message);
        if appended {
            self.persist();
        } else {
            tracing::warn!(session_id, "Dropped message for unknown session");
        }
        appended
    }

    /// Run the progression engine for one action and persist the result
    pub fn record_action(&mut self, kind: ActionKind) -> Vec<ProgressionEvent> {
        let (profile, events) = apply_action(&self.profile, kind);
        self.profile = profile;
        self.persist();
        events
    }

    pub fn record_interaction(&mut self) -> u64 {
        self.interaction_count = self.interaction_count.saturating_add(1);
        self.persist();
        self.interaction_count
    }

    /// One fresh session and a default profile, written together
    ///
    /// The interaction counter is kept.
    pub fn clear_all(&mut self, greeting: &str) {
        self.sessions.reset(greeting);
        self.profile = ProgressionProfile::default();
        self.persist();
    }

    fn encode(&self) -> Result<[(&'static str, String); 3], serde_json::Error> {
        Ok([
            (KEY_CHAT_HISTORY, serde_json::to_string(self.sessions.sessions())?),
            (KEY_GAMIFICATION_PROFILE, serde_json::to_string(&self.profile)?),
            (KEY_INTERACTION_COUNT, serde_json::to_string(&self.interaction_count)?),
        ])
    }

    fn persist(&self) {
        let result = self
            .encode()
            .map_err(|e| e.to_string())
            .and_then(|entries| self.storage.save_all(&entries));
        if let Err(error) = result {
            tracing::error!(%error, "Failed to persist session store");
        }
    }
}

/// Decode one key; absent, unreadable or malformed values yield `None`
fn decode<T: DeserializeOwned>(storage: &impl Storage, key: &str) -> Option<T> {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            tracing::warn!(key, %error, "Failed to read stored value");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(key, %error, "Discarding malformed stored value");
            None
        }
    }
}

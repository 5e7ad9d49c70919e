//! Chat sessions and the session collection
//!
//! A session always opens with an assistant greeting and only ever grows.
//! The collection keeps the newest session first and tracks which one is
//! active.

use crate::language::strip_annotation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model", alias = "assistant")]
    Assistant,
}

/// A web source the model grounded its reply on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// A chat message, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
}

impl Message {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
            citations: Vec::new(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    #[must_use]
    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }

    /// Text as shown to and copied by the user
    pub fn display_text(&self) -> &str {
        match self.role {
            Role::User => strip_annotation(&self.text),
            Role::Assistant => &self.text,
        }
    }
}

/// One chat thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub messages: Vec<Message>,
}

impl ChatSession {
    /// A new session opened by an assistant greeting
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: vec![Message::assistant(greeting)],
        }
    }

    /// Messages from the first user message on
    ///
    /// Leading assistant messages (the greeting) are UI-only and are not
    /// part of the conversation sent to the model.
    pub fn conversation(&self) -> &[Message] {
        match self.messages.iter().position(|m| m.role == Role::User) {
            Some(start) => &self.messages[start..],
            None => &[],
        }
    }

    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(|m| m.timestamp)
    }

    /// Short title for session lists: the first user message, or the greeting
    pub fn preview(&self) -> String {
        let source = self
            .messages
            .iter()
            .find(|m| m.role == Role::User)
            .or_else(|| self.messages.first())
            .map_or("", Message::display_text);
        let mut preview: String = source.chars().take(60).collect();
        if source.chars().count() > 60 {
            preview.push('…');
        }
        preview
    }
}

/// Ordered sessions with one active pointer
///
/// Invariant: when non-empty, `active_id` names a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCollection {
    sessions: Vec<ChatSession>,
    active_id: Option<String>,
}

impl SessionCollection {
    /// Collection with one fresh, active session
    pub fn fresh(greeting: impl Into<String>) -> Self {
        let mut collection = Self::default();
        collection.create_session(greeting);
        collection
    }

    /// Rebuild from stored sessions; the first one becomes active
    pub fn from_sessions(sessions: Vec<ChatSession>) -> Self {
        let active_id = sessions.first().map(|s| s.id.clone());
        Self {
            sessions,
            active_id,
        }
    }

    /// Prepend a new session and make it active
    pub fn create_session(&mut self, greeting: impl Into<String>) -> &ChatSession {
        let session = ChatSession::with_greeting(greeting);
        self.active_id = Some(session.id.clone());
        self.sessions.insert(0, session);
        &self.sessions[0]
    }

    /// Make `id` active; unknown ids leave the collection unchanged
    pub fn select_session(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active_id = Some(id.to_string());
        true
    }

    /// Append to a session; unknown ids leave the collection unchanged
    pub fn append_message(&mut self, session_id: &str, message: Message) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => {
                session.messages.push(message);
                true
            }
            None => false,
        }
    }

    /// Replace everything with a single fresh session
    pub fn reset(&mut self, greeting: impl Into<String>) {
        *self = Self::fresh(greeting);
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    #[allow(dead_code)] // Used in tests
    pub fn active(&self) -> Option<&ChatSession> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

//! Turn state types

use crate::language::Language;
use crate::progression::ActionKind;
use crate::prompts::UserMode;
use serde::Serialize;

/// Whether a reply is outstanding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnState {
    #[default]
    Idle,
    /// A model call is in flight for `session_id`
    AwaitingReply {
        session_id: String,
        /// Progression credit to grant on success, decided at submit time
        #[serde(skip_serializing_if = "Option::is_none")]
        progression: Option<ActionKind>,
    },
}

impl TurnState {
    #[allow(dead_code)] // Used in tests
    pub fn is_idle(&self) -> bool {
        matches!(self, TurnState::Idle)
    }
}

/// Read-only snapshot of the surroundings a transition needs
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub mode: UserMode,
    pub language: &'static Language,
    pub active_session_id: Option<String>,
}

impl TurnContext {
    pub fn new(
        mode: UserMode,
        language: &'static Language,
        active_session_id: Option<String>,
    ) -> Self {
        Self {
            mode,
            language,
            active_session_id,
        }
    }
}

//! Effects produced by state transitions

use crate::progression::ActionKind;
use crate::session::Citation;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Store the user's message
    AppendUserMessage { session_id: String, text: String },

    /// Ask the model for a reply to the session's conversation
    RequestReply { session_id: String },

    /// Store the assistant's reply
    AppendAssistantMessage {
        session_id: String,
        text: String,
        citations: Vec<Citation>,
    },

    /// Bump the interaction counter
    RecordInteraction,

    /// Run the progression engine
    ApplyProgression { kind: ActionKind },
}

impl Effect {
    pub fn assistant_message(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Effect::AppendAssistantMessage {
            session_id: session_id.into(),
            text: text.into(),
            citations: Vec::new(),
        }
    }
}

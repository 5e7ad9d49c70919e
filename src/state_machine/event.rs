//! Events that drive a turn

use crate::progression::ActionKind;
use crate::session::Citation;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The user sends a message to the active session
    Submit {
        text: String,
        /// Progression credit requested by a quick action
        action: Option<ActionKind>,
        /// Typed text gets the language annotation; canned prompts don't
        annotate: bool,
    },

    // LLM events
    ReplyReceived {
        text: String,
        citations: Vec<Citation>,
    },
    ReplyFailed {
        message: String,
    },
}

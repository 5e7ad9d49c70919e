//! Pure state transition function

use super::{Effect, Event, TurnContext, TurnState};
use crate::language::annotate;
use crate::prompts::{UserMode, APOLOGY_MESSAGE, EMPTY_REPLY_FALLBACK};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TurnState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A reply is still pending; wait for it before sending another message")]
    TurnInFlight,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("No active session")]
    NoActiveSession,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs; message ids
/// and timestamps are assigned when effects run.
pub fn transition(
    state: &TurnState,
    context: &TurnContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Idle + Submit -> AwaitingReply
        (
            TurnState::Idle,
            Event::Submit {
                text,
                action,
                annotate: typed,
            },
        ) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            let session_id = context
                .active_session_id
                .clone()
                .ok_or(TransitionError::NoActiveSession)?;

            let stored = if typed {
                annotate(text, context.language)
            } else {
                text.to_string()
            };
            // Only learners earn progression
            let progression = action.filter(|_| context.mode == UserMode::Learner);

            Ok(TransitionResult::new(TurnState::AwaitingReply {
                session_id: session_id.clone(),
                progression,
            })
            .with_effect(Effect::AppendUserMessage {
                session_id: session_id.clone(),
                text: stored,
            })
            .with_effect(Effect::RequestReply { session_id }))
        }

        // AwaitingReply + Submit -> rejected, nothing changes
        (TurnState::AwaitingReply { .. }, Event::Submit { .. }) => {
            Err(TransitionError::TurnInFlight)
        }

        // AwaitingReply + ReplyReceived -> Idle
        (
            TurnState::AwaitingReply {
                session_id,
                progression,
            },
            Event::ReplyReceived { text, citations },
        ) => {
            let text = if text.trim().is_empty() {
                EMPTY_REPLY_FALLBACK.to_string()
            } else {
                text
            };
            let mut result = TransitionResult::new(TurnState::Idle)
                .with_effect(Effect::AppendAssistantMessage {
                    session_id: session_id.clone(),
                    text,
                    citations,
                })
                .with_effect(Effect::RecordInteraction);
            if let Some(kind) = progression {
                result = result.with_effect(Effect::ApplyProgression { kind: *kind });
            }
            Ok(result)
        }

        // AwaitingReply + ReplyFailed -> Idle with the apology
        (TurnState::AwaitingReply { session_id, .. }, Event::ReplyFailed { .. }) => {
            Ok(TransitionResult::new(TurnState::Idle)
                .with_effect(Effect::assistant_message(session_id.clone(), APOLOGY_MESSAGE)))
        }

        (TurnState::Idle, event) => Err(TransitionError::InvalidTransition(format!(
            "no reply is pending for {event:?}"
        ))),
    }
}

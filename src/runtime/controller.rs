//! Conversation controller
//!
//! All mutable state sits behind one `std::sync::Mutex` that is never held
//! across an `.await`. The model call runs in a spawned task, so a turn
//! always completes even if the caller goes away.

use super::traits::Storage;
use crate::language::{default_language, find_language, Language};
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use crate::progression::{ProgressionEvent, ProgressionProfile};
use crate::prompts::{
    feedback_prompt, language_greeting, QuickAction, UserMode, HISTORY_CLEARED, WELCOME_MESSAGE,
};
use crate::session::{ChatSession, Message};
use crate::state_machine::{
    transition, Effect, Event, TransitionError, TurnContext, TurnState,
};
use crate::store::SessionStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Reasons an operation is refused; refused operations change nothing
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Rejected(#[from] TransitionError),
    #[error("Session not found: {0}")]
    UnknownSession(String),
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
    #[error("Action {action:?} is not available in {mode:?} mode")]
    WrongMode { action: QuickAction, mode: UserMode },
    #[error("Feedback analysis is only available in instructor mode")]
    InstructorOnly,
    #[error("Turn task failed: {0}")]
    Internal(String),
}

/// What a completed turn produced
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session_id: String,
    pub user_message: Message,
    /// The model's answer, or the apology when the call failed
    pub reply: Message,
    pub failed: bool,
    pub progression: Vec<ProgressionEvent>,
}

impl TurnOutcome {
    pub fn notifications(&self) -> Vec<String> {
        self.progression
            .iter()
            .map(ProgressionEvent::notification)
            .collect()
    }
}

/// Top-level view of the controller
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub mode: UserMode,
    pub language: &'static Language,
    pub turn: TurnState,
    pub interaction_count: u64,
    pub active_session_id: Option<String>,
}

struct ControllerState<S: Storage> {
    store: SessionStore<S>,
    turn: TurnState,
    mode: UserMode,
    language: &'static Language,
}

impl<S: Storage> ControllerState<S> {
    fn context(&self) -> TurnContext {
        TurnContext::new(
            self.mode,
            self.language,
            self.store.sessions().active_id().map(String::from),
        )
    }

    /// Run the effects of the reply half of a turn
    ///
    /// When the originating session is gone (history cleared mid-turn) the
    /// reply is dropped and neither the counter nor progression moves.
    fn apply_reply_effects(
        &mut self,
        effects: Vec<Effect>,
    ) -> (Option<Message>, Vec<ProgressionEvent>) {
        let mut reply = None;
        let mut delivered = false;
        let mut progression = Vec::new();
        for effect in effects {
            match effect {
                Effect::AppendAssistantMessage {
                    session_id,
                    text,
                    citations,
                } => {
                    let message = Message::assistant(text).with_citations(citations);
                    delivered = self.store.append_message(&session_id, message.clone());
                    if delivered {
                        reply = Some(message);
                    }
                }
                Effect::RecordInteraction if delivered => {
                    self.store.record_interaction();
                }
                Effect::ApplyProgression { kind } if delivered => {
                    progression.extend(self.store.record_action(kind));
                }
                Effect::RecordInteraction | Effect::ApplyProgression { .. } => {
                    tracing::debug!(?effect, "Skipping effect for a dropped reply");
                }
                Effect::AppendUserMessage { .. } | Effect::RequestReply { .. } => {
                    tracing::warn!(?effect, "Unexpected effect while completing a turn");
                }
            }
        }
        (reply, progression)
    }
}

/// Drives turns and the session-level operations around them
pub struct ConversationController<S: Storage> {
    state: Mutex<ControllerState<S>>,
    llm: Arc<dyn LlmService>,
    system_prompt: String,
}

impl<S: Storage + 'static> ConversationController<S> {
    pub fn new(store: SessionStore<S>, llm: Arc<dyn LlmService>, system_prompt: String) -> Self {
        Self {
            state: Mutex::new(ControllerState {
                store,
                turn: TurnState::Idle,
                mode: UserMode::default(),
                language: default_language(),
            }),
            llm,
            system_prompt,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState<S>> {
        // State is only mutated through complete store operations
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Turns ====================

    /// Send typed text to the active session
    pub async fn submit(self: &Arc<Self>, text: &str) -> Result<TurnOutcome, ControllerError> {
        self.run_turn(Event::Submit {
            text: text.to_string(),
            action: None,
            annotate: true,
        })
        .await
    }

    /// Send a canned prompt for the current mode
    pub async fn quick_action(
        self: &Arc<Self>,
        action: QuickAction,
    ) -> Result<TurnOutcome, ControllerError> {
        let mode = self.lock().mode;
        if action.mode() != mode {
            return Err(ControllerError::WrongMode { action, mode });
        }
        self.run_turn(Event::Submit {
            text: action.prompt().to_string(),
            action: action.action_kind(),
            annotate: false,
        })
        .await
    }

    /// Ask for an analysis of a student's paragraph (instructor only)
    pub async fn submit_feedback(
        self: &Arc<Self>,
        student_text: &str,
    ) -> Result<TurnOutcome, ControllerError> {
        if self.lock().mode != UserMode::Instructor {
            return Err(ControllerError::InstructorOnly);
        }
        let student_text = student_text.trim();
        if student_text.is_empty() {
            return Err(TransitionError::EmptyMessage.into());
        }
        self.run_turn(Event::Submit {
            text: feedback_prompt(student_text),
            action: None,
            annotate: false,
        })
        .await
    }

    async fn run_turn(self: &Arc<Self>, submit: Event) -> Result<TurnOutcome, ControllerError> {
        let (session_id, user_message, request) = self.begin_turn(submit)?;

        let controller = Arc::clone(self);
        let task = tokio::spawn({
            let session_id = session_id.clone();
            let user_message = user_message.clone();
            async move {
                let result = controller.llm.complete(&request).await;
                controller.finish_turn(&session_id, user_message, result)
            }
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                // The task died before finishing; resolve through the failure path
                tracing::error!(session_id = %session_id, error = %e, "Turn task failed");
                let error = LlmError::unknown(format!("Turn task failed: {e}"));
                self.finish_turn(&session_id, user_message, Err(error))
            }
        }
    }

    /// Idle -> AwaitingReply: store the user message and build the request
    fn begin_turn(&self, submit: Event) -> Result<(String, Message, LlmRequest), ControllerError> {
        let mut state = self.lock();
        let result = transition(&state.turn, &state.context(), submit)?;

        let mut user_message = None;
        let mut request = None;
        let mut session_id = None;
        for effect in result.effects {
            match effect {
                Effect::AppendUserMessage { session_id: id, text } => {
                    let message = Message::user(text);
                    state.store.append_message(&id, message.clone());
                    user_message = Some(message);
                }
                Effect::RequestReply { session_id: id } => {
                    let session = state
                        .store
                        .sessions()
                        .get(&id)
                        .ok_or_else(|| ControllerError::UnknownSession(id.clone()))?;
                    request = Some(LlmRequest::for_session(self.system_prompt.as_str(), session));
                    session_id = Some(id);
                }
                other => {
                    tracing::warn!(effect = ?other, "Unexpected effect while starting a turn");
                }
            }
        }

        match (session_id, user_message, request) {
            (Some(session_id), Some(user_message), Some(request)) => {
                state.turn = result.new_state;
                tracing::info!(
                    session_id = %session_id,
                    messages = request.messages.len(),
                    "Turn started"
                );
                Ok((session_id, user_message, request))
            }
            _ => Err(ControllerError::Internal(
                "submit produced an incomplete turn".to_string(),
            )),
        }
    }

    /// AwaitingReply -> Idle: store the reply (or apology) and credit progress
    fn finish_turn(
        &self,
        session_id: &str,
        user_message: Message,
        result: Result<LlmResponse, LlmError>,
    ) -> Result<TurnOutcome, ControllerError> {
        let failed = result.is_err();
        let event = match result {
            Ok(response) => Event::ReplyReceived {
                text: response.text,
                citations: response.citations,
            },
            Err(e) => {
                tracing::warn!(session_id, error = %e, "Reply failed, storing apology");
                Event::ReplyFailed { message: e.message }
            }
        };

        let mut state = self.lock();
        let transition_result = transition(&state.turn, &state.context(), event)?;
        state.turn = transition_result.new_state;
        let (reply, progression) = state.apply_reply_effects(transition_result.effects);

        let reply = reply.ok_or_else(|| ControllerError::UnknownSession(session_id.to_string()))?;
        tracing::info!(
            session_id,
            failed,
            progression_events = progression.len(),
            "Turn finished"
        );
        Ok(TurnOutcome {
            session_id: session_id.to_string(),
            user_message,
            reply,
            failed,
            progression,
        })
    }

    // ==================== Sessions ====================

    /// Open a fresh session greeted for the current mode
    pub fn new_chat(&self) -> String {
        let mut state = self.lock();
        let greeting = state.mode.new_chat_greeting();
        state.store.create_session(greeting)
    }

    pub fn select_session(&self, id: &str) -> Result<(), ControllerError> {
        if self.lock().store.select_session(id) {
            Ok(())
        } else {
            Err(ControllerError::UnknownSession(id.to_string()))
        }
    }

    /// Switch mode; a change opens a session greeted with the mode banner
    ///
    /// Returns the new session id, or `None` when the mode was unchanged.
    pub fn set_mode(&self, mode: UserMode) -> Option<String> {
        let mut state = self.lock();
        if state.mode == mode {
            return None;
        }
        state.mode = mode;
        tracing::info!(?mode, "Mode changed");
        Some(state.store.create_session(mode.banner()))
    }

    /// Switch language; a change opens a session announcing the corpus
    pub fn set_language(&self, code: &str) -> Result<Option<String>, ControllerError> {
        let language =
            find_language(code).ok_or_else(|| ControllerError::UnknownLanguage(code.to_string()))?;
        let mut state = self.lock();
        if state.language == language {
            return Ok(None);
        }
        state.language = language;
        tracing::info!(language = language.code, "Language changed");
        Ok(Some(state.store.create_session(&language_greeting(language))))
    }

    /// Drop all sessions and progress; returns the notification to show
    pub fn clear_all(&self) -> String {
        let mut state = self.lock();
        state.store.clear_all(WELCOME_MESSAGE);
        tracing::info!("History and progression cleared");
        HISTORY_CLEARED.to_string()
    }

    // ==================== Read models ====================

    pub fn status(&self) -> StatusSnapshot {
        let state = self.lock();
        StatusSnapshot {
            mode: state.mode,
            language: state.language,
            turn: state.turn.clone(),
            interaction_count: state.store.interaction_count(),
            active_session_id: state.store.sessions().active_id().map(String::from),
        }
    }

    /// All sessions, newest first, and the active id
    pub fn sessions(&self) -> (Vec<ChatSession>, Option<String>) {
        let state = self.lock();
        let sessions = state.store.sessions();
        (
            sessions.sessions().to_vec(),
            sessions.active_id().map(String::from),
        )
    }

    pub fn session(&self, id: &str) -> Result<ChatSession, ControllerError> {
        self.lock()
            .store
            .sessions()
            .get(id)
            .cloned()
            .ok_or_else(|| ControllerError::UnknownSession(id.to_string()))
    }

    pub fn profile(&self) -> ProgressionProfile {
        self.lock().store.profile().clone()
    }
}

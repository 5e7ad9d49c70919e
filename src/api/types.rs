//! API request and response types

use crate::language::{Language, LANGUAGES};
use crate::progression::{ActionKind, BadgeBoard, ProgressSummary, ProgressionEvent, ProgressionProfile};
use crate::prompts::{QuickAction, UserMode};
use crate::render::{render_message, ContentBlock};
use crate::runtime::{StatusSnapshot, TurnOutcome};
use crate::session::{ChatSession, Citation, Message, Role};
use crate::state_machine::TurnState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to send a typed chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Request to run a quick action
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: QuickAction,
}

/// Request to analyse a student's paragraph
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: UserMode,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub code: String,
}

/// Request to parse arbitrary text into blocks
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
}

impl From<&'static Language> for LanguageInfo {
    fn from(language: &'static Language) -> Self {
        Self {
            code: language.code,
            name: language.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuickActionInfo {
    pub action: QuickAction,
    pub label: &'static str,
    pub prompt: &'static str,
}

/// Response for `GET /api/state`
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub mode: UserMode,
    pub language: LanguageInfo,
    pub turn: TurnState,
    pub interaction_count: u64,
    pub active_session_id: Option<String>,
    pub languages: Vec<LanguageInfo>,
    /// Quick actions offered in the current mode
    pub quick_actions: Vec<QuickActionInfo>,
}

impl From<StatusSnapshot> for StateResponse {
    fn from(status: StatusSnapshot) -> Self {
        Self {
            mode: status.mode,
            language: status.language.into(),
            turn: status.turn,
            interaction_count: status.interaction_count,
            active_session_id: status.active_session_id,
            languages: LANGUAGES.iter().map(LanguageInfo::from).collect(),
            quick_actions: QuickAction::for_mode(status.mode)
                .iter()
                .map(|action| QuickActionInfo {
                    action: *action,
                    label: action.label(),
                    prompt: action.prompt(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub preview: String,
    pub message_count: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

impl From<&ChatSession> for SessionSummary {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id.clone(),
            preview: session.preview(),
            message_count: session.messages.len(),
            last_activity: session.last_activity(),
        }
    }
}

/// Response for `GET /api/sessions`
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
    pub active_session_id: Option<String>,
}

/// Response for operations that may open a session
#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    /// `None` when the operation changed nothing
    pub session_id: Option<String>,
}

/// A message as the client shows it
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub id: String,
    pub role: Role,
    /// Display text, without the language annotation
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    pub blocks: Vec<ContentBlock>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            role: message.role,
            text: message.display_text().to_string(),
            timestamp: message.timestamp,
            citations: message.citations.clone(),
            blocks: render_message(message),
        }
    }
}

/// Response for `GET /api/sessions/:id/messages`
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub session_id: String,
    pub messages: Vec<MessageView>,
}

/// Response for operations that run a turn
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: String,
    pub user_message: MessageView,
    pub reply: MessageView,
    /// The model call failed and `reply` is the apology
    pub failed: bool,
    pub progression: Vec<ProgressionEvent>,
    pub notifications: Vec<String>,
}

impl From<TurnOutcome> for TurnResponse {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            notifications: outcome.notifications(),
            session_id: outcome.session_id,
            user_message: MessageView::from(&outcome.user_message),
            reply: MessageView::from(&outcome.reply),
            failed: outcome.failed,
            progression: outcome.progression,
        }
    }
}

/// Response for `GET /api/profile`
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub summary: ProgressSummary,
    pub badges: BadgeBoard,
    pub action_counts: BTreeMap<ActionKind, u32>,
}

impl From<ProgressionProfile> for ProfileResponse {
    fn from(profile: ProgressionProfile) -> Self {
        Self {
            summary: profile.summary(),
            badges: profile.badge_board(),
            action_counts: profile.action_counts,
        }
    }
}

/// Response for `DELETE /api/history`
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub notification: String,
}

/// Response for `POST /api/render`
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub blocks: Vec<ContentBlock>,
    /// Block text without markers, one block per line
    pub plain_text: String,
}

impl RenderResponse {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        let plain_text = blocks
            .iter()
            .map(ContentBlock::visible_text)
            .collect::<Vec<_>>()
            .join("\n");
        Self { blocks, plain_text }
    }
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

//! Turn state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! One turn (a user message and its reply) runs at a time across all
//! sessions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{TurnContext, TurnState};
pub use transition::{transition, TransitionError};

//! Runtime for executing turns
//!
//! The controller owns the session store and the turn state machine, runs
//! transition effects, and performs the one asynchronous step: the model
//! call.

mod controller;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use controller::{ControllerError, ConversationController, StatusSnapshot, TurnOutcome};
pub use traits::*;

use std::sync::Arc;

/// Type alias for the production controller
pub type ProductionController = ConversationController<Arc<dyn Storage>>;

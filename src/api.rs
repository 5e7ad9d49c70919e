//! HTTP API for vansiso

mod handlers;
mod types;

pub use handlers::create_router;

use crate::runtime::ProductionController;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ProductionController>,
}

impl AppState {
    pub fn new(controller: ProductionController) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }
}

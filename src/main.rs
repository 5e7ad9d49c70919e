//! Văn Sĩ Số - literature tutor for lower-secondary learners
//!
//! A Rust backend that runs tutoring turns against a grounded Gemini model,
//! keeps chat sessions and learner progression in SQLite, and serves them
//! over a JSON API.

mod api;
mod db;
mod language;
mod llm;
mod progression;
mod prompts;
mod render;
mod runtime;
mod session;
mod state_machine;
mod store;
mod system_prompt;

use api::{create_router, AppState};
use db::Database;
use llm::LlmConfig;
use prompts::WELCOME_MESSAGE;
use runtime::{ConversationController, Storage};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use store::SessionStore;
use system_prompt::load_system_instruction;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vansiso=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let db_path = std::env::var("VANSISO_DB_PATH").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        format!("{home}/.vansiso/vansiso.db")
    });

    let port: u16 = std::env::var("VANSISO_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let prompt_override = std::env::var("VANSISO_SYSTEM_PROMPT_FILE")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize storage and restore saved sessions
    tracing::info!(path = %db_path, "Opening database");
    let storage: Arc<dyn Storage> = Arc::new(Database::open(&db_path)?);
    let store = SessionStore::load(storage, WELCOME_MESSAGE);

    // Initialize the model client
    let llm_config = LlmConfig::from_env();
    if llm_config.is_configured() {
        tracing::info!(model = %llm_config.model, "Gemini client configured");
    } else {
        tracing::warn!(
            "No Gemini credentials configured. Set GEMINI_API_KEY or LLM_GATEWAY; turns will fail with an apology."
        );
    }
    let llm = llm_config.build_service()?;

    let system_prompt = load_system_instruction(prompt_override.as_deref());

    // Create application state
    let state = AppState::new(ConversationController::new(store, llm, system_prompt));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Văn Sĩ Số server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

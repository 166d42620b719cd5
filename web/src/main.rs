//! Ultimate Tic-Tac-Toe web server.
//!
//! HTTP API for the browser UI. Games live in memory, keyed by a
//! caller-chosen session id.
//! Endpoints:
//! - GET  /health                  - Health check
//! - GET  /metrics                 - Prometheus metrics
//! - POST /api/new/:session_id     - Start a game (optional difficulty / first)
//! - GET  /api/state/:session_id   - Current game state
//! - POST /api/move/:session_id    - Human move
//! - POST /api/ai_move/:session_id - AI move
//! - POST /api/reset/:session_id   - Restart with the same difficulty

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use engine_config::load_config;
use std::collections::HashMap;
use std::sync::Arc;
use strategies::{AiSettings, Difficulty};
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

mod game;
mod handlers;
mod metrics;
mod types;

use game::GameSession;
use handlers::{ai_move, get_state, health, make_move, metrics_handler, new_game, reset_game};

/// Sessions by id. Each session has its own lock so games never block each other.
pub type SessionStore = Mutex<HashMap<String, Arc<Mutex<GameSession>>>>;

/// Shared application state
pub struct AppState {
    pub sessions: SessionStore,
    /// Search budgets for the AI strategies
    pub settings: AiSettings,
    /// Difficulty for new games that don't name one
    pub default_difficulty: Difficulty,
    /// Fixed AI seed, or entropy when unset
    pub seed: Option<u64>,
    pub max_sessions: usize,
}

impl AppState {
    pub fn new(
        settings: AiSettings,
        default_difficulty: Difficulty,
        seed: Option<u64>,
        max_sessions: usize,
    ) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            settings,
            default_difficulty,
            seed,
            max_sessions,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Create the application router with the given state.
/// This is separated out for testing purposes.
pub fn create_app(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    metrics::init_metrics();

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api/new/:session_id", post(new_game))
        .route("/api/state/:session_id", get(get_state))
        .route("/api/move/:session_id", post(make_move))
        .route("/api/ai_move/:session_id", post(ai_move))
        .route("/api/reset/:session_id", post(reset_game))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Create application state for testing: small search budgets, fixed seed.
#[cfg(test)]
pub fn create_test_state() -> Arc<AppState> {
    let settings = AiSettings {
        mcts: mcts::MctsConfig::for_testing(),
        heuristic: heuristic::HeuristicConfig::for_testing(),
        opening_book: true,
        tactics: true,
    };
    Arc::new(AppState::new(settings, Difficulty::Medium, Some(42), 4))
}

/// Creates a future that completes when a shutdown signal is received.
/// Handles Ctrl+C on all platforms.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from config.toml with env var overrides
    let config = load_config();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("web={}", config.common.log_level).parse()?),
        )
        .init();

    let default_difficulty: Difficulty = config
        .ai
        .default_difficulty
        .parse()
        .unwrap_or_else(|e| {
            warn!("{} - falling back to medium", e);
            Difficulty::Medium
        });
    let settings = AiSettings::from(&config);
    info!(
        "Configuration: difficulty={}, mcts_iterations={}, heuristic_depth={}, max_sessions={}",
        default_difficulty,
        settings.mcts.max_iterations,
        settings.heuristic.max_depth,
        config.web.max_sessions
    );

    let state = Arc::new(AppState::new(
        settings,
        default_difficulty,
        config.common.seed,
        config.web.max_sessions,
    ));
    let app = create_app(state, &config.web.allowed_origins);

    let addr = format!("{}:{}", config.web.host, config.web.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

// ============================================================================
// Integration Tests
// ============================================================================

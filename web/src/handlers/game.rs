//! Session and move handlers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use engine_core::EngineError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::game::GameSession;
use crate::metrics;
use crate::types::{AiMoveResponse, GameStateResponse, MoveRequest, NewGameRequest};
use crate::AppState;

type ApiError = (StatusCode, String);

fn engine_error(e: EngineError) -> ApiError {
    match e {
        EngineError::InvalidPosition(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        _ => (StatusCode::BAD_REQUEST, e.to_string()),
    }
}

fn game_over() -> ApiError {
    (StatusCode::BAD_REQUEST, "Game is already over".to_string())
}

/// Look up a session without holding the store lock afterwards.
async fn find_session(
    state: &AppState,
    session_id: &str,
) -> Result<Arc<Mutex<GameSession>>, ApiError> {
    let sessions = state.sessions.lock().await;
    sessions.get(session_id).cloned().ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Session not found: {}", session_id),
        )
    })
}

/// Remove one session to make room: finished games first, then the one idle
/// longest. Sessions with a request in flight are never picked.
fn evict_one(sessions: &mut HashMap<String, Arc<Mutex<GameSession>>>) -> Option<String> {
    let victim = sessions
        .iter()
        .filter_map(|(id, session)| {
            let session = session.try_lock().ok()?;
            Some(((!session.is_game_over(), session.last_active()), id))
        })
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, id)| id.clone())?;
    sessions.remove(&victim);
    Some(victim)
}

/// Create or replace a session. A new id at the session limit evicts an
/// older session, and is refused only when every session is busy.
async fn store_session(
    state: &AppState,
    session_id: String,
    session: GameSession,
) -> Result<GameStateResponse, ApiError> {
    let response = session.to_response();
    let mut sessions = state.sessions.lock().await;
    if !sessions.contains_key(&session_id) && sessions.len() >= state.max_sessions {
        match evict_one(&mut sessions) {
            Some(evicted) => {
                metrics::SESSIONS_EVICTED.inc();
                metrics::SESSIONS_ACTIVE.set(sessions.len() as i64);
                info!(
                    "Session limit reached ({}), evicted {} for {}",
                    state.max_sessions, evicted, session_id
                );
            }
            None => {
                warn!(
                    "Session limit reached ({}) with every session busy, rejecting {}",
                    state.max_sessions, session_id
                );
                return Err((
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Too many active sessions".to_string(),
                ));
            }
        }
    }
    sessions.insert(session_id, Arc::new(Mutex::new(session)));
    metrics::SESSIONS_CREATED.inc();
    metrics::SESSIONS_ACTIVE.set(sessions.len() as i64);
    Ok(response)
}

fn record_move(session: &GameSession) {
    metrics::MOVES_PLAYED.inc();
    if session.is_game_over() {
        metrics::GAMES_COMPLETED.inc();
        info!(
            "Game over: winner={:?} after {} moves",
            session.state().winner(),
            session.state().move_count()
        );
    }
}

/// Start a new game, replacing any existing game under the same id.
pub async fn new_game(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> Result<Json<GameStateResponse>, ApiError> {
    let req: NewGameRequest = if body.iter().all(u8::is_ascii_whitespace) {
        NewGameRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid request: {}", e)))?
    };
    let difficulty = req.difficulty.unwrap_or(state.default_difficulty);
    let session = GameSession::new(difficulty, req.ai_first(), &state.settings, state.seed);
    info!(
        "New game {}: difficulty={}, human={}",
        session_id,
        difficulty,
        session.human_player()
    );

    Ok(Json(store_session(&state, session_id, session).await?))
}

/// Get the current state of a session.
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let session = find_session(&state, &session_id).await?;
    let mut session = session.lock().await;
    session.touch();
    Ok(Json(session.to_response()))
}

/// Apply the human's move.
pub async fn make_move(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let session = find_session(&state, &session_id).await?;
    let mut session = session.lock().await;
    session.touch();

    if session.is_game_over() {
        return Err(game_over());
    }
    if !session.is_human_turn() {
        return Err((StatusCode::BAD_REQUEST, "Not your turn".to_string()));
    }

    let (row, col) = req.indices().ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!(
                "Invalid coordinate ({}, {}): row and col must be in 0..9",
                req.row, req.col
            ),
        )
    })?;
    session.human_move(row, col).map_err(engine_error)?;
    debug!(session = %session_id, row, col, "Human move");
    record_move(&session);

    Ok(Json(session.to_response()))
}

/// Let the AI choose and apply its move.
///
/// The search runs on the blocking pool over a copy of the board while the
/// session stays locked, so concurrent requests on the same session wait.
pub async fn ai_move(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<AiMoveResponse>, ApiError> {
    let session = find_session(&state, &session_id).await?;
    let mut session = session.lock().await;
    session.touch();

    if session.is_game_over() {
        return Err(game_over());
    }
    if session.is_human_turn() {
        return Err((StatusCode::BAD_REQUEST, "Not AI turn".to_string()));
    }

    let board = session.state().clone();
    let mut ai = session.ai();
    let (ai, result) = tokio::task::spawn_blocking(move || {
        let result = ai.choose_move(&board);
        (ai, result)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("AI task failed: {}", e),
        )
    })?;
    session.restore_ai(ai);

    let choice = result.map_err(engine_error)?;
    session
        .ai_move(choice.mv.row(), choice.mv.col())
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("AI chose an illegal move: {}", e),
            )
        })?;

    metrics::AI_MOVE_SECONDS
        .with_label_values(&[session.difficulty().as_str()])
        .observe(choice.think_time.as_secs_f64());
    debug!(
        session = %session_id,
        mv = %choice.mv,
        source = choice.source,
        "AI move"
    );
    record_move(&session);

    Ok(Json(AiMoveResponse {
        state: session.to_response(),
        mv: choice.mv.into(),
        think_time_ms: choice.think_time.as_millis() as u64,
    }))
}

/// Restart a session with the same difficulty and sides. An unknown id
/// starts a game at the server's default difficulty.
pub async fn reset_game(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let previous = {
        let sessions = state.sessions.lock().await;
        sessions.get(&session_id).cloned()
    };
    let (difficulty, ai_first) = match previous {
        Some(session) => {
            let session = session.lock().await;
            (
                session.difficulty(),
                session.human_player() != engine_core::Player::X,
            )
        }
        None => (state.default_difficulty, false),
    };

    let session = GameSession::new(difficulty, ai_first, &state.settings, state.seed);
    info!("Reset game {}: difficulty={}", session_id, difficulty);
    Ok(Json(store_session(&state, session_id, session).await?))
}

//! Prometheus metrics for the web server.
//!
//! Session lifecycle counters and AI move latency per difficulty.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Once;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ========== Session Metrics ==========

    /// Total game sessions created (including resets)
    pub static ref SESSIONS_CREATED: IntCounter = IntCounter::with_opts(
        Opts::new("uttt_sessions_created_total", "Total game sessions created")
    ).unwrap();

    /// Sessions currently held in memory
    pub static ref SESSIONS_ACTIVE: IntGauge = IntGauge::with_opts(
        Opts::new("uttt_sessions_active", "Game sessions currently held in memory")
    ).unwrap();

    /// Sessions dropped to make room under the session limit
    pub static ref SESSIONS_EVICTED: IntCounter = IntCounter::with_opts(
        Opts::new("uttt_sessions_evicted_total", "Sessions evicted at the session limit")
    ).unwrap();

    /// Moves applied by humans and AI
    pub static ref MOVES_PLAYED: IntCounter = IntCounter::with_opts(
        Opts::new("uttt_moves_played_total", "Total moves played across all sessions")
    ).unwrap();

    /// Games that reached a terminal state
    pub static ref GAMES_COMPLETED: IntCounter = IntCounter::with_opts(
        Opts::new("uttt_games_completed_total", "Total games played to completion")
    ).unwrap();

    // ========== AI Metrics ==========

    /// Time for the AI to choose a move
    pub static ref AI_MOVE_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new("uttt_ai_move_seconds", "Time for the AI to choose a move")
            .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0]),
        &["difficulty"]
    ).unwrap();
}

static INIT: Once = Once::new();

/// Initialize and register all metrics with the registry.
/// Safe to call multiple times - only initializes once.
pub fn init_metrics() {
    INIT.call_once(|| {
        REGISTRY
            .register(Box::new(SESSIONS_CREATED.clone()))
            .unwrap();
        REGISTRY
            .register(Box::new(SESSIONS_ACTIVE.clone()))
            .unwrap();
        REGISTRY
            .register(Box::new(SESSIONS_EVICTED.clone()))
            .unwrap();
        REGISTRY.register(Box::new(MOVES_PLAYED.clone())).unwrap();
        REGISTRY
            .register(Box::new(GAMES_COMPLETED.clone()))
            .unwrap();
        REGISTRY
            .register(Box::new(AI_MOVE_SECONDS.clone()))
            .unwrap();
    });
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_init_twice() {
        init_metrics();
        init_metrics();
    }

    #[test]
    fn test_encode_metrics() {
        init_metrics();
        SESSIONS_CREATED.inc();
        AI_MOVE_SECONDS.with_label_values(&["easy"]).observe(0.002);
        let output = encode_metrics();
        assert!(output.contains("uttt_sessions_created_total"));
        assert!(output.contains("uttt_ai_move_seconds"));
        assert!(output.contains("difficulty=\"easy\""));
    }
}

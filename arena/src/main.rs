//! Arena - AI-vs-AI tournaments for Ultimate Tic-Tac-Toe
//!
//! Plays a series of games between two difficulties and reports:
//! - wins per difficulty (split by colour) and draws
//! - win rate over decisive games
//! - average game length and elapsed time
//!
//! With `--output`, the same numbers are written as JSON.

use anyhow::{anyhow, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tracing::{error, info};

mod config;
mod stats;
mod tournament;

use crate::config::Config;
use crate::tournament::Tournament;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn progress_bar(games: u32) -> Option<ProgressBar> {
    if !std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        return None;
    }
    let pb = ProgressBar::new(u64::from(games));
    let template = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})";
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style.progress_chars("#>-"));
    }
    Some(pb)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;

    let entrants = config.entrants()?;
    let seed = config.base_seed();
    info!(
        games = config.games,
        x = %entrants[0],
        o = %entrants[1],
        swap_sides = config.swap_sides,
        seed = ?seed,
        "Starting tournament"
    );

    let tournament = Tournament::new(
        entrants,
        config.games,
        config.swap_sides,
        config.ai_settings(),
        seed,
    );

    // Setup graceful shutdown: finish the current game, then report
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = Arc::clone(&shutdown);
    let shutdown_handle = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, finishing current game...");
            shutdown_flag.store(true, Ordering::Relaxed);
        }
    });

    let progress = progress_bar(config.games);
    let start = Instant::now();
    let run_flag = Arc::clone(&shutdown);
    let run_progress = progress.clone();
    let result = tokio::task::spawn_blocking(move || {
        tournament.run(&run_flag, run_progress.as_ref())
    })
    .await
    .map_err(|e| anyhow!("tournament task failed: {}", e))?;
    let elapsed = start.elapsed();

    shutdown_handle.abort();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            error!("Tournament failed: {}", e);
            return Err(e);
        }
    };

    println!("{}", stats);
    println!("Elapsed: {:.2}s", elapsed.as_secs_f64());

    if let Some(path) = &config.output {
        stats.summary(elapsed, seed).write(path)?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}

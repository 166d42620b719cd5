//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full MCTS search with varying iteration counts
//! - Search from different game phases (opening, midgame)
//! - Tree operations (selection, backpropagation)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::{legal_moves, BoardState};
use mcts::{MctsConfig, MctsSearch, MctsTree};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// State after `plies` random moves from a fixed seed.
fn random_walk(plies: usize) -> BoardState {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let mut state = BoardState::new();
    for _ in 0..plies {
        let moves = legal_moves(&state);
        match moves.choose(&mut rng) {
            Some(&mv) => state.play(mv).unwrap(),
            None => break,
        }
    }
    state
}

// =============================================================================
// Full MCTS Search Benchmarks
// =============================================================================

fn bench_mcts_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");
    group.sample_size(20);

    for iters in [100u32, 500, 1_000, 5_000] {
        group.throughput(Throughput::Elements(iters as u64));
        group.bench_with_input(BenchmarkId::new("empty_board", iters), &iters, |b, &iters| {
            let state = BoardState::new();
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&state, MctsConfig::deterministic(iters));
                black_box(search.run(&mut rng).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_mcts_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_game_phases");
    group.sample_size(20);

    for (name, plies) in [("opening", 1usize), ("midgame", 30)] {
        let state = random_walk(plies);
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&state, MctsConfig::deterministic(1_000));
                black_box(search.run(&mut rng).unwrap())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    let root_state = BoardState::new();
    let mut wide = MctsTree::new(root_state.clone());
    for (i, mv) in legal_moves(&root_state).into_iter().enumerate() {
        let child = wide.add_child(wide.root(), mv, root_state.after(mv).unwrap());
        wide.get_mut(child).visits = 1 + i as u32 % 7;
        wide.get_mut(child).reward_sum = (i % 3) as f64 - 1.0;
    }
    wide.get_mut(wide.root()).visits = 400;

    group.bench_function("select_child_81", |b| {
        b.iter(|| black_box(wide.select_child(wide.root(), std::f64::consts::SQRT_2)))
    });

    group.bench_function("backpropagate_depth_10", |b| {
        let mut tree = MctsTree::new(root_state.clone());
        let mut state = root_state.clone();
        let mut leaf = tree.root();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..10 {
            let moves = legal_moves(&state);
            let mv = *moves.choose(&mut rng).unwrap();
            state = state.after(mv).unwrap();
            leaf = tree.add_child(leaf, mv, state.clone());
        }
        b.iter(|| tree.backpropagate(black_box(leaf), 1.0));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mcts_search_iterations,
    bench_mcts_game_phases,
    bench_tree_operations
);
criterion_main!(benches);

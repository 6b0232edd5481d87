//! Data-parallel batch evaluation.
//!
//! Every input state is processed fully independently: a task owns its
//! board copy and its own transposition table, and only the Zobrist keys
//! and coefficients are shared, read-only. The parallel map preserves
//! input order, so result `i` always belongs to input `i`.

use std::time::Instant;

use log::debug;
use othello_core::{Board, Player};
use rayon::prelude::*;

use crate::coefficients::EvaluationCoefficients;
use crate::error::EngineError;
use crate::evaluation::evaluate;
use crate::search::{find_best_move, SearchContext, SearchOutcome};
use crate::table::TranspositionTable;
use crate::zobrist::ZobristTable;

/// Upper limit on the number of states accepted in one batch; larger
/// requests are rejected as recoverable exhaustion rather than attempted.
pub const MAX_BATCH_STATES: usize = 65_536;

/// Build the worker pool once; batch calls reuse it instead of paying the
/// thread spawn cost per call.
pub fn build_pool(threads: Option<usize>) -> Result<rayon::ThreadPool, EngineError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or_else(num_cpus::get))
        .build()
        .map_err(|e| EngineError::Initialization(e.to_string()))
}

fn check_batch(len: usize, players: usize) -> Result<(), EngineError> {
    if len != players {
        return Err(EngineError::InvalidInput(format!(
            "batch length mismatch: {} boards vs {} players",
            len, players
        )));
    }
    if len > MAX_BATCH_STATES {
        return Err(EngineError::BatchTooLarge {
            requested: len,
            limit: MAX_BATCH_STATES,
        });
    }
    Ok(())
}

/// Statically evaluate many independent states. One score per input, same
/// order.
pub fn evaluate_states(
    pool: &rayon::ThreadPool,
    coefficients: &EvaluationCoefficients,
    boards: &[Board],
    players: &[Player],
) -> Result<Vec<i32>, EngineError> {
    check_batch(boards.len(), players.len())?;

    let started = Instant::now();

    let scores = pool.install(|| {
        boards
            .par_iter()
            .zip(players.par_iter())
            .map(|(board, player)| evaluate(board, *player, coefficients))
            .collect()
    });

    if boards.len() > 1000 {
        debug!(
            "evaluated {} states in {:?}",
            boards.len(),
            started.elapsed()
        );
    }
    Ok(scores)
}

/// Search many independent states, each to its own depth. One outcome per
/// input, same order. Each task owns a private transposition table of
/// `table_capacity` slots.
pub fn search_states(
    pool: &rayon::ThreadPool,
    zobrist: &ZobristTable,
    coefficients: &EvaluationCoefficients,
    boards: &[Board],
    players: &[Player],
    depths: &[u8],
    table_capacity: usize,
) -> Result<Vec<SearchOutcome>, EngineError> {
    check_batch(boards.len(), players.len())?;
    if boards.len() != depths.len() {
        return Err(EngineError::InvalidInput(format!(
            "batch length mismatch: {} boards vs {} depths",
            boards.len(),
            depths.len()
        )));
    }

    let started = Instant::now();

    let outcomes = pool.install(|| {
        boards
            .par_iter()
            .zip(players.par_iter().zip(depths.par_iter()))
            .map(|(board, (player, depth))| {
                let mut table = TranspositionTable::new(table_capacity);
                let mut ctx = SearchContext::new(zobrist, coefficients, &mut table);
                find_best_move(board, *player, *depth, &mut ctx)
            })
            .collect()
    });

    if boards.len() > 1000 {
        debug!(
            "searched {} states in {:?}",
            boards.len(),
            started.elapsed()
        );
    }
    Ok(outcomes)
}

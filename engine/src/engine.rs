//! The engine facade.
//!
//! An [`Engine`] owns the long-lived resources (Zobrist keys, the active
//! coefficient set, configuration) and exposes the whole evaluation surface:
//! single-state scoring and search, their batch counterparts, and the game
//! predicates. Construction acquires the resources, `Drop` releases them;
//! every method hands back a `Result` rather than panicking.

use log::{debug, info};
use othello_core::{Board, Player, Position};

use crate::batch::{self, MAX_BATCH_STATES};
use crate::coefficients::EvaluationCoefficients;
use crate::error::EngineError;
use crate::evaluation::evaluate;
use crate::search::{find_best_move, SearchContext, SearchOutcome};
use crate::table::TranspositionTable;
use crate::zobrist::ZobristTable;

/// Engine construction parameters.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Worker threads for batch calls; `None` uses all available cores.
    pub threads: Option<usize>,
    /// Slots in the transposition table of a single-position search.
    pub table_capacity: usize,
    /// Slots in each per-task table of a batch search. Smaller than
    /// `table_capacity`: a batch allocates one table per state, and batch
    /// searches are typically shallow.
    pub batch_table_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            threads: None,
            table_capacity: 1 << 20,
            batch_table_capacity: 1 << 14,
        }
    }
}

/// A snapshot of what the engine has to work with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceInfo {
    pub threads: usize,
    pub max_batch_states: usize,
    pub table_capacity: usize,
}

pub struct Engine {
    zobrist: ZobristTable,
    coefficients: EvaluationCoefficients,
    config: EngineConfig,
    pool: rayon::ThreadPool,
}

impl Engine {
    /// An engine with the default configuration and the default coefficient
    /// preset.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default())
    }

    /// Builds the worker pool up front, so a pool that cannot be created
    /// fails construction rather than the first batch call.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let pool = batch::build_pool(config.threads)?;
        let engine = Engine {
            zobrist: ZobristTable::new(),
            coefficients: EvaluationCoefficients::default(),
            config,
            pool,
        };
        info!(
            "engine ready: preset={} threads={} table_capacity={}",
            engine.coefficients.name,
            engine.pool.current_num_threads(),
            engine.config.table_capacity
        );
        Ok(engine)
    }

    /// Swap in a coefficient set. Takes `&mut self`, so it cannot overlap a
    /// running call; searches already dispatched are unaffected.
    pub fn configure_coefficients(&mut self, coefficients: EvaluationCoefficients) {
        debug!("coefficients set to {}", coefficients.name);
        self.coefficients = coefficients;
    }

    /// Swap in a named preset.
    pub fn configure_preset(&mut self, name: &str) -> Result<(), EngineError> {
        let coefficients = EvaluationCoefficients::by_name(name)
            .ok_or_else(|| EngineError::InvalidInput(format!("unknown preset: {}", name)))?;
        self.configure_coefficients(coefficients);
        Ok(())
    }

    pub fn coefficients(&self) -> &EvaluationCoefficients {
        &self.coefficients
    }

    /// Statically score one state for `player`.
    pub fn evaluate(&self, board: &Board, player: Player) -> i32 {
        evaluate(board, player, &self.coefficients)
    }

    /// Statically score many states in parallel, preserving input order.
    pub fn evaluate_states(
        &self,
        boards: &[Board],
        players: &[Player],
    ) -> Result<Vec<i32>, EngineError> {
        batch::evaluate_states(&self.pool, &self.coefficients, boards, players)
    }

    /// Search one state to `depth` plies with a fresh transposition table.
    pub fn find_best_move(&self, board: &Board, player: Player, depth: u8) -> SearchOutcome {
        let mut table = TranspositionTable::new(self.config.table_capacity);
        self.find_best_move_with_table(board, player, depth, &mut table)
    }

    /// Search one state reusing a caller-held table, for callers driving a
    /// whole game who want entries to survive between moves.
    pub fn find_best_move_with_table(
        &self,
        board: &Board,
        player: Player,
        depth: u8,
        table: &mut TranspositionTable,
    ) -> SearchOutcome {
        let mut ctx = SearchContext::new(&self.zobrist, &self.coefficients, table);
        find_best_move(board, player, depth, &mut ctx)
    }

    /// Search many states in parallel, each to its own depth, preserving
    /// input order. Each state gets its own transposition table.
    pub fn find_best_moves(
        &self,
        boards: &[Board],
        players: &[Player],
        depths: &[u8],
    ) -> Result<Vec<SearchOutcome>, EngineError> {
        batch::search_states(
            &self.pool,
            &self.zobrist,
            &self.coefficients,
            boards,
            players,
            depths,
            self.config.batch_table_capacity,
        )
    }

    pub fn has_valid_moves(&self, board: &Board, player: Player) -> bool {
        board.has_legal_moves(player)
    }

    pub fn is_game_finished(&self, board: &Board) -> bool {
        board.is_finished()
    }

    /// Apply a move for `player`, returning the flipped positions.
    pub fn apply_move(
        &self,
        board: &mut Board,
        player: Player,
        pos: Position,
    ) -> Result<Vec<Position>, EngineError> {
        Ok(board.apply_move(player, pos)?)
    }

    pub fn resources(&self) -> ResourceInfo {
        ResourceInfo {
            threads: self.pool.current_num_threads(),
            max_batch_states: MAX_BATCH_STATES,
            table_capacity: self.config.table_capacity,
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        // The owned pool joins its workers on drop; tables are per-search.
        debug!("engine shut down");
    }
}

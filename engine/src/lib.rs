//! Batch evaluation engine for Othello (Reversi)
//!
//! This crate layers a weighted positional evaluator, an alpha-beta search
//! with a transposition table, and a data-parallel batch surface on top of
//! the `othello-core` board model:
//! - `coefficients`: phase-dependent evaluation weight presets
//! - `evaluation`: the six-component positional evaluator
//! - `zobrist`: position fingerprints for the transposition table
//! - `table`: a fixed-capacity, depth-preferred transposition table
//! - `search`: negamax alpha-beta with deterministic move ordering
//! - `batch`: order-preserving parallel evaluation over many states
//! - `engine`: the facade tying the pieces together

pub mod batch;
#[cfg(feature = "python")]
pub mod bindings;
pub mod coefficients;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod search;
pub mod table;
pub mod zobrist;

pub use batch::MAX_BATCH_STATES;
pub use coefficients::{EvaluationCoefficients, GamePhase};
pub use engine::{Engine, EngineConfig, ResourceInfo};
pub use error::EngineError;
pub use evaluation::evaluate;
pub use search::{find_best_move, SearchContext, SearchOutcome};
pub use table::{NodeType, TableStats, TranspositionTable, TtEntry};
pub use zobrist::ZobristTable;

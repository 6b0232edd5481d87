use ndarray::Array2;
use numpy::{PyArray1, PyArray2};
use othello_core::{Board, Player, Position};
use pyo3::exceptions::PyValueError;
/// PyO3 bindings for the evaluation engine
/// Exposes batch evaluation and search to Python
use pyo3::prelude::*;

use crate::engine::{Engine, EngineConfig};
use crate::error::EngineError;

fn to_py_err(err: EngineError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_player(player: u8) -> PyResult<Player> {
    Player::from_u8(player).ok_or_else(|| {
        PyValueError::new_err(format!(
            "Player must be 1 (Black) or 2 (White), got {}",
            player
        ))
    })
}

fn parse_board(state: &[u8]) -> PyResult<Board> {
    if state.len() != 64 {
        return Err(PyValueError::new_err(format!(
            "Board must have exactly 64 elements, got {}",
            state.len()
        )));
    }
    let mut flat = [0u8; 64];
    flat.copy_from_slice(state);
    Board::from_state(&flat).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn parse_batch(boards: &[u8], players: &[u8]) -> PyResult<(Vec<Board>, Vec<Player>)> {
    if boards.len() != players.len() * 64 {
        return Err(PyValueError::new_err(format!(
            "Expected {} board bytes for {} players, got {}",
            players.len() * 64,
            players.len(),
            boards.len()
        )));
    }
    let parsed_boards = boards
        .chunks_exact(64)
        .map(parse_board)
        .collect::<PyResult<Vec<_>>>()?;
    let parsed_players = players
        .iter()
        .map(|&p| parse_player(p))
        .collect::<PyResult<Vec<_>>>()?;
    Ok((parsed_boards, parsed_players))
}

/// Python wrapper for the evaluation engine
///
/// Boards cross the boundary as flat arrays of 64 bytes
/// (0=Empty, 1=Black, 2=White), players as 1=Black / 2=White.
#[pyclass]
pub struct OthelloEngine {
    engine: Engine,
}

#[pymethods]
impl OthelloEngine {
    /// Create an engine with the default configuration
    ///
    /// Args:
    ///     threads (int, optional): Worker threads for batch calls
    ///
    /// Raises:
    ///     ValueError: If the engine fails to initialize
    #[new]
    #[pyo3(signature = (threads=None))]
    pub fn new(threads: Option<usize>) -> PyResult<Self> {
        let engine = Engine::with_config(EngineConfig {
            threads,
            ..EngineConfig::default()
        })
        .map_err(to_py_err)?;
        Ok(Self { engine })
    }

    /// Select a coefficient preset by name (e.g. "V1", "V7")
    pub fn set_preset(&mut self, name: &str) -> PyResult<()> {
        self.engine.configure_preset(name).map_err(to_py_err)
    }

    /// Statically evaluate one board for one player
    pub fn evaluate(&self, board: Vec<u8>, player: u8) -> PyResult<i32> {
        let board = parse_board(&board)?;
        let player = parse_player(player)?;
        Ok(self.engine.evaluate(&board, player))
    }

    /// Statically evaluate a batch of boards
    ///
    /// Args:
    ///     boards (list): Concatenated flat boards, 64 bytes each
    ///     players (list): One player per board
    ///
    /// Returns:
    ///     np.ndarray: One score per board, input order preserved
    pub fn evaluate_states<'py>(
        &self,
        py: Python<'py>,
        boards: Vec<u8>,
        players: Vec<u8>,
    ) -> PyResult<&'py PyArray1<i32>> {
        let (boards, players) = parse_batch(&boards, &players)?;
        let scores = self
            .engine
            .evaluate_states(&boards, &players)
            .map_err(to_py_err)?;
        Ok(PyArray1::from_vec(py, scores))
    }

    /// Search one board to `depth` plies
    ///
    /// Returns:
    ///     tuple: (move, score)
    ///         - move (int): Best move index 0-63, or 255 when no move exists
    ///         - score (int): Score from the player's perspective
    pub fn find_best_move(&self, board: Vec<u8>, player: u8, depth: u8) -> PyResult<(u8, i32)> {
        let board = parse_board(&board)?;
        let player = parse_player(player)?;
        let outcome = self.engine.find_best_move(&board, player, depth);
        let mv = outcome.best_move.map_or(255, |p| p.index() as u8);
        Ok((mv, outcome.score))
    }

    /// Search a batch of boards, each to its own depth
    ///
    /// Returns:
    ///     np.ndarray: Shape (n, 2) with columns (move, score), input order
    ///     preserved; move is 255 when no move exists
    pub fn find_best_moves<'py>(
        &self,
        py: Python<'py>,
        boards: Vec<u8>,
        players: Vec<u8>,
        depths: Vec<u8>,
    ) -> PyResult<&'py PyArray2<i32>> {
        let (boards, players) = parse_batch(&boards, &players)?;
        let outcomes = self
            .engine
            .find_best_moves(&boards, &players, &depths)
            .map_err(to_py_err)?;
        let array = Array2::from_shape_fn((outcomes.len(), 2), |(i, j)| {
            if j == 0 {
                outcomes[i].best_move.map_or(255, |p| p.index() as i32)
            } else {
                outcomes[i].score
            }
        });
        Ok(PyArray2::from_owned_array(py, array))
    }

    /// Whether the player has at least one legal move
    pub fn has_valid_moves(&self, board: Vec<u8>, player: u8) -> PyResult<bool> {
        let board = parse_board(&board)?;
        let player = parse_player(player)?;
        Ok(self.engine.has_valid_moves(&board, player))
    }

    /// Whether neither side has a legal move
    pub fn is_game_finished(&self, board: Vec<u8>) -> PyResult<bool> {
        let board = parse_board(&board)?;
        Ok(self.engine.is_game_finished(&board))
    }

    /// Apply a move and return the resulting flat board
    ///
    /// Raises:
    ///     ValueError: If the move is illegal for the player
    pub fn apply_move<'py>(
        &self,
        py: Python<'py>,
        board: Vec<u8>,
        player: u8,
        action: usize,
    ) -> PyResult<&'py PyArray1<u8>> {
        if action >= 64 {
            return Err(PyValueError::new_err(format!(
                "Action {} is out of range. Must be between 0 and 63 (inclusive).",
                action
            )));
        }
        let mut board = parse_board(&board)?;
        let player = parse_player(player)?;
        self.engine
            .apply_move(&mut board, player, Position::new(action / 8, action % 8))
            .map_err(to_py_err)?;
        Ok(PyArray1::from_slice(py, &board.to_state()))
    }

    /// Resource limits as (threads, max_batch_states, table_capacity)
    pub fn resources(&self) -> (usize, usize, usize) {
        let info = self.engine.resources();
        (info.threads, info.max_batch_states, info.table_capacity)
    }
}

/// Python module definition
///
/// This module can be imported in Python as `othello_engine`
#[pymodule]
fn othello_engine(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<OthelloEngine>()?;
    Ok(())
}

//! Zobrist hashing for transposition-table keys.
//!
//! One pseudo-random 64-bit key per (square, occupant color), plus a
//! side-to-move key so the same disc layout hashes differently for the two
//! players to move. Keys come from a fixed seed: fingerprints are stable
//! across processes, which keeps cached results comparable between runs.

use othello_core::{Board, Cell, Player, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const KEY_SEED: u64 = 0x0DDB_A11_C0FFEE;

/// The full key table. Built once at engine initialization and read-only
/// afterwards; shared freely across search tasks.
pub struct ZobristTable {
    /// Indexed by `[square][color]`, color 0 = Black, 1 = White.
    cells: [[u64; 2]; 64],
    side: u64,
}

fn color_index(player: Player) -> usize {
    match player {
        Player::Black => 0,
        Player::White => 1,
    }
}

impl ZobristTable {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(KEY_SEED);
        let mut cells = [[0u64; 2]; 64];
        for square in cells.iter_mut() {
            square[0] = rng.gen();
            square[1] = rng.gen();
        }
        ZobristTable {
            cells,
            side: rng.gen(),
        }
    }

    fn cell_key(&self, pos: Position, player: Player) -> u64 {
        self.cells[pos.index()][color_index(player)]
    }

    /// Compute the fingerprint of a position from scratch: the XOR of the
    /// keys of every occupied square, plus the side key when White is to
    /// move. Empty squares contribute nothing.
    pub fn fingerprint(&self, board: &Board, side_to_move: Player) -> u64 {
        let mut hash = 0u64;
        for row in 0..8 {
            for col in 0..8 {
                let pos = Position::new(row, col);
                match board.cell(pos) {
                    Cell::Black => hash ^= self.cell_key(pos, Player::Black),
                    Cell::White => hash ^= self.cell_key(pos, Player::White),
                    Cell::Empty => {}
                }
            }
        }
        if side_to_move == Player::White {
            hash ^= self.side;
        }
        hash
    }

    /// Incrementally advance a fingerprint across a move: XOR in the placed
    /// disc, swap the key of every flipped disc, and toggle the side to
    /// move. Equal to recomputing `fingerprint` on the resulting board with
    /// the opponent to move.
    pub fn update(&self, hash: u64, mover: Player, placed: Position, flipped: &[Position]) -> u64 {
        let mut hash = hash ^ self.cell_key(placed, mover);
        for &pos in flipped {
            hash ^= self.cell_key(pos, mover.opponent());
            hash ^= self.cell_key(pos, mover);
        }
        hash ^ self.side
    }

    /// Advance a fingerprint across a pass: only the side to move changes.
    pub fn toggle_side(&self, hash: u64) -> u64 {
        hash ^ self.side
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

//! Core types and game logic for Othello (Reversi)
//!
//! The board is a plain value type: search code clones it freely and every
//! clone is independent. All rule queries take the acting player explicitly,
//! so the same board can be inspected from either side without mutation.

use std::fmt;

/// Errors raised by the game rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The attempted move does not flip any opposing disc (or the target
    /// square is occupied). The board is left untouched.
    IllegalMove,
    /// A wire-format board contained a value other than 0, 1 or 2.
    InvalidCell { value: u8 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IllegalMove => write!(f, "move is not legal for this player"),
            GameError::InvalidCell { value } => {
                write!(f, "invalid cell value {} (expected 0, 1 or 2)", value)
            }
        }
    }
}

impl std::error::Error for GameError {}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(&self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Convert player to cell representation
    pub fn to_cell(&self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }

    /// Wire encoding used by external callers: 1 = Black, 2 = White.
    pub fn to_u8(&self) -> u8 {
        match self {
            Player::Black => 1,
            Player::White => 2,
        }
    }

    /// Decode the wire encoding; anything but 1 or 2 is rejected.
    pub fn from_u8(value: u8) -> Option<Player> {
        match value {
            1 => Some(Player::Black),
            2 => Some(Player::White),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Black,
    White,
}

/// A board coordinate, row and column both in `[0, 8)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Flat index, `row * 8 + col`.
    pub fn index(&self) -> usize {
        self.row * 8 + self.col
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 8 scan directions: N, S, E, W and the four diagonals.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// An 8×8 Othello board.
///
/// Discs are only ever added or flipped, never removed, so the occupied
/// count is monotonically non-decreasing over a game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [[Cell; 8]; 8],
    black_count: u8,
    white_count: u8,
}

impl Board {
    /// Create a board with the standard initial setup:
    /// White on (3,3) and (4,4), Black on (3,4) and (4,3).
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; 8]; 8];
        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;

        Board {
            cells,
            black_count: 2,
            white_count: 2,
        }
    }

    /// Build a board from an explicit cell grid.
    pub fn from_cells(cells: [[Cell; 8]; 8]) -> Self {
        let mut board = Board {
            cells,
            black_count: 0,
            white_count: 0,
        };
        board.recount();
        board
    }

    /// Decode the flat wire format (0 = empty, 1 = black, 2 = white),
    /// indexed as `row * 8 + col`.
    pub fn from_state(state: &[u8; 64]) -> Result<Self, GameError> {
        let mut cells = [[Cell::Empty; 8]; 8];
        for (i, &value) in state.iter().enumerate() {
            cells[i / 8][i % 8] = match value {
                0 => Cell::Empty,
                1 => Cell::Black,
                2 => Cell::White,
                other => return Err(GameError::InvalidCell { value: other }),
            };
        }
        Ok(Board::from_cells(cells))
    }

    /// Encode the board in the flat wire format.
    pub fn to_state(&self) -> [u8; 64] {
        let mut state = [0u8; 64];
        for row in 0..8 {
            for col in 0..8 {
                state[row * 8 + col] = match self.cells[row][col] {
                    Cell::Empty => 0,
                    Cell::Black => 1,
                    Cell::White => 2,
                };
            }
        }
        state
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Disc counts as (black, white).
    pub fn counts(&self) -> (u8, u8) {
        (self.black_count, self.white_count)
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> u8 {
        self.black_count + self.white_count
    }

    /// Number of empty squares.
    pub fn empty_count(&self) -> u8 {
        64 - self.occupied()
    }

    /// Check if a move is legal for `player` at `pos`:
    /// the square must be empty and the placement must flip at least one
    /// opposing disc in some direction.
    pub fn is_legal_move(&self, player: Player, pos: Position) -> bool {
        if pos.row >= 8 || pos.col >= 8 {
            return false;
        }
        if self.cells[pos.row][pos.col] != Cell::Empty {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.would_flip_in_direction(player, pos, dr, dc))
    }

    /// Walk from `pos` along (dr, dc); true if the ray is a run of one or
    /// more opposing discs terminated by a disc of `player`.
    fn would_flip_in_direction(&self, player: Player, pos: Position, dr: i8, dc: i8) -> bool {
        let own = player.to_cell();
        let theirs = player.opponent().to_cell();

        let mut r = pos.row as i8 + dr;
        let mut c = pos.col as i8 + dc;
        let mut found_opponent = false;

        while (0..8).contains(&r) && (0..8).contains(&c) {
            let cell = self.cells[r as usize][c as usize];
            if cell == theirs {
                found_opponent = true;
                r += dr;
                c += dc;
            } else if cell == own {
                return found_opponent;
            } else {
                return false;
            }
        }

        false
    }

    /// Enumerate every legal move for `player`, in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        let mut moves = Vec::new();
        for row in 0..8 {
            for col in 0..8 {
                let pos = Position::new(row, col);
                if self.is_legal_move(player, pos) {
                    moves.push(pos);
                }
            }
        }
        moves
    }

    /// True if `player` has at least one legal move.
    pub fn has_legal_moves(&self, player: Player) -> bool {
        for row in 0..8 {
            for col in 0..8 {
                if self.is_legal_move(player, Position::new(row, col)) {
                    return true;
                }
            }
        }
        false
    }

    /// True when neither player can move. The board may still have empty
    /// squares: Othello ends on a mutual pass, not only on a full board.
    pub fn is_finished(&self) -> bool {
        !self.has_legal_moves(Player::Black) && !self.has_legal_moves(Player::White)
    }

    /// The disc-majority winner of a finished game; `None` while the game
    /// is still running or on a draw.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_finished() {
            return None;
        }
        if self.black_count > self.white_count {
            Some(Player::Black)
        } else if self.white_count > self.black_count {
            Some(Player::White)
        } else {
            None
        }
    }

    /// Place a disc for `player` at `pos`, flipping every bracketed run of
    /// opposing discs. Returns the positions that changed color, which
    /// callers use for incremental hashing. An illegal move leaves the
    /// board untouched and reports `GameError::IllegalMove`.
    pub fn apply_move(
        &mut self,
        player: Player,
        pos: Position,
    ) -> Result<Vec<Position>, GameError> {
        if !self.is_legal_move(player, pos) {
            return Err(GameError::IllegalMove);
        }

        let own = player.to_cell();
        let theirs = player.opponent().to_cell();
        let mut flipped = Vec::new();

        for (dr, dc) in DIRECTIONS {
            if !self.would_flip_in_direction(player, pos, dr, dc) {
                continue;
            }
            let mut r = pos.row as i8 + dr;
            let mut c = pos.col as i8 + dc;
            while (0..8).contains(&r) && (0..8).contains(&c) {
                if self.cells[r as usize][c as usize] == theirs {
                    self.cells[r as usize][c as usize] = own;
                    flipped.push(Position::new(r as usize, c as usize));
                    r += dr;
                    c += dc;
                } else {
                    break;
                }
            }
        }

        self.cells[pos.row][pos.col] = own;

        match player {
            Player::Black => {
                self.black_count += 1 + flipped.len() as u8;
                self.white_count -= flipped.len() as u8;
            }
            Player::White => {
                self.white_count += 1 + flipped.len() as u8;
                self.black_count -= flipped.len() as u8;
            }
        }

        Ok(flipped)
    }

    fn recount(&mut self) {
        let mut black = 0;
        let mut white = 0;
        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::Black => black += 1,
                    Cell::White => white += 1,
                    Cell::Empty => {}
                }
            }
        }
        self.black_count = black;
        self.white_count = white;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for row in 0..8 {
            write!(f, "{} ", row)?;
            for col in 0..8 {
                let c = match self.cells[row][col] {
                    Cell::Black => 'B',
                    Cell::White => 'W',
                    Cell::Empty => '.',
                };
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Six-component positional evaluation.
//!
//! `evaluate` is a pure function of (board, player, coefficients): no
//! hidden state, so identical inputs give identical outputs no matter how
//! many evaluations run concurrently. Every component is a player-relative
//! differential, which makes the whole score antisymmetric in the player
//! argument; the search relies on `evaluate(b, p) == -evaluate(b, p.opponent())`.

use othello_core::{Board, Cell, Player, Position};

use crate::coefficients::{EvaluationCoefficients, GamePhase};

/// Per-square stability weights: corners anchor, the squares next to them
/// are liabilities.
const STABILITY_MAP: [[i32; 8]; 8] = [
    [4, -3, 2, 2, 2, 2, -3, 4],
    [-3, -4, -1, -1, -1, -1, -4, -3],
    [2, -1, 1, 0, 0, 1, -1, 2],
    [2, -1, 0, 1, 1, 0, -1, 2],
    [2, -1, 0, 1, 1, 0, -1, 2],
    [2, -1, 1, 0, 0, 1, -1, 2],
    [-3, -4, -1, -1, -1, -1, -4, -3],
    [4, -3, 2, 2, 2, 2, -3, 4],
];

const NEIGHBORS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Disc-count differential.
pub fn material(board: &Board, player: Player) -> i32 {
    let (black, white) = board.counts();
    match player {
        Player::Black => black as i32 - white as i32,
        Player::White => white as i32 - black as i32,
    }
}

/// Legal-move-count differential.
pub fn mobility(board: &Board, player: Player) -> i32 {
    let own = board.legal_moves(player).len() as i32;
    let theirs = board.legal_moves(player.opponent()).len() as i32;
    own - theirs
}

/// Corner-ownership differential over the four corner squares.
pub fn corners(board: &Board, player: Player) -> i32 {
    let own = player.to_cell();
    let theirs = player.opponent().to_cell();
    let mut score = 0;
    for pos in [
        Position::new(0, 0),
        Position::new(0, 7),
        Position::new(7, 0),
        Position::new(7, 7),
    ] {
        let cell = board.cell(pos);
        if cell == own {
            score += 1;
        } else if cell == theirs {
            score -= 1;
        }
    }
    score
}

/// Tempo term from the empty-square count: with an even number of empties
/// remaining White tends to place the last disc, with an odd number Black
/// does.
pub fn parity(board: &Board, player: Player) -> i32 {
    let even_empties = board.empty_count() % 2 == 0;
    match (player, even_empties) {
        (Player::Black, true) => -1,
        (Player::Black, false) => 1,
        (Player::White, true) => 1,
        (Player::White, false) => -1,
    }
}

/// Weighted-stability differential over `STABILITY_MAP`.
pub fn stability(board: &Board, player: Player) -> i32 {
    let own = player.to_cell();
    let theirs = player.opponent().to_cell();
    let mut own_score = 0;
    let mut their_score = 0;
    for row in 0..8 {
        for col in 0..8 {
            let cell = board.cell(Position::new(row, col));
            if cell == own {
                own_score += STABILITY_MAP[row][col];
            } else if cell == theirs {
                their_score += STABILITY_MAP[row][col];
            }
        }
    }
    own_score - their_score
}

/// Frontier differential: discs adjacent to at least one empty square are
/// exposed, so fewer is better; the sign is inverted relative to the
/// other components.
pub fn frontier(board: &Board, player: Player) -> i32 {
    let own = player.to_cell();
    let theirs = player.opponent().to_cell();
    let mut own_frontier = 0;
    let mut their_frontier = 0;

    for row in 0..8 {
        for col in 0..8 {
            let cell = board.cell(Position::new(row, col));
            if cell != own && cell != theirs {
                continue;
            }
            let exposed = NEIGHBORS.iter().any(|&(dr, dc)| {
                let r = row as i8 + dr;
                let c = col as i8 + dc;
                (0..8).contains(&r)
                    && (0..8).contains(&c)
                    && board.cell(Position::new(r as usize, c as usize)) == Cell::Empty
            });
            if exposed {
                if cell == own {
                    own_frontier += 1;
                } else {
                    their_frontier += 1;
                }
            }
        }
    }

    their_frontier - own_frontier
}

/// Score the position for `player`; positive favors `player`.
pub fn evaluate(board: &Board, player: Player, coefficients: &EvaluationCoefficients) -> i32 {
    let [w_material, w_mobility, w_corners, w_parity, w_stability, w_frontier] =
        coefficients.for_phase(GamePhase::of_board(board));

    w_material * material(board, player)
        + w_mobility * mobility(board, player)
        + w_corners * corners(board, player)
        + w_parity * parity(board, player)
        + w_stability * stability(board, player)
        + w_frontier * frontier(board, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_board() -> Board {
        let mut cells = [[Cell::Empty; 8]; 8];
        cells[0][0] = Cell::Black;
        cells[7][7] = Cell::Black;
        cells[0][7] = Cell::White;
        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;
        Board::from_cells(cells)
    }

    #[test]
    fn test_material_differential() {
        let board = corner_board();
        assert_eq!(material(&board, Player::Black), 1);
        assert_eq!(material(&board, Player::White), -1);
    }

    #[test]
    fn test_corners_differential() {
        let board = corner_board();
        assert_eq!(corners(&board, Player::Black), 1); // 2 black − 1 white
        assert_eq!(corners(&board, Player::White), -1);
    }

    #[test]
    fn test_parity_flips_with_empty_count() {
        let board = Board::new(); // 60 empties, even
        assert_eq!(parity(&board, Player::Black), -1);
        assert_eq!(parity(&board, Player::White), 1);

        let mut after = board;
        after
            .apply_move(Player::Black, Position::new(2, 3))
            .unwrap(); // 59 empties, odd
        assert_eq!(parity(&after, Player::Black), 1);
        assert_eq!(parity(&after, Player::White), -1);
    }

    #[test]
    fn test_stability_initial_board_balanced() {
        // The four center squares all weigh 1, two discs each.
        let board = Board::new();
        assert_eq!(stability(&board, Player::Black), 0);
        assert_eq!(stability(&board, Player::White), 0);
    }

    #[test]
    fn test_frontier_initial_board_balanced() {
        // All four center discs touch empty squares.
        let board = Board::new();
        assert_eq!(frontier(&board, Player::Black), 0);
        assert_eq!(frontier(&board, Player::White), 0);
    }

    #[test]
    fn test_frontier_prefers_sheltered_discs() {
        // A black disc surrounded by white discs is not a frontier disc.
        let mut cells = [[Cell::Empty; 8]; 8];
        cells[3][3] = Cell::Black;
        for (dr, dc) in NEIGHBORS {
            cells[(3 + dr) as usize][(3 + dc) as usize] = Cell::White;
        }
        let board = Board::from_cells(cells);
        // Black: 0 exposed; White: 8 exposed. Differential favors Black.
        assert_eq!(frontier(&board, Player::Black), 8);
        assert_eq!(frontier(&board, Player::White), -8);
    }

    #[test]
    fn test_mobility_initial_board() {
        let board = Board::new();
        assert_eq!(mobility(&board, Player::Black), 0); // 4 vs 4
    }

    #[test]
    fn test_evaluate_is_antisymmetric() {
        let coeffs = EvaluationCoefficients::default();
        let mut board = Board::new();
        board
            .apply_move(Player::Black, Position::new(2, 3))
            .unwrap();
        board
            .apply_move(Player::White, Position::new(2, 2))
            .unwrap();

        assert_eq!(
            evaluate(&board, Player::Black, &coeffs),
            -evaluate(&board, Player::White, &coeffs)
        );
    }

    #[test]
    fn test_evaluate_weights_by_phase() {
        // A coefficient set that only scores material in the endgame must
        // ignore material on an opening board.
        let coeffs = EvaluationCoefficients::new(
            "material-endgame",
            [0, 0, 7],
            [0; 3],
            [0; 3],
            [0; 3],
            [0; 3],
            [0; 3],
        );
        let mut board = Board::new();
        board
            .apply_move(Player::Black, Position::new(2, 3))
            .unwrap();
        assert_eq!(evaluate(&board, Player::Black, &coeffs), 0);
    }
}

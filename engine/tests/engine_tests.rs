//! Integration tests for the evaluation engine
//!
//! These tests pin the search against a plain minimax reference, check
//! determinism across repeated calls, and verify that the batch surface
//! preserves input order.

use othello_core::{Board, Cell, Player};
use othello_engine::{
    evaluate, find_best_move, Engine, EngineConfig, EngineError, EvaluationCoefficients,
    SearchContext, TranspositionTable, ZobristTable, MAX_BATCH_STATES,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed-player minimax without pruning or caching. The scoring player's
/// evaluation is maximized on their turns and minimized on the opponent's;
/// a player with no legal move passes without consuming a ply.
fn reference_minimax(
    board: &Board,
    to_move: Player,
    scoring: Player,
    depth: u8,
    coeffs: &EvaluationCoefficients,
) -> i32 {
    if depth == 0 || board.is_finished() {
        return evaluate(board, scoring, coeffs);
    }
    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        return reference_minimax(board, to_move.opponent(), scoring, depth, coeffs);
    }

    let mut best = None;
    for mv in moves {
        let mut child = *board;
        child.apply_move(to_move, mv).unwrap();
        let score = reference_minimax(&child, to_move.opponent(), scoring, depth - 1, coeffs);
        best = Some(match best {
            None => score,
            Some(b) if to_move == scoring => score.max(b),
            Some(b) => score.min(b),
        });
    }
    best.unwrap()
}

/// Play `plies` random legal moves from the opening, passing when forced.
/// Returns the resulting board and the player to move.
fn random_position(seed: u64, plies: usize) -> (Board, Player) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut player = Player::Black;
    for _ in 0..plies {
        if board.is_finished() {
            break;
        }
        if !board.has_legal_moves(player) {
            player = player.opponent();
            continue;
        }
        let moves = board.legal_moves(player);
        let mv = moves[rng.gen_range(0..moves.len())];
        board.apply_move(player, mv).unwrap();
        player = player.opponent();
    }
    (board, player)
}

/// Black to move has no legal move, White does.
fn forced_pass_position() -> Board {
    let mut cells = [[Cell::Empty; 8]; 8];
    cells[0][0] = Cell::White;
    cells[0][1] = Cell::Black;
    Board::from_cells(cells)
}

#[test]
fn test_search_matches_reference_minimax() {
    let zobrist = ZobristTable::new();
    let coeffs = EvaluationCoefficients::default();

    for seed in 0..6u64 {
        let (board, player) = random_position(seed, 10);
        let max_depth = if seed < 2 { 4 } else { 3 };
        for depth in 1..=max_depth {
            let mut table = TranspositionTable::new(0);
            let mut ctx = SearchContext::new(&zobrist, &coeffs, &mut table);
            let outcome = find_best_move(&board, player, depth, &mut ctx);

            let expected = reference_minimax(&board, player, player, depth, &coeffs);
            assert_eq!(
                outcome.score, expected,
                "seed {} depth {} diverged from the reference",
                seed, depth
            );
        }
    }
}

#[test]
fn test_transposition_table_preserves_scores() {
    // The cached search must agree with the cache-free one.
    let zobrist = ZobristTable::new();
    let coeffs = EvaluationCoefficients::default();

    for seed in 0..4u64 {
        let (board, player) = random_position(seed, 16);
        let mut cached = TranspositionTable::new(1 << 14);
        let mut ctx = SearchContext::new(&zobrist, &coeffs, &mut cached);
        let with_table = find_best_move(&board, player, 4, &mut ctx);

        let mut disabled = TranspositionTable::new(0);
        let mut ctx = SearchContext::new(&zobrist, &coeffs, &mut disabled);
        let without_table = find_best_move(&board, player, 4, &mut ctx);

        assert_eq!(with_table.score, without_table.score, "seed {}", seed);
    }
}

#[test]
fn test_engine_search_is_deterministic() {
    let engine = Engine::new().unwrap();
    let (board, player) = random_position(3, 12);

    let first = engine.find_best_move(&board, player, 4);
    let second = engine.find_best_move(&board, player, 4);
    assert_eq!(first.score, second.score);
    assert_eq!(first.best_move, second.best_move);
}

#[test]
fn test_opening_moves_are_equivalent_at_depth_one() {
    // The four opening replies are rotations of each other, so a one-ply
    // search scores them identically and any of them is an optimal answer.
    let engine = Engine::new().unwrap();
    let board = Board::new();
    let moves = board.legal_moves(Player::Black);
    assert_eq!(moves.len(), 4);

    let mut scores = Vec::new();
    for mv in &moves {
        let mut child = board;
        child.apply_move(Player::Black, *mv).unwrap();
        scores.push(engine.evaluate(&child, Player::Black));
    }
    assert!(scores.iter().all(|&s| s == scores[0]));

    let outcome = engine.find_best_move(&board, Player::Black, 1);
    assert_eq!(outcome.score, scores[0]);
    assert!(moves.contains(&outcome.best_move.unwrap()));
}

#[test]
fn test_forced_pass_returns_no_move_and_negated_score() {
    let engine = Engine::new().unwrap();
    let board = forced_pass_position();
    assert!(!board.has_legal_moves(Player::Black));
    assert!(board.has_legal_moves(Player::White));
    assert!(!board.is_finished());

    let black = engine.find_best_move(&board, Player::Black, 3);
    assert_eq!(black.best_move, None);

    // The pass hands the same position to White at full depth.
    let white = engine.find_best_move(&board, Player::White, 3);
    assert_eq!(black.score, -white.score);
}

#[test]
fn test_finished_board_with_empties_is_scored_statically() {
    // Only black discs on the board: neither player can move even though
    // empty squares remain.
    let mut cells = [[Cell::Empty; 8]; 8];
    for col in 0..4 {
        cells[0][col] = Cell::Black;
    }
    let board = Board::from_cells(cells);
    assert!(board.is_finished());
    assert_eq!(board.winner(), Some(Player::Black));

    let engine = Engine::new().unwrap();
    let outcome = engine.find_best_move(&board, Player::White, 5);
    assert_eq!(outcome.best_move, None);
    assert_eq!(outcome.score, engine.evaluate(&board, Player::White));
}

#[test]
fn test_batch_results_follow_input_order() {
    let engine = Engine::with_config(EngineConfig {
        threads: Some(4),
        batch_table_capacity: 1 << 12,
        ..EngineConfig::default()
    })
    .unwrap();

    let mut boards = Vec::new();
    let mut players = Vec::new();
    for seed in 0..12u64 {
        let (board, player) = random_position(seed, 6 + seed as usize);
        boards.push(board);
        players.push(player);
    }
    let depths = vec![2u8; boards.len()];

    let outcomes = engine.find_best_moves(&boards, &players, &depths).unwrap();

    // Reversing the inputs must reverse the outputs and nothing else.
    let rev_boards: Vec<_> = boards.iter().rev().copied().collect();
    let rev_players: Vec<_> = players.iter().rev().copied().collect();
    let reversed = engine
        .find_best_moves(&rev_boards, &rev_players, &depths)
        .unwrap();

    for i in 0..boards.len() {
        let mirror = &reversed[boards.len() - 1 - i];
        assert_eq!(outcomes[i].score, mirror.score);
        assert_eq!(outcomes[i].best_move, mirror.best_move);
    }

    // Splitting the batch in two and concatenating the results must give
    // the same answers: states never interact.
    let mid = boards.len() / 2;
    let front = engine
        .find_best_moves(&boards[..mid], &players[..mid], &depths[..mid])
        .unwrap();
    let back = engine
        .find_best_moves(&boards[mid..], &players[mid..], &depths[mid..])
        .unwrap();
    for (i, outcome) in front.iter().chain(back.iter()).enumerate() {
        assert_eq!(outcome.score, outcomes[i].score);
        assert_eq!(outcome.best_move, outcomes[i].best_move);
    }
}

#[test]
fn test_batch_evaluation_matches_single_calls() {
    let engine = Engine::new().unwrap();
    let mut boards = Vec::new();
    let mut players = Vec::new();
    for seed in 0..20u64 {
        let (board, player) = random_position(seed, 14);
        boards.push(board);
        players.push(player);
    }

    let scores = engine.evaluate_states(&boards, &players).unwrap();
    for i in 0..boards.len() {
        assert_eq!(scores[i], engine.evaluate(&boards[i], players[i]));
    }
}

#[test]
fn test_oversized_batch_is_rejected() {
    let engine = Engine::new().unwrap();
    let n = MAX_BATCH_STATES + 1;
    let boards = vec![Board::new(); n];
    let players = vec![Player::Black; n];

    let err = engine.evaluate_states(&boards, &players).unwrap_err();
    assert_eq!(
        err,
        EngineError::BatchTooLarge {
            requested: n,
            limit: MAX_BATCH_STATES,
        }
    );
}

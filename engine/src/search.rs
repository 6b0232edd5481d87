//! Alpha-beta game-tree search.
//!
//! Negamax formulation: every node is scored from the side to move, and the
//! evaluator's antisymmetry makes that interchangeable with a fixed-player
//! minimax. When the side to move has no legal move but the opponent does,
//! the search recurses for the opponent at the SAME depth: a forced pass
//! hands over the turn, it does not consume a ply.

use log::debug;
use othello_core::{Board, Player, Position};

use crate::coefficients::EvaluationCoefficients;
use crate::evaluation::evaluate;
use crate::table::{NodeType, TranspositionTable, TtEntry};
use crate::zobrist::ZobristTable;

/// Wide enough to dominate any evaluation, with headroom for negation.
const INFINITY: i32 = i32::MAX / 2;

/// Static square weights used for move ordering only: corners first, the
/// squares that concede corners last. Ordering changes how fast the window
/// closes, never the returned score.
const SQUARE_WEIGHTS: [i32; 64] = [
    20, -3, 11, 8, 8, 11, -3, 20, //
    -3, -7, -4, 1, 1, -4, -7, -3, //
    11, -4, 2, 2, 2, 2, -4, 11, //
    8, 1, 2, -3, -3, 2, 1, 8, //
    8, 1, 2, -3, -3, 2, 1, 8, //
    11, -4, 2, 2, 2, 2, -4, 11, //
    -3, -7, -4, 1, 1, -4, -7, -3, //
    20, -3, 11, 8, 8, 11, -3, 20,
];

/// The result of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Score from the root player's perspective; positive favors them.
    pub score: i32,
    /// The move achieving `score`, or `None` at depth 0, on a forced pass,
    /// or on a finished game.
    pub best_move: Option<Position>,
    /// Nodes visited, advisory.
    pub nodes: u64,
}

/// Everything one search call touches: the shared read-only tables and a
/// privately owned transposition table. Never shared between concurrent
/// searches.
pub struct SearchContext<'a> {
    zobrist: &'a ZobristTable,
    coefficients: &'a EvaluationCoefficients,
    table: &'a mut TranspositionTable,
    nodes: u64,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        zobrist: &'a ZobristTable,
        coefficients: &'a EvaluationCoefficients,
        table: &'a mut TranspositionTable,
    ) -> Self {
        SearchContext {
            zobrist,
            coefficients,
            table,
            nodes: 0,
        }
    }
}

/// Search `board` to `depth` plies for `player` and return the best move
/// with its score. Depth 0 degenerates to the static evaluation with no
/// move.
pub fn find_best_move(
    board: &Board,
    player: Player,
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> SearchOutcome {
    if depth == 0 || board.is_finished() {
        return SearchOutcome {
            score: evaluate(board, player, ctx.coefficients),
            best_move: None,
            nodes: 1,
        };
    }

    let hash = ctx.zobrist.fingerprint(board, player);
    let moves = board.legal_moves(player);

    if moves.is_empty() {
        // Forced pass: the opponent searches this very position at full
        // depth and the sign flips back to the root player.
        let score = -negamax(
            board,
            player.opponent(),
            depth,
            -INFINITY,
            INFINITY,
            ctx.zobrist.toggle_side(hash),
            ctx,
        );
        let nodes = ctx.nodes;
        debug!(
            "search pass player={:?} depth={} score={} nodes={}",
            player, depth, score, nodes
        );
        return SearchOutcome {
            score,
            best_move: None,
            nodes,
        };
    }

    let ordered = order_moves(moves, ctx.table.probe(hash).and_then(|e| e.best_move));

    let mut alpha = -INFINITY;
    let mut best_score = -INFINITY;
    let mut best_move = ordered[0];

    for mv in ordered {
        let mut child = *board;
        let flipped = match child.apply_move(player, mv) {
            Ok(flipped) => flipped,
            Err(_) => continue,
        };
        let child_hash = ctx.zobrist.update(hash, player, mv, &flipped);
        let score = -negamax(
            &child,
            player.opponent(),
            depth - 1,
            -INFINITY,
            -alpha,
            child_hash,
            ctx,
        );
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
        alpha = alpha.max(score);
    }

    ctx.table.store(TtEntry {
        key: hash,
        score: best_score,
        best_move: Some(best_move),
        depth,
        node_type: NodeType::Exact,
    });

    let nodes = ctx.nodes;
    debug!(
        "search player={:?} depth={} score={} best={} nodes={}",
        player, depth, best_score, best_move, nodes
    );

    SearchOutcome {
        score: best_score,
        best_move: Some(best_move),
        nodes,
    }
}

fn negamax(
    board: &Board,
    side: Player,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    hash: u64,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;

    if depth == 0 || board.is_finished() {
        return evaluate(board, side, ctx.coefficients);
    }

    // An entry is only trusted when it was searched at least this deep;
    // shallower results must not shortcut deeper searches.
    let mut table_move = None;
    if let Some(entry) = ctx.table.probe(hash) {
        if entry.depth >= depth {
            match entry.node_type {
                NodeType::Exact => return entry.score,
                NodeType::LowerBound => alpha = alpha.max(entry.score),
                NodeType::UpperBound => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                return entry.score;
            }
        }
        table_move = entry.best_move;
    }

    let moves = board.legal_moves(side);
    if moves.is_empty() {
        // Forced pass: same depth, opponent to move, window negated.
        return -negamax(
            board,
            side.opponent(),
            depth,
            -beta,
            -alpha,
            ctx.zobrist.toggle_side(hash),
            ctx,
        );
    }

    let original_alpha = alpha;
    let mut best_score = -INFINITY;
    let mut best_move = None;

    for mv in order_moves(moves, table_move) {
        let mut child = *board;
        let flipped = match child.apply_move(side, mv) {
            Ok(flipped) => flipped,
            Err(_) => continue,
        };
        let child_hash = ctx.zobrist.update(hash, side, mv, &flipped);
        let score = -negamax(
            &child,
            side.opponent(),
            depth - 1,
            -beta,
            -alpha,
            child_hash,
            ctx,
        );
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        alpha = alpha.max(score);
        if alpha >= beta {
            break; // beta cutoff
        }
    }

    let node_type = if best_score <= original_alpha {
        NodeType::UpperBound
    } else if best_score >= beta {
        NodeType::LowerBound
    } else {
        NodeType::Exact
    };
    ctx.table.store(TtEntry {
        key: hash,
        score: best_score,
        best_move,
        depth,
        node_type,
    });

    best_score
}

/// Deterministic move ordering: the cached best move first, then by static
/// square weight, ties broken by board order.
fn order_moves(mut moves: Vec<Position>, table_move: Option<Position>) -> Vec<Position> {
    moves.sort_by_key(|mv| {
        let preferred = table_move == Some(*mv);
        (!preferred, -SQUARE_WEIGHTS[mv.index()], mv.index())
    });
    moves
}

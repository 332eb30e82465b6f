//! Principal-variation negamax search with quiescence.
//!
//! One search path serves both sides: every recursive call negates the
//! window and the returned score, so the score at any node is always from
//! that node's side to move. A mated side to move scores `-MATE + ply`,
//! making shallower mates more attractive for the winner.

use sable_core::{Board, Color, Move, PieceKind};

use crate::eval::{MATE, PAWN_VALUE, QUEEN_VALUE, evaluate, piece_value};
use crate::search::heuristics::{CounterMoveTable, HistoryTable, KillerTable, PvHistory};
use crate::search::ordering::{OrderingContext, is_capture, mvv_lva, order_moves};
use crate::search::see::see_capture;
use crate::search::tt::{Bound, TranspositionTable};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// Maximum search depth in plies, sizing the killer table and bounding
/// recursion.
pub const MAX_PLY: usize = 128;

/// Captures losing more than two pawns of material are dropped outright
/// when the remaining depth is large enough to find something better.
const SEE_PRUNE_FLOOR: i32 = -2 * PAWN_VALUE;

/// Safety margin added to the victim's value in quiescence delta pruning.
const DELTA_MARGIN: i32 = 200;

/// Search state threaded through the recursion. Built fresh per root
/// search; only the transposition table outlives it.
pub(super) struct SearchContext<'a> {
    /// Total nodes visited.
    pub nodes: u64,
    /// Transposition table, owned by the searcher across root calls.
    pub tt: &'a mut TranspositionTable,
    /// Principal variations of completed iterations.
    pub pv_history: PvHistory,
    /// Killer move table.
    pub killers: KillerTable,
    /// Counter-move table.
    pub counters: CounterMoveTable,
    /// History heuristic table.
    pub history: HistoryTable,
}

/// Late-move reduction by index within the ordered move list.
fn late_move_reduction(index: usize) -> i32 {
    match index {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

/// Principal-variation search.
///
/// Returns the score of `board` from the side to move's perspective and
/// fills `pv` with the line that achieves it. `last_move` is the move that
/// produced this position (null at the root), feeding the recapture
/// extension and the counter-move heuristic.
pub(super) fn pv_search(
    board: &mut Board,
    depth: i32,
    mut alpha: i32,
    beta: i32,
    pv: &mut Vec<Move>,
    ply: usize,
    last_move: Move,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;
    pv.clear();
    let original_alpha = alpha;

    // The table never answers at the root: the driver must always receive
    // a freshly computed move.
    let mut tt_move = Move::NULL;
    if ply > 0 {
        let probe = ctx.tt.probe(board.hash(), depth, alpha, beta);
        if let Some(score) = probe.score {
            return score;
        }
        tt_move = probe.best_move;
    }

    if ply >= MAX_PLY - 1 {
        return evaluate(board);
    }

    if depth <= 0 {
        return quiescence(board, alpha, beta, ply, 0, ctx);
    }

    let in_check = board.is_in_check();
    let mut moves = board.generate_legal_moves();

    if moves.is_empty() {
        return if in_check { -MATE + ply as i32 } else { 0 };
    }

    let singular = moves.len() == 1 && depth >= 2;

    // Drop captures that shed serious material while the search is still
    // deep enough to find an alternative.
    if depth >= 3 {
        let kept: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|&mv| !is_capture(board, mv) || see_capture(board, mv) >= SEE_PRUNE_FLOOR)
            .collect();
        if !kept.is_empty() {
            moves = kept;
        }
    }

    {
        let ordering = OrderingContext {
            tt_move,
            pv: &ctx.pv_history,
            killers: &ctx.killers,
            counters: &ctx.counters,
            history: &ctx.history,
            last_move,
            ply,
        };
        order_moves(board, &mut moves, &ordering);
    }

    let us = board.side_to_move();
    let mut best_score = -INF;
    let mut best_move = Move::NULL;
    let mut found_pv = false;
    let mut child_pv: Vec<Move> = Vec::new();

    for (index, &mv) in moves.iter().enumerate() {
        let capture = is_capture(board, mv);
        let pawn_move = board.piece_at(mv.from).is_some_and(|p| p.kind == PieceKind::Pawn);

        // Extensions accumulate by max: at most one extra ply per move.
        let mut extension = 0;
        if in_check || singular {
            extension = 1;
        }
        if !last_move.is_null() && last_move.to == mv.to {
            extension = 1;
        }
        // A pawn reaching the rank before promotion is about to queen.
        let seventh_rank = match us {
            Color::White => 6,
            Color::Black => 1,
        };
        if pawn_move && mv.to.row == seventh_rank {
            extension = 1;
        }

        // Late-move reductions apply only until some move has improved the
        // node, and never to moves the previous iterations put on the PV.
        let mut reduction = 0;
        if !found_pv && index >= 1 {
            if ctx.pv_history.depth_of(mv, ply).is_some() {
                reduction = 0;
            } else if capture && see_capture(board, mv) < 0 {
                reduction = 1;
            } else {
                reduction = late_move_reduction(index);
            }
        }

        let new_depth = (depth - 1 + extension - reduction).max(0);

        let Some(undo) = board.make_move(mv) else {
            continue;
        };

        let score = if index == 0 {
            -pv_search(board, new_depth, -beta, -alpha, &mut child_pv, ply + 1, mv, ctx)
        } else {
            // Null-window probe first; re-search on a potential fail-high.
            let probe =
                -pv_search(board, new_depth, -alpha - 1, -alpha, &mut child_pv, ply + 1, mv, ctx);
            if probe > alpha && probe < beta {
                -pv_search(board, new_depth, -beta, -alpha, &mut child_pv, ply + 1, mv, ctx)
            } else {
                probe
            }
        };

        board.unmake_move(mv, undo);

        if score > best_score {
            best_score = score;
            best_move = mv;
            found_pv = true;
            pv.clear();
            pv.push(mv);
            pv.extend_from_slice(&child_pv);
            if score > alpha {
                alpha = score;
            }
        }

        if alpha >= beta {
            if !capture {
                ctx.killers.store(ply, mv);
                ctx.history
                    .add_bonus(us, mv.from.index(), mv.to.index(), depth);
                if !last_move.is_null()
                    && let Some(previous_piece) = board.piece_at(last_move.to)
                {
                    ctx.counters.store(previous_piece, last_move, mv);
                }
            }
            break;
        }
    }

    let bound = if best_score <= original_alpha {
        Bound::Alpha
    } else if best_score >= beta {
        Bound::Beta
    } else {
        Bound::Exact
    };
    ctx.tt.store(board.hash(), depth, best_score, bound, best_move);

    best_score
}

/// Quiescence search: extend the evaluation through captures (and check
/// evasions) until the position is quiet enough to trust a static score.
pub(super) fn quiescence(
    board: &mut Board,
    mut alpha: i32,
    beta: i32,
    ply: usize,
    qdepth: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;

    if ply >= MAX_PLY - 1 {
        return evaluate(board);
    }

    let stand_pat = evaluate(board);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let in_check = board.is_in_check();
    let moves = board.generate_legal_moves();

    // A mate the quiescence search can see is scored at its ply so the
    // main search prefers shorter mates.
    if in_check && moves.is_empty() {
        return -MATE + ply as i32;
    }

    let mut scored: Vec<(i32, Move)> = Vec::with_capacity(moves.len());
    for mv in moves {
        if in_check {
            // Evading check is forced: keep every legal move, captures first.
            let score = capture_score(board, mv);
            scored.push((score, mv));
            continue;
        }

        if !is_capture(board, mv) {
            continue;
        }

        let see = see_capture(board, mv);
        if qdepth > 2 && see < 0 {
            continue;
        }

        if qdepth > 0 {
            let victim_value = board
                .piece_at(mv.to)
                .map_or(PAWN_VALUE, |p| piece_value(p.kind));
            let promotion_bonus = if board
                .piece_at(mv.from)
                .is_some_and(|p| p.kind == PieceKind::Pawn)
                && (mv.to.row == 0 || mv.to.row == 7)
            {
                QUEEN_VALUE - PAWN_VALUE
            } else {
                0
            };
            if stand_pat + victim_value + promotion_bonus + DELTA_MARGIN <= alpha {
                continue;
            }
        }

        let mut score = capture_score(board, mv);
        if see < 0 {
            score += see;
        }
        scored.push((score, mv));
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, mv) in scored {
        let Some(undo) = board.make_move(mv) else {
            continue;
        };
        let score = -quiescence(board, -beta, -alpha, ply + 1, qdepth + 1, ctx);
        board.unmake_move(mv, undo);

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

/// MVV-LVA score for a capture; zero for quiet moves (check evasions).
fn capture_score(board: &Board, mv: Move) -> i32 {
    if !is_capture(board, mv) {
        return 0;
    }
    let attacker = board.piece_at(mv.from).map_or(PieceKind::Pawn, |p| p.kind);
    let victim = board.piece_at(mv.to).map_or(PieceKind::Pawn, |p| p.kind);
    mvv_lva(attacker, victim)
}

//! Move ordering: every legal move gets a score, then the list is sorted
//! descending. Tiers are separated by orders of magnitude so a move's class
//! dominates anything scored within a lower class.

use sable_core::{Board, Move, PieceKind};

use crate::search::heuristics::{CounterMoveTable, HistoryTable, KillerTable, PvHistory};
use crate::search::see::see_capture;

/// The transposition-table move for this node.
const TT_MOVE_BONUS: i32 = 10_000_000;
/// A move on a previous iteration's PV at this ply, weighted by iteration depth.
const PV_MOVE_BONUS: i32 = 9_000_000;
const PV_DEPTH_WEIGHT: i32 = 1_000;
/// Captures that do not lose material (SEE ≥ 0), plus the SEE score.
const GOOD_CAPTURE_BONUS: i32 = 4_000_000;
/// Losing captures, ranked among themselves by MVV-LVA.
const BAD_CAPTURE_BONUS: i32 = 3_000_000;
/// The stored refutation of the opponent's previous move.
const COUNTER_MOVE_BONUS: i32 = 2_500_000;
/// Killer moves at this ply.
const KILLER_FIRST_BONUS: i32 = 2_000_100;
const KILLER_SECOND_BONUS: i32 = 2_000_000;

/// MVV-LVA scores indexed by `[attacker][victim]`: capturing a more valuable
/// victim with a less valuable attacker scores higher.
#[rustfmt::skip]
pub(crate) const MVV_LVA: [[i32; 6]; 6] = [
    // victim:  P    N    B    R    Q    K
    /* P */  [105, 205, 305, 405, 505, 605],
    /* N */  [104, 204, 304, 404, 504, 604],
    /* B */  [103, 203, 303, 403, 503, 603],
    /* R */  [102, 202, 302, 402, 502, 602],
    /* Q */  [101, 201, 301, 401, 501, 601],
    /* K */  [100, 200, 300, 400, 500, 600],
];

/// MVV-LVA lookup for an attacker/victim pair.
#[inline]
pub(crate) fn mvv_lva(attacker: PieceKind, victim: PieceKind) -> i32 {
    MVV_LVA[attacker.index()][victim.index()]
}

/// Whether the move captures: the destination is occupied, or a pawn steps
/// diagonally onto the en-passant target square.
pub(crate) fn is_capture(board: &Board, mv: Move) -> bool {
    if board.piece_at(mv.to).is_some() {
        return true;
    }
    board.piece_at(mv.from).is_some_and(|p| p.kind == PieceKind::Pawn)
        && board.en_passant_target() == Some(mv.to)
        && mv.from.col != mv.to.col
}

/// Everything a node knows when ranking its moves.
pub(crate) struct OrderingContext<'a> {
    pub tt_move: Move,
    pub pv: &'a PvHistory,
    pub killers: &'a KillerTable,
    pub counters: &'a CounterMoveTable,
    pub history: &'a HistoryTable,
    pub last_move: Move,
    pub ply: usize,
}

/// Score one move. See the tier constants above for the precedence.
pub(crate) fn score_move(board: &Board, mv: Move, ctx: &OrderingContext<'_>) -> i32 {
    if mv == ctx.tt_move {
        return TT_MOVE_BONUS;
    }

    if let Some(depth) = ctx.pv.depth_of(mv, ctx.ply) {
        return PV_MOVE_BONUS + PV_DEPTH_WEIGHT * depth as i32;
    }

    if is_capture(board, mv) {
        let see = see_capture(board, mv);
        if see >= 0 {
            return GOOD_CAPTURE_BONUS + see;
        }
        // A losing capture still has a victim on the destination square.
        let attacker = board.piece_at(mv.from).map_or(PieceKind::Pawn, |p| p.kind);
        let victim = board.piece_at(mv.to).map_or(PieceKind::Pawn, |p| p.kind);
        return BAD_CAPTURE_BONUS + mvv_lva(attacker, victim);
    }

    if !ctx.last_move.is_null()
        && let Some(previous_piece) = board.piece_at(ctx.last_move.to)
        && ctx.counters.get(previous_piece, ctx.last_move) == mv
    {
        return COUNTER_MOVE_BONUS;
    }

    let killers = ctx.killers.at(ctx.ply);
    if mv == killers[0] {
        return KILLER_FIRST_BONUS;
    }
    if mv == killers[1] {
        return KILLER_SECOND_BONUS;
    }

    let color = board.side_to_move();
    ctx.history.score(color, mv.from.index(), mv.to.index())
}

/// Sort moves descending by score. The sort is stable, so equal scores keep
/// generation (scan) order.
pub(crate) fn order_moves(board: &Board, moves: &mut [Move], ctx: &OrderingContext<'_>) {
    let mut scored: Vec<(i32, Move)> = moves
        .iter()
        .map(|&mv| (score_move(board, mv, ctx), mv))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    for (slot, (_, mv)) in moves.iter_mut().zip(scored) {
        *slot = mv;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::{Board, Color, Move, Piece};

    fn mv(s: &str) -> Move {
        Move::from_coord(s).unwrap()
    }

    fn bare_context<'a>(
        pv: &'a PvHistory,
        killers: &'a KillerTable,
        counters: &'a CounterMoveTable,
        history: &'a HistoryTable,
    ) -> OrderingContext<'a> {
        OrderingContext {
            tt_move: Move::NULL,
            pv,
            killers,
            counters,
            history,
            last_move: Move::NULL,
            ply: 0,
        }
    }

    #[test]
    fn mvv_lva_matches_the_matrix() {
        assert_eq!(mvv_lva(PieceKind::Pawn, PieceKind::Pawn), 105);
        assert_eq!(mvv_lva(PieceKind::Pawn, PieceKind::King), 605);
        assert_eq!(mvv_lva(PieceKind::Queen, PieceKind::Pawn), 101);
        assert_eq!(mvv_lva(PieceKind::King, PieceKind::Queen), 500);
        // PxQ beats QxP.
        assert!(
            mvv_lva(PieceKind::Pawn, PieceKind::Queen) > mvv_lva(PieceKind::Queen, PieceKind::Pawn)
        );
    }

    #[test]
    fn tt_move_outranks_everything() {
        let board = Board::starting_position();
        let pv = {
            let mut pv = PvHistory::new();
            pv.record(5, vec![mv("d2d4")]);
            pv
        };
        let killers = KillerTable::new();
        let counters = CounterMoveTable::new();
        let history = HistoryTable::new();
        let mut ctx = bare_context(&pv, &killers, &counters, &history);
        ctx.tt_move = mv("e2e4");

        assert!(score_move(&board, mv("e2e4"), &ctx) > score_move(&board, mv("d2d4"), &ctx));
    }

    #[test]
    fn pv_move_scales_with_iteration_depth() {
        let board = Board::starting_position();
        let pv = {
            let mut pv = PvHistory::new();
            pv.record(2, vec![mv("e2e4")]);
            pv.record(4, vec![mv("d2d4")]);
            pv
        };
        let killers = KillerTable::new();
        let counters = CounterMoveTable::new();
        let history = HistoryTable::new();
        let ctx = bare_context(&pv, &killers, &counters, &history);

        let shallow = score_move(&board, mv("e2e4"), &ctx);
        let deep = score_move(&board, mv("d2d4"), &ctx);
        assert_eq!(deep - shallow, 2 * PV_DEPTH_WEIGHT);
        assert!(shallow >= PV_MOVE_BONUS);
    }

    #[test]
    fn losing_capture_ranks_below_winning_capture() {
        // Qxc5 loses the queen to the d6 pawn; gxh5 wins a pawn outright.
        let board: Board = "4k3/8/3p4/2p4p/6P1/4Q3/8/4K3 w - - 0 1".parse().unwrap();
        let pv = PvHistory::new();
        let killers = KillerTable::new();
        let counters = CounterMoveTable::new();
        let history = HistoryTable::new();
        let ctx = bare_context(&pv, &killers, &counters, &history);

        let losing = score_move(&board, mv("e3c5"), &ctx);
        let winning = score_move(&board, mv("g4h5"), &ctx);
        assert_eq!(winning, GOOD_CAPTURE_BONUS + 100);
        assert_eq!(losing, BAD_CAPTURE_BONUS + mvv_lva(PieceKind::Queen, PieceKind::Pawn));
        assert!(losing < winning);
    }

    #[test]
    fn killer_tiers_beat_plain_quiets_and_counter_beats_killers() {
        // White to move after 1... Nf6.
        let board: Board = "rnbqkb1r/pppppppp/5n2/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 2 2"
            .parse()
            .unwrap();

        let pv = PvHistory::new();
        let mut killers = KillerTable::new();
        killers.store(0, mv("b1c3"));
        killers.store(0, mv("g1f3"));
        let mut counters = CounterMoveTable::new();
        let mut history = HistoryTable::new();
        history.add_bonus(Color::White, 12, 28, 9); // e2e4 earns a 81-point quiet score

        let last = mv("g8f6");
        let knight = Piece::new(PieceKind::Knight, Color::Black);
        counters.store(knight, last, mv("d2d4"));

        let mut ctx = bare_context(&pv, &killers, &counters, &history);
        ctx.last_move = last;

        let counter = score_move(&board, mv("d2d4"), &ctx);
        let killer_first = score_move(&board, mv("g1f3"), &ctx);
        let killer_second = score_move(&board, mv("b1c3"), &ctx);
        let quiet = score_move(&board, mv("e2e4"), &ctx);

        assert_eq!(counter, COUNTER_MOVE_BONUS);
        assert_eq!(killer_first, KILLER_FIRST_BONUS);
        assert_eq!(killer_second, KILLER_SECOND_BONUS);
        assert_eq!(quiet, 81);
        assert!(counter > killer_first && killer_first > killer_second && killer_second > quiet);
    }

    #[test]
    fn order_moves_puts_the_capture_first() {
        let board: Board = "4k3/8/8/4p3/3Q4/8/8/4K3 w - - 0 1".parse().unwrap();
        let mut moves = board.generate_legal_moves();
        let pv = PvHistory::new();
        let killers = KillerTable::new();
        let counters = CounterMoveTable::new();
        let history = HistoryTable::new();
        let ctx = bare_context(&pv, &killers, &counters, &history);

        order_moves(&board, &mut moves, &ctx);
        assert!(
            board.piece_at(moves[0].to).is_some(),
            "first ordered move should be the capture, got {}",
            moves[0]
        );
    }

    #[test]
    fn en_passant_counts_as_a_capture() {
        let board: Board = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
            .parse()
            .unwrap();
        assert!(is_capture(&board, mv("e5d6")));
        assert!(!is_capture(&board, mv("e5e6")));
    }
}

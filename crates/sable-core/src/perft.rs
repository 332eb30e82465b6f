//! Perft (performance test) for move generation correctness verification.

use tracing::debug;

use crate::board::Board;
use crate::movegen::generate_legal_moves;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves (bulk counting: no recursive make/unmake).
pub fn perft(board: &Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut scratch = *board;
    let mut nodes = 0u64;
    for mv in moves {
        let Some(undo) = scratch.make_move(mv) else {
            continue;
        };
        nodes += perft(&scratch, depth - 1);
        scratch.unmake_move(mv, undo);
    }
    nodes
}

/// Run perft with per-move breakdown (useful for debugging movegen).
///
/// Returns `(move, node_count)` pairs sorted alphabetically by move.
pub fn divide(board: &Board, depth: usize) -> Vec<(String, u64)> {
    let mut scratch = *board;
    let mut results: Vec<(String, u64)> = Vec::new();

    for mv in generate_legal_moves(board) {
        let Some(undo) = scratch.make_move(mv) else {
            continue;
        };
        let count = if depth <= 1 {
            1
        } else {
            perft(&scratch, depth - 1)
        };
        scratch.unmake_move(mv, undo);
        debug!(%mv, count, "divide");
        results.push((mv.to_string(), count));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn perft_startpos_shallow() {
        let board = Board::starting_position();
        assert_eq!(perft(&board, 1), 20);
        assert_eq!(perft(&board, 2), 400);
        assert_eq!(perft(&board, 3), 8_902);
    }

    #[test]
    #[ignore] // slow in debug builds
    fn perft_startpos_depth_4() {
        let board = Board::starting_position();
        assert_eq!(perft(&board, 4), 197_281);
    }

    // Kiwipete exercises castling, en passant, pins, and promotions.
    fn kiwipete() -> Board {
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap()
    }

    #[test]
    fn perft_kiwipete_shallow() {
        assert_eq!(perft(&kiwipete(), 1), 48);
        assert_eq!(perft(&kiwipete(), 2), 2_039);
    }

    #[test]
    #[ignore] // slow in debug builds
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft(&kiwipete(), 3), 97_862);
    }

    // Position 3 from the CPW perft suite: en passant discovered checks.
    #[test]
    fn perft_position_3_shallow() {
        let board: Board = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1".parse().unwrap();
        assert_eq!(perft(&board, 1), 14);
        assert_eq!(perft(&board, 2), 191);
        assert_eq!(perft(&board, 3), 2_812);
    }

    #[test]
    fn divide_sums_to_perft() {
        let board = Board::starting_position();
        let parts = divide(&board, 2);
        assert_eq!(parts.len(), 20);
        let total: u64 = parts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&board, 2));
    }
}

//! Static evaluation: material and piece-square bonuses.
//!
//! Scores are centipawns from the side to move's perspective (higher is
//! better for the side to move). Tables are stored rank-1-first so White
//! indexes them with `row * 8 + col` directly; Black lookups mirror the row.

use sable_core::{Board, Color, Piece, PieceKind, Position};

/// Material values indexed by [`PieceKind::index`].
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20_000];

pub const PAWN_VALUE: i32 = PIECE_VALUES[0];
pub const KNIGHT_VALUE: i32 = PIECE_VALUES[1];
pub const BISHOP_VALUE: i32 = PIECE_VALUES[2];
pub const ROOK_VALUE: i32 = PIECE_VALUES[3];
pub const QUEEN_VALUE: i32 = PIECE_VALUES[4];
pub const KING_VALUE: i32 = PIECE_VALUES[5];

/// Score of a checkmate, before any distance-to-mate adjustment.
pub const MATE: i32 = 100_000;

/// Material value of a piece kind.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.index()]
}

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
    // Rank 1 — pawns never sit here
      0,   0,   0,   0,   0,   0,   0,   0,
    // Rank 2
      5,  10,  10, -20, -20,  10,  10,   5,
    // Rank 3
      5,  -5, -10,   0,   0, -10,  -5,   5,
    // Rank 4
      0,   0,   0,  20,  20,   0,   0,   0,
    // Rank 5
      5,   5,  10,  25,  25,  10,   5,   5,
    // Rank 6
     10,  10,  20,  30,  30,  20,  10,  10,
    // Rank 7
     50,  50,  50,  50,  50,  50,  50,  50,
    // Rank 8 — promotion replaces the pawn first
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// King table for the middlegame: reward the castled corners, punish walks.
#[rustfmt::skip]
const KING_MIDDLEGAME_TABLE: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

/// King table for the endgame: centralize.
#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -50, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

/// Piece-square table for a kind, selecting the king table by game phase.
fn table_for(kind: PieceKind, endgame: bool) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => {
            if endgame {
                &KING_ENDGAME_TABLE
            } else {
                &KING_MIDDLEGAME_TABLE
            }
        }
    }
}

/// Positional bonus for a piece on a square. Black mirrors the row so the
/// White-oriented tables apply symmetrically.
#[inline]
pub fn square_bonus(piece: Piece, pos: Position, endgame: bool) -> i32 {
    let index = match piece.color {
        Color::White => pos.index(),
        Color::Black => ((7 - pos.row) * 8 + pos.col) as usize,
    };
    table_for(piece.kind, endgame)[index]
}

/// Endgame detection: both queens gone, or at most six non-king,
/// non-pawn pieces remain on the board.
pub fn is_endgame(board: &Board) -> bool {
    let mut officers = 0;
    let mut white_queen = false;
    let mut black_queen = false;

    for row in 0..8 {
        for col in 0..8 {
            let Some(piece) = board.piece_at(Position::new(row, col)) else {
                continue;
            };
            match piece.kind {
                PieceKind::Pawn | PieceKind::King => {}
                PieceKind::Queen => {
                    officers += 1;
                    match piece.color {
                        Color::White => white_queen = true,
                        Color::Black => black_queen = true,
                    }
                }
                _ => officers += 1,
            }
        }
    }

    (!white_queen && !black_queen) || officers <= 6
}

/// Evaluate the position from the side to move's perspective.
///
/// Checkmate scores [`MATE`] against the mated side and stalemate scores 0;
/// otherwise the material and piece-square sums of both sides are differenced
/// and flipped for Black.
pub fn evaluate(board: &Board) -> i32 {
    let raw = if board.generate_legal_moves().is_empty() {
        if board.is_in_check() {
            // The side to move is checkmated.
            match board.side_to_move() {
                Color::White => -MATE,
                Color::Black => MATE,
            }
        } else {
            return 0;
        }
    } else {
        let endgame = is_endgame(board);
        let mut white = 0;
        let mut black = 0;

        for row in 0..8 {
            for col in 0..8 {
                let pos = Position::new(row, col);
                let Some(piece) = board.piece_at(pos) else {
                    continue;
                };
                let score = piece_value(piece.kind) + square_bonus(piece, pos, endgame);
                match piece.color {
                    Color::White => white += score,
                    Color::Black => black += score,
                }
            }
        }

        white - black
    };

    match board.side_to_move() {
        Color::White => raw,
        Color::Black => -raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::Board;

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate(&Board::starting_position()), 0);
    }

    #[test]
    fn perspective_flips_with_side_to_move() {
        // White is up a knight; the same placement scores positive for White
        // to move and negative for Black to move.
        let white_to_move: Board = "4k3/8/8/8/8/8/8/2N1K3 w - - 0 1".parse().unwrap();
        let black_to_move: Board = "4k3/8/8/8/8/8/8/2N1K3 b - - 0 1".parse().unwrap();
        let score = evaluate(&white_to_move);
        assert!(score > 0, "white should be ahead, got {score}");
        assert_eq!(evaluate(&black_to_move), -score);
    }

    #[test]
    fn mirrored_position_is_symmetric() {
        // The same structure reflected for both sides evaluates to zero.
        let board: Board = "4k3/pppp4/8/8/8/8/PPPP4/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn checkmate_scores_mate_for_the_winner() {
        // Black is checkmated, black to move.
        let board: Board = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert_eq!(evaluate(&board), -MATE);
    }

    #[test]
    fn stalemate_scores_zero() {
        let board: Board = "7k/8/6Q1/8/8/8/8/7K b - - 0 1".parse().unwrap();
        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn pawn_advances_gain_table_bonus() {
        let e2 = Position::from_algebraic("e2").unwrap();
        let e4 = Position::from_algebraic("e4").unwrap();
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        assert_eq!(square_bonus(pawn, e2, false), -20);
        assert_eq!(square_bonus(pawn, e4, false), 20);
    }

    #[test]
    fn black_lookup_mirrors_white() {
        let white_e4 = square_bonus(
            Piece::new(PieceKind::Pawn, Color::White),
            Position::from_algebraic("e4").unwrap(),
            false,
        );
        let black_e5 = square_bonus(
            Piece::new(PieceKind::Pawn, Color::Black),
            Position::from_algebraic("e5").unwrap(),
            false,
        );
        assert_eq!(white_e4, black_e5);
    }

    #[test]
    fn endgame_predicate() {
        assert!(!is_endgame(&Board::starting_position()));

        // No queens: endgame regardless of the rest.
        let no_queens: Board = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        assert!(is_endgame(&no_queens));

        // Queens on but only a handful of officers left.
        let sparse: Board = "4k3/8/8/3q4/3Q4/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(is_endgame(&sparse));
    }

    #[test]
    fn king_table_switches_in_the_endgame() {
        let king = Piece::new(PieceKind::King, Color::White);
        let e4 = Position::from_algebraic("e4").unwrap();
        assert_eq!(square_bonus(king, e4, false), -40);
        assert_eq!(square_bonus(king, e4, true), 40);
    }
}

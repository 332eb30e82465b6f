//! Legal move generation for the mailbox board.
//!
//! Moves are generated pseudo-legally per piece and then filtered through
//! [`Board::make_move`], which rejects anything leaving the mover's own king
//! in check. Castling additionally verifies at generation time that the king
//! does not castle out of or through an attacked square.

use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::color::Color;
use crate::moves::Move;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Generate all legal moves for the side to move.
pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
    let mut scratch = *board;
    generate_pseudo_legal(board)
        .into_iter()
        .filter(|&mv| match scratch.make_move(mv) {
            Some(undo) => {
                scratch.unmake_move(mv, undo);
                true
            }
            None => false,
        })
        .collect()
}

/// Generate pseudo-legal moves for the side to move (king safety unchecked).
pub fn generate_pseudo_legal(board: &Board) -> Vec<Move> {
    let us = board.side_to_move();
    let mut moves = Vec::with_capacity(48);

    for row in 0..8 {
        for col in 0..8 {
            let from = Position::new(row, col);
            let Some(piece) = board.piece_at(from) else {
                continue;
            };
            if piece.color != us {
                continue;
            }

            match piece.kind {
                PieceKind::Pawn => pawn_moves(board, from, us, &mut moves),
                PieceKind::Knight => leaper_moves(board, from, us, &KNIGHT_OFFSETS, &mut moves),
                PieceKind::Bishop => slider_moves(board, from, us, &BISHOP_DIRECTIONS, &mut moves),
                PieceKind::Rook => slider_moves(board, from, us, &ROOK_DIRECTIONS, &mut moves),
                PieceKind::Queen => {
                    slider_moves(board, from, us, &BISHOP_DIRECTIONS, &mut moves);
                    slider_moves(board, from, us, &ROOK_DIRECTIONS, &mut moves);
                }
                PieceKind::King => {
                    leaper_moves(board, from, us, &KING_OFFSETS, &mut moves);
                    castle_moves(board, from, us, &mut moves);
                }
            }
        }
    }

    moves
}

fn pawn_moves(board: &Board, from: Position, us: Color, moves: &mut Vec<Move>) {
    let dir = us.forward();

    let one = from.offset(dir, 0);
    if one.is_valid() && board.piece_at(one).is_none() {
        moves.push(Move::new(from, one));

        if from.row == us.pawn_start_row() {
            let two = from.offset(2 * dir, 0);
            if board.piece_at(two).is_none() {
                moves.push(Move::new(from, two));
            }
        }
    }

    for dc in [-1, 1] {
        let to = from.offset(dir, dc);
        if !to.is_valid() {
            continue;
        }
        let takes_piece = board.piece_at(to).is_some_and(|p| p.color != us);
        let takes_en_passant = board.en_passant_target() == Some(to);
        if takes_piece || takes_en_passant {
            moves.push(Move::new(from, to));
        }
    }
}

fn leaper_moves(
    board: &Board,
    from: Position,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in offsets {
        let to = from.offset(dr, dc);
        if to.is_valid() && !board.piece_at(to).is_some_and(|p| p.color == us) {
            moves.push(Move::new(from, to));
        }
    }
}

fn slider_moves(
    board: &Board,
    from: Position,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in directions {
        let mut to = from.offset(dr, dc);
        while to.is_valid() {
            match board.piece_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(piece) => {
                    if piece.color != us {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            to = to.offset(dr, dc);
        }
    }
}

fn castle_moves(board: &Board, from: Position, us: Color, moves: &mut Vec<Move>) {
    let row = us.back_row();
    if from != Position::new(row, 4) {
        return;
    }

    let them = !us;
    if square_attacked(board, from, them) {
        return;
    }

    if board.castling().has(us, CastleSide::KingSide)
        && board.piece_at(Position::new(row, 7)) == Some(Piece::new(PieceKind::Rook, us))
        && board.piece_at(Position::new(row, 5)).is_none()
        && board.piece_at(Position::new(row, 6)).is_none()
        && !square_attacked(board, Position::new(row, 5), them)
    {
        moves.push(Move::new(from, Position::new(row, 6)));
    }

    if board.castling().has(us, CastleSide::QueenSide)
        && board.piece_at(Position::new(row, 0)) == Some(Piece::new(PieceKind::Rook, us))
        && board.piece_at(Position::new(row, 1)).is_none()
        && board.piece_at(Position::new(row, 2)).is_none()
        && board.piece_at(Position::new(row, 3)).is_none()
        && !square_attacked(board, Position::new(row, 3), them)
    {
        moves.push(Move::new(from, Position::new(row, 2)));
    }
}

/// Return `true` if `target` is attacked by any piece of `by`.
///
/// Reverse lookup: each attack pattern is cast from the target square and
/// checked against the attacker's pieces.
pub fn square_attacked(board: &Board, target: Position, by: Color) -> bool {
    // Pawns attack one row forward diagonally, so a `by` pawn attacking
    // `target` stands one row behind it.
    let dir = by.forward();
    for dc in [-1, 1] {
        if board.piece_at(target.offset(-dir, dc)) == Some(Piece::new(PieceKind::Pawn, by)) {
            return true;
        }
    }

    for &(dr, dc) in &KNIGHT_OFFSETS {
        if board.piece_at(target.offset(dr, dc)) == Some(Piece::new(PieceKind::Knight, by)) {
            return true;
        }
    }

    for &(dr, dc) in &KING_OFFSETS {
        if board.piece_at(target.offset(dr, dc)) == Some(Piece::new(PieceKind::King, by)) {
            return true;
        }
    }

    for &(dr, dc) in &ROOK_DIRECTIONS {
        if ray_hits(board, target, dr, dc, by, PieceKind::Rook) {
            return true;
        }
    }

    for &(dr, dc) in &BISHOP_DIRECTIONS {
        if ray_hits(board, target, dr, dc, by, PieceKind::Bishop) {
            return true;
        }
    }

    false
}

/// Walk a ray from `target` and report whether the first piece hit is a
/// `by`-colored slider of the given kind or a queen.
fn ray_hits(board: &Board, target: Position, dr: i8, dc: i8, by: Color, slider: PieceKind) -> bool {
    let mut pos = target.offset(dr, dc);
    while pos.is_valid() {
        if let Some(piece) = board.piece_at(pos) {
            return piece.color == by && (piece.is(slider) || piece.is(PieceKind::Queen));
        }
        pos = pos.offset(dr, dc);
    }
    false
}

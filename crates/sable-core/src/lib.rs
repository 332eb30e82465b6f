//! Core chess types: the mailbox board, move generation, and game rules.

mod board;
mod castle_rights;
mod color;
mod error;
mod fen;
mod movegen;
mod moves;
mod perft;
mod piece;
mod position;
mod zobrist;

pub use board::{Board, PrettyBoard, Undo};
pub use castle_rights::{CastleRights, CastleSide};
pub use color::Color;
pub use error::{BoardError, FenError};
pub use fen::STARTING_FEN;
pub use movegen::{generate_legal_moves, generate_pseudo_legal, square_attacked};
pub use moves::Move;
pub use perft::{divide, perft};
pub use piece::{Piece, PieceKind};
pub use position::Position;
pub use zobrist::hash_from_scratch;

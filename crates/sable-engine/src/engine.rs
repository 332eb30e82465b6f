//! Public engine entry points: a game board plus a searcher.

use std::fmt::Write as _;

use sable_core::{Board, FenError, Move};

use crate::search::Searcher;

/// A chess engine instance: the current game board, the searcher that
/// analyzes snapshots of it, and the latest principal variation.
pub struct Engine {
    board: Board,
    searcher: Searcher,
    max_depth: i32,
    last_pv: Vec<Move>,
}

impl Engine {
    /// Search depth used when none is given.
    pub const DEFAULT_DEPTH: i32 = 5;

    /// Create an engine for the given position.
    pub fn new(board: Board, max_depth: i32) -> Engine {
        Engine {
            board,
            searcher: Searcher::new(),
            max_depth: max_depth.max(1),
            last_pv: Vec::new(),
        }
    }

    /// Create an engine from a FEN string.
    pub fn from_fen(fen: &str, max_depth: i32) -> Result<Engine, FenError> {
        Ok(Engine::new(fen.parse()?, max_depth))
    }

    /// The current game board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the game board, discarding the stale PV.
    pub fn set_position(&mut self, board: Board) {
        self.board = board;
        self.last_pv.clear();
    }

    /// Play a move on the game board. Returns `false` (leaving the board
    /// unchanged) if the move is illegal.
    pub fn play(&mut self, mv: Move) -> bool {
        if !self.board.generate_legal_moves().contains(&mv) {
            return false;
        }
        let played = self.board.make_move(mv).is_some();
        if played {
            self.last_pv.clear();
        }
        played
    }

    /// Run iterative deepening on a snapshot of the game board and return
    /// the best move of the deepest completed iteration.
    ///
    /// Progress is reported per iteration on stdout. On a terminal position
    /// the returned move is [`Move::NULL`]; callers that need to distinguish
    /// mate from stalemate should consult the board directly.
    pub fn best_move(&mut self) -> Move {
        let result = self
            .searcher
            .search(&self.board, self.max_depth, |info| {
                println!(
                    "Depth: {}, Score: {}, Nodes: {}, Time: {} ms, NPS: {}",
                    info.depth,
                    info.score,
                    info.nodes,
                    info.elapsed.as_millis(),
                    info.nps
                );
                println!("PV at depth {}: {}", info.depth, join_moves(info.pv));
            });

        self.last_pv = result.pv;
        result.best_move
    }

    /// The latest principal variation as space-separated move strings.
    pub fn pv_string(&self) -> String {
        join_moves(&self.last_pv)
    }
}

fn join_moves(moves: &[Move]) -> String {
    let mut out = String::new();
    for (i, mv) in moves.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{mv}");
    }
    out
}

//! Search: iterative deepening over a principal-variation negamax core.

pub mod heuristics;
pub mod negamax;
pub mod ordering;
pub mod see;
pub mod tt;

use std::time::{Duration, Instant};

use sable_core::{Board, Move};
use tracing::debug;

use heuristics::{CounterMoveTable, HistoryTable, KillerTable, PvHistory};
use negamax::{INF, SearchContext, pv_search};
use tt::TranspositionTable;

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move from the deepest completed iteration ([`Move::NULL`] when
    /// the position is terminal).
    pub best_move: Move,
    /// Principal variation of the deepest completed iteration.
    pub pv: Vec<Move>,
    /// Score in centipawns from the side to move's perspective.
    pub score: i32,
    /// Total nodes visited across all iterations.
    pub nodes: u64,
    /// Deepest completed iteration.
    pub depth: i32,
}

/// Per-iteration progress passed to the driver callback.
#[derive(Debug, Clone)]
pub struct IterationInfo<'a> {
    pub depth: i32,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub nps: u64,
    pub pv: &'a [Move],
}

/// Iterative-deepening searcher. Owns the transposition table, which
/// persists (with its age counter) across root searches; all other
/// heuristic state is rebuilt per root call.
pub struct Searcher {
    tt: TranspositionTable,
}

impl Searcher {
    /// Create a searcher with the default transposition table size.
    pub fn new() -> Self {
        Self::with_tt_entries(TranspositionTable::DEFAULT_ENTRIES)
    }

    /// Create a searcher with a transposition table of the given size.
    pub fn with_tt_entries(entries: usize) -> Self {
        Self {
            tt: TranspositionTable::new(entries),
        }
    }

    /// Drop all cached search results.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Run iterative deepening on a snapshot of `board` up to `max_depth`.
    ///
    /// `on_iter` is called after each completed iteration; heuristic tables
    /// accumulated at one depth order the moves of the next.
    pub fn search<F>(&mut self, board: &Board, max_depth: i32, mut on_iter: F) -> SearchResult
    where
        F: FnMut(&IterationInfo<'_>),
    {
        self.tt.increment_age();

        let mut ctx = SearchContext {
            nodes: 0,
            tt: &mut self.tt,
            pv_history: PvHistory::new(),
            killers: KillerTable::new(),
            counters: CounterMoveTable::new(),
            history: HistoryTable::new(),
        };

        let mut working = *board;
        let start = Instant::now();

        let mut result = SearchResult {
            best_move: Move::NULL,
            pv: Vec::new(),
            score: 0,
            nodes: 0,
            depth: 0,
        };

        for depth in 1..=max_depth {
            let mut pv = Vec::new();
            let score = pv_search(
                &mut working,
                depth,
                -INF,
                INF,
                &mut pv,
                0,
                Move::NULL,
                &mut ctx,
            );
            debug_assert_eq!(working, *board, "search must unmake every move it makes");

            if !pv.is_empty() {
                result.best_move = pv[0];
                result.pv = pv.clone();
                ctx.pv_history.record(depth as usize, pv.clone());
            }
            result.score = score;
            result.nodes = ctx.nodes;
            result.depth = depth;

            let elapsed = start.elapsed();
            let nps = (ctx.nodes as f64 / elapsed.as_secs_f64().max(1e-6)) as u64;
            debug!(depth, score, nodes = ctx.nodes, ?elapsed, "iteration complete");

            on_iter(&IterationInfo {
                depth,
                score,
                nodes: ctx.nodes,
                elapsed,
                nps,
                pv: &result.pv,
            });
        }

        result
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

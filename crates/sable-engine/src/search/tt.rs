//! Transposition table: a depth-aware cache of search results keyed by the
//! position's Zobrist hash.
//!
//! The search is single-threaded, so the table is a plain owned array with
//! `&mut self` stores — no atomics or locking. One entry per bucket; the
//! replacement policy prefers fresher and deeper information.

use sable_core::Move;

/// How a stored score relates to the true score of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is exact (the search completed inside the window).
    Exact,
    /// The score is an upper bound (the node failed low).
    Alpha,
    /// The score is a lower bound (the node failed high / beta cutoff).
    Beta,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: u64,
    depth: i32,
    score: i32,
    bound: Bound,
    best_move: Move,
    age: u8,
}

/// Result of a probe: a usable score when the entry's depth and bound allow
/// a cutoff under the caller's window, and the stored move for ordering on
/// any key match regardless of depth.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub score: Option<i32>,
    pub best_move: Move,
}

impl Probe {
    const MISS: Probe = Probe {
        score: None,
        best_move: Move::NULL,
    };
}

/// Single-bucket transposition table with an age-aware replacement policy.
pub struct TranspositionTable {
    entries: Vec<Option<Entry>>,
    mask: usize,
    age: u8,
}

impl TranspositionTable {
    /// Default number of entries (a power of two).
    pub const DEFAULT_ENTRIES: usize = 1 << 20;

    /// Create a table with at least the requested number of entries,
    /// rounded up to a power of two.
    pub fn new(entries: usize) -> Self {
        let capacity = entries.max(1).next_power_of_two();
        Self {
            entries: vec![None; capacity],
            mask: capacity - 1,
            age: 0,
        }
    }

    #[inline]
    fn bucket(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Advance the age counter. Called once per root search so that entries
    /// from earlier searches lose their replacement priority.
    pub fn increment_age(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    /// Look up a position.
    ///
    /// The score is returned only when the stored depth is at least the
    /// query depth and the bound admits a cutoff: exact always, a lower
    /// bound when `score >= beta`, an upper bound when `score <= alpha`.
    pub fn probe(&self, hash: u64, depth: i32, alpha: i32, beta: i32) -> Probe {
        let Some(entry) = self.entries[self.bucket(hash)] else {
            return Probe::MISS;
        };
        if entry.key != hash {
            return Probe::MISS;
        }

        let score = if entry.depth >= depth {
            match entry.bound {
                Bound::Exact => Some(entry.score),
                Bound::Beta if entry.score >= beta => Some(entry.score),
                Bound::Alpha if entry.score <= alpha => Some(entry.score),
                _ => None,
            }
        } else {
            None
        };

        Probe {
            score,
            best_move: entry.best_move,
        }
    }

    /// Store a search result.
    ///
    /// Replaces the bucket when it is empty, from an older search, shallower
    /// than the new entry, or when the new entry is exact.
    pub fn store(&mut self, hash: u64, depth: i32, score: i32, bound: Bound, best_move: Move) {
        let age = self.age;
        let bucket = self.bucket(hash);
        let slot = &mut self.entries[bucket];

        let replace = match slot {
            None => true,
            Some(existing) => {
                existing.age != age || depth >= existing.depth || bound == Bound::Exact
            }
        };

        if replace {
            *slot = Some(Entry {
                key: hash,
                depth,
                score,
                bound,
                best_move,
                age,
            });
        }
    }

    /// Drop every entry and reset the age counter.
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.age = 0;
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("entries", &self.entries.len())
            .field("age", &self.age)
            .finish()
    }
}

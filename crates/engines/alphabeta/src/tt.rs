//! Direct-mapped transposition table.
//!
//! One slot per index, index = `hash & (len - 1)`. A store always overwrites
//! the slot. A probe only hits when the stored hash equals the probing hash,
//! so two positions sharing a slot never see each other's results.

use chess_core::Move;

use crate::search::MATE_BOUND;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// Search failed high; the true score is at least `score`.
    Lower,
    /// Search failed low; the true score is at most `score`.
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    pub hash: u64,
    pub best_move: Move,
    pub depth: i32,
    pub score: i32,
    pub bound: Bound,
}

impl TtEntry {
    /// The score to return without searching, if this entry licenses a
    /// cutoff for a node searched to `depth` with window `[alpha, beta]`.
    /// `score` is the entry's score already rebased to the probing ply.
    pub fn cutoff(&self, depth: i32, score: i32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        let usable = match self.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        };
        usable.then_some(score)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TtStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    mask: usize,
    stats: TtStats,
}

impl TranspositionTable {
    /// Table with `2^bits` slots.
    pub fn new(bits: u32) -> Self {
        let len = 1usize << bits;
        Self {
            entries: vec![None; len],
            mask: len - 1,
            stats: TtStats::default(),
        }
    }

    /// Largest power-of-two table that fits in `size_mb` megabytes, as `bits`.
    pub fn bits_for_mb(size_mb: usize) -> u32 {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entry_size = std::mem::size_of::<Option<TtEntry>>().max(1);
        let count = (bytes / entry_size).max(1);
        usize::BITS - 1 - count.leading_zeros()
    }

    /// Approximate size in megabytes of a table with `bits` index bits, at least 1.
    pub fn mb_for_bits(bits: u32) -> usize {
        let bytes = (1usize << bits) * std::mem::size_of::<Option<TtEntry>>();
        (bytes / (1024 * 1024)).max(1)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TtStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TtStats {
        self.stats
    }

    #[inline]
    fn idx(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    pub fn probe(&mut self, hash: u64) -> Option<TtEntry> {
        self.stats.probes += 1;
        let hit = self.entries[self.idx(hash)].filter(|e| e.hash == hash);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, hash: u64, best_move: Move, depth: i32, score: i32, bound: Bound) {
        self.stats.stores += 1;
        let idx = self.idx(hash);
        self.entries[idx] = Some(TtEntry {
            hash,
            best_move,
            depth,
            score,
            bound,
        });
    }
}

/// Mate scores count plies from the root. Stored entries count them from the
/// node instead, so a cached mate stays correct when reached at another ply.
#[inline]
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_BOUND {
        score + ply as i32
    } else if score <= -MATE_BOUND {
        score - ply as i32
    } else {
        score
    }
}

#[inline]
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_BOUND {
        score - ply as i32
    } else if score <= -MATE_BOUND {
        score + ply as i32
    } else {
        score
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;

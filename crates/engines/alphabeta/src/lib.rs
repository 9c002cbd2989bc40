//! Alpha-Beta Chess Engine
//!
//! Iterative deepening over a negamax alpha-beta search with:
//! - Quiescence search over captures, capped below the horizon
//! - Null-move and reverse futility pruning
//! - A direct-mapped transposition table kept for the engine's lifetime
//! - TT-move first, then MVV-LVA capture ordering
//! - A tapered piece-square evaluation

pub mod config;
pub mod driver;
pub mod eval;
pub mod ordering;
pub mod position;
pub mod search;
pub mod tt;

use chess_core::{Engine, Position, SearchLimits, SearchResult};
use tracing::warn;

pub use config::{ConfigError, EngineConfig};
pub use driver::{Iteration, SearchOutcome};
pub use eval::evaluate;
pub use position::SearchPosition;
pub use search::{is_mate_score, Searcher, INFINITY, MATE, MAX_PLY};
pub use tt::{Bound, TranspositionTable, TtEntry};

/// Engine handle an outer loop plays through.
///
/// The transposition table lives as long as the engine and is only cleared
/// by `new_game`, so later turns reuse earlier work.
#[derive(Debug, Clone)]
pub struct AlphaBetaEngine {
    config: EngineConfig,
    tt: TranspositionTable,
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AlphaBetaEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// `config` is expected to have passed `EngineConfig::validate`.
    pub fn with_config(config: EngineConfig) -> Self {
        let tt = TranspositionTable::new(config.tt_bits);
        Self { config, tt }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a full iterative-deepening search and return everything it found.
    pub fn think(&mut self, pos: &Position, limits: &SearchLimits) -> SearchOutcome {
        let mut root = pos.clone();
        let mut clock = limits.time_control(self.config.time_divisor);
        clock.start();
        let max_depth = (limits.depth as i32).min(self.config.max_depth);

        let mut searcher = Searcher::new(&mut root, &mut self.tt, &self.config, clock);
        searcher.iterate(max_depth)
    }

    fn resize_tt(&mut self, bits: u32) {
        let bits = bits.clamp(
            *EngineConfig::TT_BITS_RANGE.start(),
            *EngineConfig::TT_BITS_RANGE.end(),
        );
        self.config.tt_bits = bits;
        self.tt = TranspositionTable::new(bits);
    }
}

impl Engine for AlphaBetaEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let outcome = self.think(pos, &limits);
        SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth: outcome.depth.clamp(0, u8::MAX as i32) as u8,
            nodes: outcome.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        "AlphaBeta 0.1"
    }

    fn new_game(&mut self) {
        self.tt.clear();
    }

    /// `Hash` is in megabytes, `TimeDivisor` is the share of the clock spent per move.
    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name {
            "Hash" => match value.parse::<usize>() {
                Ok(mb) => {
                    self.resize_tt(TranspositionTable::bits_for_mb(mb));
                    true
                }
                Err(_) => {
                    warn!(value, "ignoring non-numeric Hash option");
                    false
                }
            },
            "TimeDivisor" => match value.parse::<u32>() {
                Ok(divisor) if divisor >= 1 => {
                    self.config.time_divisor = divisor;
                    true
                }
                _ => {
                    warn!(value, "TimeDivisor must be a positive integer");
                    false
                }
            },
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;

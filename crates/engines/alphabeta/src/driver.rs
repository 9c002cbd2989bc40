//! Iterative deepening around `Searcher::negamax`.

use std::time::Duration;

use chess_core::{move_to_uci, Move};
use tracing::{debug, info};

use crate::position::SearchPosition;
use crate::search::{Searcher, INFINITY};

/// One finished iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iteration {
    pub depth: i32,
    pub score: i32,
    pub best_move: Move,
}

/// What a whole turn's search produced.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// None when there is no legal move, or when not even depth 1 finished
    /// and no root move had been tried yet.
    pub best_move: Option<Move>,
    /// Score of the deepest finished iteration, 0 if none finished
    pub score: i32,
    /// Deepest finished iteration, 0 if none finished
    pub depth: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    /// An iteration was abandoned because the clock ran out
    pub stopped: bool,
    /// Best line of the deepest finished iteration, read back from the table
    pub pv: Vec<Move>,
}

impl<'a, P: SearchPosition> Searcher<'a, P> {
    /// Search depth 1, 2, ... up to `max_depth` or until the clock runs out.
    ///
    /// An abandoned iteration's result is thrown away. If depth 1 itself was
    /// abandoned, the root move it had reached so far is returned instead.
    pub fn iterate(&mut self, max_depth: i32) -> SearchOutcome {
        let mut last: Option<Iteration> = None;
        let mut pv = Vec::new();

        for depth in 1..=max_depth {
            let score = self.negamax(-INFINITY, INFINITY, depth, 0);
            let elapsed = self.clock.elapsed();

            if self.aborted {
                debug!(
                    depth,
                    elapsed_ms = elapsed.as_millis() as u64,
                    nodes = self.nodes,
                    "iteration abandoned, out of time"
                );
                break;
            }

            let iteration = Iteration {
                depth,
                score,
                best_move: self.root_move,
            };
            pv = self.principal_variation(self.root_move, depth as usize);

            let secs = elapsed.as_secs_f64();
            let nps = if secs > 0.0 {
                (self.nodes as f64 / secs) as u64
            } else {
                0
            };
            let tt = self.tt.stats();
            info!(
                depth,
                score,
                elapsed_ms = elapsed.as_millis() as u64,
                pv = %pv.iter().map(|&m| move_to_uci(m)).collect::<Vec<_>>().join(" "),
                nodes = self.nodes,
                nps,
                tt_probes = tt.probes,
                tt_hits = tt.hits,
                tt_stores = tt.stores,
                "depth complete"
            );

            // Nothing to deepen: no legal moves at the root.
            let finished = iteration.best_move.is_null();
            last = Some(iteration);
            if finished {
                break;
            }
        }

        let fallback = self.root_move;
        let (best_move, score, depth) = match last {
            Some(it) => (it.best_move, it.score, it.depth),
            None => (fallback, 0, 0),
        };
        SearchOutcome {
            best_move: (!best_move.is_null()).then_some(best_move),
            score,
            depth,
            nodes: self.nodes,
            elapsed: self.clock.elapsed(),
            stopped: self.aborted,
            pv,
        }
    }

    /// Follow table moves from the root, checking each one is legal.
    fn principal_variation(&mut self, first: Move, max_len: usize) -> Vec<Move> {
        let mut line = Vec::with_capacity(max_len);
        let mut undos = Vec::with_capacity(max_len);
        let mut moves = Vec::with_capacity(64);
        let mut next = first;

        while line.len() < max_len && !next.is_null() {
            self.pos.generate_moves(&mut moves, false);
            if !moves.contains(&next) {
                break;
            }
            undos.push(self.pos.make_move(next));
            line.push(next);
            next = self
                .tt
                .probe(self.pos.hash())
                .map(|e| e.best_move)
                .unwrap_or(Move::NULL);
        }

        for (&mv, undo) in line.iter().zip(undos).rev() {
            self.pos.unmake_move(mv, undo);
        }
        line
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;

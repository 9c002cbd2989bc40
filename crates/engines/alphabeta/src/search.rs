//! Negamax alpha-beta search.
//!
//! `Searcher` carries everything one search needs: the position being
//! searched, the engine's transposition table, the clock and the
//! repetition history of the current path. It is created per turn and
//! borrowed mutably down the recursion.

use chess_core::{Move, TimeControl};

use crate::config::EngineConfig;
use crate::eval::evaluate;
use crate::ordering::MovePicker;
use crate::position::SearchPosition;
use crate::tt::{score_from_tt, score_to_tt, Bound, TranspositionTable};

pub const MATE: i32 = 30_000;
/// Wider than any reachable score; the root window is `[-INFINITY, INFINITY]`.
pub const INFINITY: i32 = 50_000;
pub const MAX_PLY: usize = 128;
/// Scores at or beyond this magnitude are mates.
pub const MATE_BOUND: i32 = MATE - MAX_PLY as i32;

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_BOUND
}

pub struct Searcher<'a, P: SearchPosition> {
    pub(crate) pos: &'a mut P,
    pub(crate) tt: &'a mut TranspositionTable,
    pub(crate) config: &'a EngineConfig,
    pub(crate) clock: TimeControl,
    /// Hash seen at each ply of the current path
    pub(crate) history: [u64; MAX_PLY],
    pub(crate) nodes: u64,
    /// Best move found so far at ply 0
    pub(crate) root_move: Move,
    /// Set once the clock runs out; every score computed after that is garbage.
    pub(crate) aborted: bool,
}

impl<'a, P: SearchPosition> Searcher<'a, P> {
    pub fn new(
        pos: &'a mut P,
        tt: &'a mut TranspositionTable,
        config: &'a EngineConfig,
        clock: TimeControl,
    ) -> Self {
        Self {
            pos,
            tt,
            config,
            clock,
            history: [0; MAX_PLY],
            nodes: 0,
            root_move: Move::NULL,
            aborted: false,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn root_move(&self) -> Move {
        self.root_move
    }

    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Score of the current position for the side to move, searched
    /// `depth` plies deep (quiescence once `depth <= 0`).
    ///
    /// When the clock runs out the node stops, sets `aborted` and returns 0.
    /// Callers must check `aborted` before trusting any returned score.
    pub fn negamax(&mut self, mut alpha: i32, beta: i32, depth: i32, ply: usize) -> i32 {
        self.nodes += 1;
        if ply >= MAX_PLY {
            return evaluate(&*self.pos);
        }

        // Same side to move two, four, ... plies back on this path.
        let hash = self.pos.hash();
        self.history[ply] = hash;
        if ply > 0
            && self.history[..ply]
                .iter()
                .rev()
                .skip(1)
                .step_by(2)
                .any(|&h| h == hash)
        {
            return 0;
        }

        let qsearch = depth <= 0;
        let entry = self.tt.probe(hash);
        if ply > 0 {
            if let Some(e) = entry {
                let score = score_from_tt(e.score, ply);
                if let Some(score) = e.cutoff(depth, score, alpha, beta) {
                    return score;
                }
            }
        }

        let original_alpha = alpha;
        let static_eval = evaluate(&*self.pos);
        let in_check = self.pos.in_check();
        let mut best = -INFINITY;

        if qsearch {
            // Stand pat: the side to move may decline every capture.
            best = static_eval;
            if best >= beta {
                return best;
            }
            if best > alpha {
                alpha = best;
            }
            if -depth >= self.config.max_qsearch_depth {
                return best;
            }
        } else if ply > 0 && !is_mate_score(beta) {
            if !in_check
                && depth <= self.config.futility_max_depth
                && static_eval - self.config.futility_margin * depth > beta
            {
                return static_eval;
            }

            if depth >= self.config.null_move_min_depth {
                if let Some(undo) = self.pos.make_null_move() {
                    let reduced = depth - 1 - self.config.null_move_reduction;
                    let score = -self.negamax(-beta - 1, -beta, reduced, ply + 1);
                    self.pos.unmake_null_move(undo);
                    if self.aborted {
                        return 0;
                    }
                    if score >= beta {
                        return beta;
                    }
                }
            }
        }

        let mut moves = Vec::with_capacity(if qsearch { 16 } else { 64 });
        self.pos.generate_moves(&mut moves, qsearch);
        if !qsearch && moves.is_empty() {
            return if in_check { -MATE + ply as i32 } else { 0 };
        }

        let tt_move = entry.map(|e| e.best_move).unwrap_or(Move::NULL);
        let picker = MovePicker::new(moves, tt_move, &*self.pos);
        let mut best_move = Move::NULL;

        for mv in picker {
            if self.clock.is_exhausted() {
                self.aborted = true;
                return 0;
            }

            let undo = self.pos.make_move(mv);
            let score = -self.negamax(-beta, -alpha, depth - 1, ply + 1);
            self.pos.unmake_move(mv, undo);
            if self.aborted {
                return 0;
            }

            if score > best {
                best = score;
                best_move = mv;
                if ply == 0 {
                    self.root_move = mv;
                }
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        let bound = if best >= beta {
            Bound::Lower
        } else if best <= original_alpha {
            Bound::Upper
        } else {
            Bound::Exact
        };
        self.tt
            .store(hash, best_move, depth, score_to_tt(best, ply), bound);
        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;

use chess_core::{Move, PieceKind};

use crate::eval::material_value;
use crate::position::SearchPosition;

const TT_MOVE_SCORE: i32 = i32::MAX;
const CAPTURE_BASE: i32 = 1_000_000;
const QUIET_SCORE: i32 = 0;

/// Yields a node's moves best-first without sorting the whole list.
///
/// Each call to `next` swaps the highest-scored remaining move to the front
/// of the unexamined tail. A cutoff after a couple of moves never pays for
/// ordering the rest.
pub struct MovePicker {
    moves: Vec<Move>,
    scores: Vec<i32>,
    next: usize,
}

impl MovePicker {
    pub fn new<P: SearchPosition>(moves: Vec<Move>, tt_move: Move, pos: &P) -> Self {
        let scores = moves
            .iter()
            .map(|&mv| {
                if !tt_move.is_null() && mv == tt_move {
                    TT_MOVE_SCORE
                } else {
                    score_move(pos, mv)
                }
            })
            .collect();
        Self {
            moves,
            scores,
            next: 0,
        }
    }
}

impl Iterator for MovePicker {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.next >= self.moves.len() {
            return None;
        }
        let mut best = self.next;
        for i in self.next + 1..self.scores.len() {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }
        self.moves.swap(self.next, best);
        self.scores.swap(self.next, best);
        self.next += 1;
        Some(self.moves[self.next - 1])
    }
}

/// Most valuable victim, least valuable aggressor, plus the value of any
/// promotion piece. Captures rank above every quiet move.
pub fn score_move<P: SearchPosition>(pos: &P, mv: Move) -> i32 {
    let promotion = mv.promo.map(material_value).unwrap_or(0);
    let victim = if mv.is_en_passant {
        Some(PieceKind::Pawn)
    } else {
        pos.piece_at(mv.to).map(|pc| pc.kind)
    };
    let Some(victim) = victim else {
        return QUIET_SCORE + promotion;
    };
    let attacker = pos
        .piece_at(mv.from)
        .map(|pc| material_value(pc.kind))
        .unwrap_or(0);
    CAPTURE_BASE + 10 * material_value(victim) - attacker + promotion
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;

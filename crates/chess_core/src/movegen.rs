use crate::{
    attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks},
    bitboard::Bitboard,
    board::Position,
    types::*,
};

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Which pseudo-legal moves to produce.
#[derive(Clone, Copy, PartialEq, Eq)]
enum GenMode {
    All,
    /// Captures, en passant and capture-promotions. Quiet promotions are left out.
    Captures,
}

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    generate(pos, out, GenMode::All);
}

/// Legal captures only, for quiescence search.
pub fn legal_captures_into(pos: &mut Position, out: &mut Vec<Move>) {
    generate(pos, out, GenMode::Captures);
}

fn generate(pos: &mut Position, out: &mut Vec<Move>, mode: GenMode) {
    out.clear();
    pseudo_moves(pos, out, mode);

    let mover = pos.side_to_move;
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>, mode: GenMode) {
    let us = pos.side_to_move;
    let occupied = pos.occupied();
    let targets = match mode {
        GenMode::All => !pos.occupancy(us),
        GenMode::Captures => pos.occupancy(us.other()),
    };

    gen_pawns(pos, us, out, mode);

    for from in pos.pieces(us, PieceKind::Knight) {
        push_all(from, knight_attacks(from) & targets, out);
    }
    for from in pos.pieces(us, PieceKind::Bishop) {
        push_all(from, bishop_attacks(from, occupied) & targets, out);
    }
    for from in pos.pieces(us, PieceKind::Rook) {
        push_all(from, rook_attacks(from, occupied) & targets, out);
    }
    for from in pos.pieces(us, PieceKind::Queen) {
        push_all(from, queen_attacks(from, occupied) & targets, out);
    }
    for from in pos.pieces(us, PieceKind::King) {
        push_all(from, king_attacks(from) & targets, out);
        if mode == GenMode::All {
            gen_castle(pos, from, us, out);
        }
    }
}

#[inline]
fn push_all(from: u8, targets: Bitboard, out: &mut Vec<Move>) {
    for to in targets {
        out.push(Move::new(from, to));
    }
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        for pk in PROMOTIONS {
            out.push(Move::promotion(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawns(pos: &Position, c: Color, out: &mut Vec<Move>, mode: GenMode) {
    let (dir, start_rank, promo_rank): (i8, i8, i8) = match c {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };
    let enemies = pos.occupancy(c.other());

    for from in pos.pieces(c, PieceKind::Pawn) {
        let f = file_of(from);
        let r = rank_of(from);

        if mode == GenMode::All
            && let Some(to) = sq(f, r + dir)
            && pos.piece_at(to).is_none()
        {
            push_pawn_move(from, to, promo_rank, out);

            if r == start_rank
                && let Some(to2) = sq(f, r + 2 * dir)
                && pos.piece_at(to2).is_none()
            {
                out.push(Move::new(from, to2));
            }
        }

        let attacks = pawn_attacks(from, c);
        for to in attacks & enemies {
            push_pawn_move(from, to, promo_rank, out);
        }
        if let Some(ep) = pos.en_passant
            && attacks.contains(ep)
        {
            let mut mv = Move::new(from, ep);
            mv.is_en_passant = true;
            out.push(mv);
        }
    }
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    // (king_from, right, squares that must be empty, squares the king crosses, king_to)
    let options: [(u8, bool, &[u8], [u8; 2], u8); 2] = match c {
        Color::White => [
            (4, pos.castling.wk, &[5, 6], [5, 6], 6),
            (4, pos.castling.wq, &[3, 2, 1], [3, 2], 2),
        ],
        Color::Black => [
            (60, pos.castling.bk, &[61, 62], [61, 62], 62),
            (60, pos.castling.bq, &[59, 58, 57], [59, 58], 58),
        ],
    };

    // Can't castle out of check.
    if pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    for (king_from, allowed, empty, crossed, to) in options {
        if !allowed || from != king_from {
            continue;
        }
        if empty.iter().any(|&s| pos.piece_at(s).is_some()) {
            continue;
        }
        if crossed.iter().any(|&s| pos.is_square_attacked(s, enemy)) {
            continue;
        }
        let mut mv = Move::new(king_from, to);
        mv.is_castle = true;
        out.push(mv);
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;

use thiserror::Error;

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

/// Reasons a FEN string is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),
    #[error("board section must list 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {0} does not describe exactly 8 files")]
    RankWidth(usize),
    #[error("invalid piece character '{0}'")]
    Piece(char),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling character '{0}'")]
    Castling(char),
    #[error("invalid en passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("each side needs exactly one king")]
    Kings,
}

/// Full game state with an incrementally maintained Zobrist hash.
///
/// Piece placement is private: every change goes through `set_piece`, which
/// keeps the mailbox, the bitboards and the hash in agreement. The remaining
/// public fields are read freely but only `make_move`/`make_null_move` should
/// change them.
#[derive(Clone, Debug)]
pub struct Position {
    board: [Option<Piece>; 64],
    pieces: [[Bitboard; 6]; 2],
    occupancy: [Bitboard; 2],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    hash: u64,
    ply: u32,
    /// Hashes of every earlier position in the game, oldest first.
    history: Vec<u64>,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
    pub hash: u64,
}

#[derive(Clone, Debug)]
pub struct NullUndo {
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub hash: u64,
}

impl Position {
    fn empty() -> Self {
        Position {
            board: [None; 64],
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupancy: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            ply: 0,
            history: Vec::with_capacity(256),
        }
    }

    pub fn startpos() -> Self {
        Self::from_fen(STARTPOS_FEN).expect("start position FEN is valid")
    }

    /// Parse Forsyth-Edwards Notation. The halfmove and fullmove fields may be omitted.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut pos = Position::empty();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_fen_char(ch).ok_or(FenError::Piece(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let target = sq(file, rank).ok_or(FenError::RankWidth(rank as usize + 1))?;
                    pos.set_piece(target, Some(Piece::new(color, kind)));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth(rank as usize + 1));
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth(rank as usize + 1));
            }
        }
        for color in Color::ALL {
            if pos.pieces(color, PieceKind::King).popcount() != 1 {
                return Err(FenError::Kings);
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.castling.wk = true,
                    'Q' => pos.castling.wq = true,
                    'k' => pos.castling.bk = true,
                    'q' => pos.castling.bq = true,
                    _ => return Err(FenError::Castling(c)),
                }
            }
        }

        pos.en_passant = match parts[3] {
            "-" => None,
            coord => Some(coord_to_sq(coord).ok_or_else(|| FenError::EnPassant(coord.to_string()))?),
        };

        let counter = |field: Option<&&str>, default: u32| match field {
            Some(txt) => txt.parse().map_err(|_| FenError::Counter(txt.to_string())),
            None => Ok(default),
        };
        pos.halfmove_clock = counter(parts.get(4), 0)?;
        pos.fullmove_number = counter(parts.get(5), 1)?;

        pos.hash = pos.compute_hash();
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(pc) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        let ch = pc.kind.fen_char();
                        fen.push(if pc.color == Color::White {
                            ch.to_ascii_uppercase()
                        } else {
                            ch
                        });
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push_str(if self.side_to_move == Color::White { " w " } else { " b " });
        let rights: String = [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ]
        .iter()
        .filter(|(held, _)| *held)
        .map(|(_, c)| *c)
        .collect();
        fen.push_str(if rights.is_empty() { "-" } else { &rights });
        fen.push(' ');
        match self.en_passant {
            Some(ep) => fen.push_str(&sq_to_coord(ep)),
            None => fen.push('-'),
        }
        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }

    /// Same side to move with every piece's color swapped and its rank mirrored.
    ///
    /// Castling rights and the en passant square are mirrored along with the
    /// pieces. Game history is not carried over.
    pub fn color_flipped(&self) -> Position {
        let mut flipped = Position::empty();
        for (from, pc) in self.board.iter().enumerate() {
            if let Some(pc) = pc {
                flipped.set_piece(
                    flip_rank(from as u8),
                    Some(Piece::new(pc.color.other(), pc.kind)),
                );
            }
        }
        flipped.side_to_move = self.side_to_move;
        flipped.castling = CastlingRights {
            wk: self.castling.bk,
            wq: self.castling.bq,
            bk: self.castling.wk,
            bq: self.castling.wq,
        };
        flipped.en_passant = self.en_passant.map(flip_rank);
        flipped.halfmove_clock = self.halfmove_clock;
        flipped.fullmove_number = self.fullmove_number;
        flipped.hash = flipped.compute_hash();
        flipped
    }

    /// Zobrist hash of the current position, maintained incrementally.
    #[inline]
    pub fn position_hash(&self) -> u64 {
        self.hash
    }

    /// Hash rebuilt from scratch; always equal to `position_hash()`.
    pub fn compute_hash(&self) -> u64 {
        let mut h = 0u64;
        for (i, pc) in self.board.iter().enumerate() {
            if let Some(pc) = pc {
                h ^= ZOBRIST.piece_key(*pc, i as u8);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.side_key();
        }
        h ^= ZOBRIST.castling_key(&self.castling);
        if let Some(ep) = self.en_passant {
            h ^= ZOBRIST.ep_key(ep % 8);
        }
        h
    }

    /// Half-moves played since this position was set up, null moves included.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.idx()][kind.idx()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color.idx()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy[0] | self.occupancy[1]
    }

    fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        if let Some(old) = self.board[sq as usize] {
            self.pieces[old.color.idx()][old.kind.idx()].clear(sq);
            self.occupancy[old.color.idx()].clear(sq);
            self.hash ^= ZOBRIST.piece_key(old, sq);
        }
        if let Some(new) = pc {
            self.pieces[new.color.idx()][new.kind.idx()].set(sq);
            self.occupancy[new.color.idx()].set(sq);
            self.hash ^= ZOBRIST.piece_key(new, sq);
        }
        self.board[sq as usize] = pc;
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces(c, PieceKind::King).lsb()
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let occupied = self.occupied();
        let queens = self.pieces(by, PieceKind::Queen);

        // A pawn of `by` attacks `target` iff a pawn of the other color on
        // `target` would attack the pawn's square.
        !(pawn_attacks(target, by.other()) & self.pieces(by, PieceKind::Pawn)).is_empty()
            || !(knight_attacks(target) & self.pieces(by, PieceKind::Knight)).is_empty()
            || !(king_attacks(target) & self.pieces(by, PieceKind::King)).is_empty()
            || !(bishop_attacks(target, occupied) & (self.pieces(by, PieceKind::Bishop) | queens))
                .is_empty()
            || !(rook_attacks(target, occupied) & (self.pieces(by, PieceKind::Rook) | queens))
                .is_empty()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawns = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
        for color in Color::ALL {
            if heavy_or_pawns
                .iter()
                .any(|&kind| !self.pieces(color, kind).is_empty())
            {
                return false;
            }
        }

        let knights = self.pieces(Color::White, PieceKind::Knight)
            | self.pieces(Color::Black, PieceKind::Knight);
        let bishops = self.pieces(Color::White, PieceKind::Bishop)
            | self.pieces(Color::Black, PieceKind::Bishop);
        let minors = knights.popcount() + bishops.popcount();
        if minors <= 1 {
            return true;
        }
        knights.is_empty()
            && ((bishops & Bitboard::LIGHT_SQUARES).is_empty()
                || (bishops & !Bitboard::LIGHT_SQUARES).is_empty())
    }

    /// Third occurrence of the current position since the last irreversible move.
    pub fn is_repetition(&self) -> bool {
        let earlier = self
            .history
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
            .filter(|&&h| h == self.hash)
            .count();
        earlier >= 2
    }

    /// Fifty-move rule, insufficient material or threefold repetition.
    /// Stalemate needs move generation and is left to the caller.
    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.is_insufficient_material() || self.is_repetition()
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;
        let prev_hash = self.hash;

        self.history.push(prev_hash);
        self.ply += 1;

        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            let dir = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + dir) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.set_piece(from, None);
        let landed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn => Piece::new(moved.color, kind),
            _ => moved,
        };
        self.set_piece(to, Some(landed));

        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            // e1->g1 rook h1->f1, e1->c1 rook a1->d1 (same on rank 8)
            let rook_squares = match (moved.color, from, to) {
                (Color::White, 4, 6) => Some((7, 5)),
                (Color::White, 4, 2) => Some((0, 3)),
                (Color::Black, 60, 62) => Some((63, 61)),
                (Color::Black, 60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        // A king move, a rook leaving its corner, or a capture on a corner
        // all remove the matching right.
        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                Color::Black => {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
            }
        }
        for corner in [from, to] {
            match corner {
                0 => self.castling.wq = false,
                7 => self.castling.wk = false,
                56 => self.castling.bq = false,
                63 => self.castling.bk = false,
                _ => {}
            }
        }

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        self.hash ^= ZOBRIST.side_key()
            ^ ZOBRIST.castling_key(&prev_castling)
            ^ ZOBRIST.castling_key(&self.castling);
        if let Some(ep) = prev_ep {
            self.hash ^= ZOBRIST.ep_key(ep % 8);
        }
        if let Some(ep) = self.en_passant {
            self.hash ^= ZOBRIST.ep_key(ep % 8);
        }

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
            hash: prev_hash,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // Promotions are undone by putting back the piece that moved.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }

        self.hash = undo.hash;
        self.history.pop();
        self.ply -= 1;
    }

    /// Pass the turn. Refused while the side to move is in check.
    pub fn make_null_move(&mut self) -> Option<NullUndo> {
        if self.in_check(self.side_to_move) {
            return None;
        }
        let undo = NullUndo {
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        };
        self.history.push(self.hash);
        self.ply += 1;
        if let Some(ep) = self.en_passant.take() {
            self.hash ^= ZOBRIST.ep_key(ep % 8);
        }
        self.halfmove_clock += 1;
        self.side_to_move = self.side_to_move.other();
        self.hash ^= ZOBRIST.side_key();
        Some(undo)
    }

    pub fn unmake_null_move(&mut self, undo: NullUndo) {
        self.side_to_move = self.side_to_move.other();
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash = undo.hash;
        self.history.pop();
        self.ply -= 1;
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;

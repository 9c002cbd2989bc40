//! The view of a position the search needs.
//!
//! Search, evaluation and move ordering are written against this trait so
//! they never depend on a concrete board.

use chess_core::{
    legal_captures_into, legal_moves_into, Bitboard, Color, Move, NullUndo, Piece, PieceKind,
    Position, Undo,
};

pub trait SearchPosition {
    type Undo;
    type NullUndo;

    /// Legal moves into `out`, or only legal captures when `captures_only`.
    fn generate_moves(&mut self, out: &mut Vec<Move>, captures_only: bool);

    /// `mv` must be legal in the current position.
    fn make_move(&mut self, mv: Move) -> Self::Undo;
    fn unmake_move(&mut self, mv: Move, undo: Self::Undo);

    /// Pass the turn. Returns `None`, leaving the position untouched, when
    /// the side to move is in check.
    fn make_null_move(&mut self) -> Option<Self::NullUndo>;
    fn unmake_null_move(&mut self, undo: Self::NullUndo);

    /// Is the side to move in check?
    fn in_check(&self) -> bool;
    /// Game-level draw rules; the search itself does not consult this.
    fn is_draw(&self) -> bool;

    fn hash(&self) -> u64;
    fn ply(&self) -> u32;
    fn side_to_move(&self) -> Color;
    fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard;
    fn piece_at(&self, sq: u8) -> Option<Piece>;
}

impl SearchPosition for Position {
    type Undo = Undo;
    type NullUndo = NullUndo;

    fn generate_moves(&mut self, out: &mut Vec<Move>, captures_only: bool) {
        if captures_only {
            legal_captures_into(self, out);
        } else {
            legal_moves_into(self, out);
        }
    }

    #[inline]
    fn make_move(&mut self, mv: Move) -> Undo {
        Position::make_move(self, mv)
    }

    #[inline]
    fn unmake_move(&mut self, mv: Move, undo: Undo) {
        Position::unmake_move(self, mv, undo)
    }

    #[inline]
    fn make_null_move(&mut self) -> Option<NullUndo> {
        Position::make_null_move(self)
    }

    #[inline]
    fn unmake_null_move(&mut self, undo: NullUndo) {
        Position::unmake_null_move(self, undo)
    }

    #[inline]
    fn in_check(&self) -> bool {
        Position::in_check(self, self.side_to_move)
    }

    fn is_draw(&self) -> bool {
        Position::is_draw(self)
    }

    #[inline]
    fn hash(&self) -> u64 {
        self.position_hash()
    }

    #[inline]
    fn ply(&self) -> u32 {
        Position::ply(self)
    }

    #[inline]
    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        Position::pieces(self, color, kind)
    }

    #[inline]
    fn piece_at(&self, sq: u8) -> Option<Piece> {
        Position::piece_at(self, sq)
    }
}

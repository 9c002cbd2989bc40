//! Board, move generation and clocks for the alpha-beta engine.
//!
//! Everything here is game mechanics. Search and evaluation live in the
//! engine crate and see a position only through its make/unmake and
//! move-generation calls plus the `Engine` trait below.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

/// What one turn's search reports back to whoever is driving the game.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// None only when the engine had nothing to offer, usually no legal move
    pub best_move: Option<Move>,
    /// Centipawns for the side to move
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    /// Nodes visited, summed over every iteration
    pub nodes: u64,
    /// The clock cut an iteration short
    pub stopped: bool,
}

/// A player an outer loop (UCI adapter, self-play) can drive.
pub trait Engine: Send {
    /// Pick a move for the side to move in `pos`.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "alphabeta developers"
    }

    /// Forget anything carried over from earlier turns.
    fn new_game(&mut self) {}

    /// Apply a UCI option. Returns false if the name is unknown or the
    /// value was rejected.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}

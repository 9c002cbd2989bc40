//! Engine-versus-engine games from a given start position.

use std::fmt;
use std::time::Duration;

use chess_core::{legal_moves, Color, Engine, Move, Position, SearchLimits};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Search depth per move
    pub depth: u8,
    /// Maximum time per move (None = depth only)
    pub time_per_move: Option<Duration>,
    /// Plies played before the game is called a draw
    pub max_moves: u32,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            depth: 6,
            time_per_move: Some(Duration::from_millis(500)),
            max_moves: 400,
        }
    }
}

impl SelfPlayConfig {
    /// Fresh limits for every move, so each turn gets its own clock.
    fn search_limits(&self) -> SearchLimits {
        match self.time_per_move {
            Some(time) => SearchLimits::depth_and_time(self.depth, time),
            None => SearchLimits::depth(self.depth),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    /// Fifty-move rule, repetition or insufficient material
    DrawRule,
    MoveCap,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::DrawRule => "draw by rule",
            Termination::MoveCap => "move cap reached",
        })
    }
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub result: GameResult,
    pub termination: Termination,
    pub moves: Vec<Move>,
}

/// How the game stands in `pos`, if it is over.
fn game_over(pos: &Position) -> Option<(GameResult, Termination)> {
    if legal_moves(pos).is_empty() {
        if pos.in_check(pos.side_to_move) {
            let result = match pos.side_to_move {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            };
            return Some((result, Termination::Checkmate));
        }
        return Some((GameResult::Draw, Termination::Stalemate));
    }
    if pos.is_draw() {
        return Some((GameResult::Draw, Termination::DrawRule));
    }
    None
}

/// Play one game from `start`; the result is from white's perspective.
pub fn play_game<'a>(
    white: &'a mut dyn Engine,
    black: &'a mut dyn Engine,
    start: Position,
    config: &SelfPlayConfig,
) -> GameRecord {
    let mut pos = start;
    let mut moves = Vec::new();
    white.new_game();
    black.new_game();

    while (moves.len() as u32) < config.max_moves {
        if let Some((result, termination)) = game_over(&pos) {
            info!(%result, %termination, plies = moves.len(), "game over");
            return GameRecord {
                result,
                termination,
                moves,
            };
        }

        let engine: &mut dyn Engine = match pos.side_to_move {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let found = engine.search(&pos, config.search_limits());
        debug!(
            ply = moves.len(),
            score = found.score,
            depth = found.depth,
            nodes = found.nodes,
            "move searched"
        );

        // The position is not over, so a legal move exists.
        let Some(mv) = found
            .best_move
            .or_else(|| legal_moves(&pos).first().copied())
        else {
            break;
        };
        pos.make_move(mv);
        moves.push(mv);
    }

    let (result, termination) =
        game_over(&pos).unwrap_or((GameResult::Draw, Termination::MoveCap));
    info!(%result, %termination, plies = moves.len(), "game over");
    GameRecord {
        result,
        termination,
        moves,
    }
}

#[cfg(test)]
#[path = "selfplay_tests.rs"]
mod selfplay_tests;

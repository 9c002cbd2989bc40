//! UCI command handling, one line at a time.

use std::io::{self, Write};
use std::time::Duration;

use alphabeta_engine::{is_mate_score, AlphaBetaEngine, SearchOutcome, TranspositionTable, MATE};
use chess_core::{legal_moves, move_to_uci, set_position_from_uci, Engine, Position, SearchLimits};
use tracing::{debug, warn};

/// Depth used by a bare `go` (or `go infinite`), which has no clock to stop it.
pub const DEFAULT_GO_DEPTH: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct UciSession {
    engine: AlphaBetaEngine,
    pos: Position,
}

impl UciSession {
    pub fn new(engine: AlphaBetaEngine) -> Self {
        Self {
            engine,
            pos: Position::startpos(),
        }
    }

    /// Handle one input line, writing any replies to `out`.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                let mb = TranspositionTable::mb_for_bits(self.engine.config().tt_bits);
                writeln!(out, "option name Hash type spin default {mb} min 1 max 4096")?;
                writeln!(
                    out,
                    "option name TimeDivisor type spin default {} min 1 max 1000",
                    self.engine.config().time_divisor
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => {
                self.engine.new_game();
                self.pos = Position::startpos();
            }
            "position" => {
                if let Err(e) = set_position_from_uci(&mut self.pos, args) {
                    warn!(error = %e, "ignoring bad position command");
                }
            }
            "setoption" => self.set_option(args),
            "go" => self.go(args, out)?,
            "quit" => return Ok(Flow::Quit),
            other => debug!(command = other, "ignoring unknown command"),
        }
        Ok(Flow::Continue)
    }

    /// `setoption name <name> value <value>`
    fn set_option(&mut self, args: &[&str]) {
        let name_at = args.iter().position(|&a| a == "name");
        let value_at = args.iter().position(|&a| a == "value");
        let (Some(name_at), Some(value_at)) = (name_at, value_at) else {
            warn!(?args, "setoption needs both name and value");
            return;
        };
        if value_at <= name_at {
            warn!(?args, "setoption value given before name");
            return;
        }

        let name = args[name_at + 1..value_at].join(" ");
        let value = args[value_at + 1..].join(" ");
        if !self.engine.set_option(&name, &value) {
            warn!(%name, %value, "option not applied");
        }
    }

    fn go(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let limits = parse_go(args, &self.pos);
        let outcome = self.engine.think(&self.pos, &limits);
        if outcome.depth > 0 {
            writeln!(out, "{}", info_line(&outcome))?;
        }

        // Without a finished iteration the engine may have nothing to offer;
        // any legal move beats forfeiting.
        let best = outcome
            .best_move
            .or_else(|| legal_moves(&self.pos).first().copied());
        match best {
            Some(mv) => writeln!(out, "bestmove {}", move_to_uci(mv)),
            None => writeln!(out, "bestmove 0000"),
        }
    }
}

/// Limits from `go` arguments. `movetime` wins over the mover's clock.
pub fn parse_go(args: &[&str], pos: &Position) -> SearchLimits {
    let mut depth = None;
    let mut move_time = None;
    let mut wtime = None;
    let mut btime = None;

    let mut iter = args.iter();
    while let Some(&key) = iter.next() {
        let mut number = || iter.next().and_then(|v| v.parse::<u64>().ok());
        match key {
            "depth" => depth = number().map(|d| d.min(u8::MAX as u64) as u8),
            "movetime" => move_time = number().map(Duration::from_millis),
            "wtime" => wtime = number().map(Duration::from_millis),
            "btime" => btime = number().map(Duration::from_millis),
            _ => {}
        }
    }

    let remaining = match pos.side_to_move {
        chess_core::Color::White => wtime,
        chess_core::Color::Black => btime,
    };
    let timed = move_time.is_some() || remaining.is_some();
    SearchLimits {
        depth: depth.unwrap_or(if timed { u8::MAX } else { DEFAULT_GO_DEPTH }),
        move_time,
        remaining,
    }
}

fn info_line(outcome: &SearchOutcome) -> String {
    let score = if is_mate_score(outcome.score) {
        let plies = MATE - outcome.score.abs();
        let moves = (plies + 1) / 2;
        format!("mate {}", if outcome.score > 0 { moves } else { -moves })
    } else {
        format!("cp {}", outcome.score)
    };

    let millis = outcome.elapsed.as_millis() as u64;
    let nps = if millis > 0 {
        outcome.nodes * 1000 / millis
    } else {
        0
    };
    let pv: Vec<String> = outcome.pv.iter().map(|&m| move_to_uci(m)).collect();
    format!(
        "info depth {} score {} nodes {} nps {} time {} pv {}",
        outcome.depth,
        score,
        outcome.nodes,
        nps,
        millis,
        pv.join(" ")
    )
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;

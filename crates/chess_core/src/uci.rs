use thiserror::Error;

use crate::{
    board::{FenError, Position},
    movegen::legal_moves,
    types::*,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionCommandError {
    #[error("expected `startpos` or `fen <fen>`")]
    MissingSetup,
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("illegal or malformed move `{0}`")]
    IllegalMove(String),
}

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.fen_char());
    }
    s
}

/// Resolve coordinate notation against the legal moves so castle and en
/// passant flags come out right.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.chars().nth(4) {
        Some(c) => Some(PieceKind::from_fen_char(c)?),
        None => None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}

/// Apply the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
///
/// On error `pos` is left unchanged.
pub fn set_position_from_uci(pos: &mut Position, args: &[&str]) -> Result<(), PositionCommandError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let mut next = match args.first() {
        Some(&"startpos") => Position::startpos(),
        Some(&"fen") => Position::from_fen(&args[1..moves_at].join(" "))?,
        _ => return Err(PositionCommandError::MissingSetup),
    };

    for txt in args.iter().skip(moves_at + 1) {
        let mv = parse_uci_move(&next, txt)
            .ok_or_else(|| PositionCommandError::IllegalMove(txt.to_string()))?;
        next.make_move(mv);
    }
    *pos = next;
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;

use super::*;
use crate::config::EngineConfig;
use crate::search::MATE;
use crate::tt::TranspositionTable;
use chess_core::{legal_moves, Position, TimeControl};

fn run(fen: &str, max_depth: i32, clock: TimeControl) -> SearchOutcome {
    let mut pos = Position::from_fen(fen).unwrap();
    let mut tt = TranspositionTable::new(16);
    let config = EngineConfig::default();
    let mut searcher = Searcher::new(&mut pos, &mut tt, &config, clock);
    searcher.iterate(max_depth)
}

#[test]
fn test_depth_one_from_startpos() {
    let outcome = run(chess_core::STARTPOS_FEN, 1, TimeControl::infinite());
    let mv = outcome.best_move.expect("a move");
    assert!(legal_moves(&Position::startpos()).contains(&mv));
    assert_eq!(outcome.depth, 1);
    assert!(outcome.score.abs() < 300, "score {}", outcome.score);
    assert!(!outcome.stopped);
    assert_eq!(outcome.pv, vec![mv]);
}

#[test]
fn test_pv_starts_with_best_move() {
    let outcome = run(
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        4,
        TimeControl::infinite(),
    );
    assert_eq!(outcome.depth, 4);
    assert!(!outcome.pv.is_empty());
    assert!(outcome.pv.len() <= 4);
    assert_eq!(Some(outcome.pv[0]), outcome.best_move);
}

#[test]
fn test_no_legal_moves_stops_after_first_iteration() {
    let outcome = run(
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        10,
        TimeControl::infinite(),
    );
    assert_eq!(outcome.best_move, None);
    assert_eq!(outcome.score, -MATE);
    assert_eq!(outcome.depth, 1);
}

#[test]
fn test_zero_budget_returns_no_move() {
    let outcome = run(
        chess_core::STARTPOS_FEN,
        10,
        TimeControl::from_clock(std::time::Duration::ZERO, 30),
    );
    assert!(outcome.stopped);
    assert_eq!(outcome.depth, 0);
    assert_eq!(outcome.best_move, None);
}

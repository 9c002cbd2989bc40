use super::*;
use chess_core::legal_moves;
use std::time::{Duration, Instant};

fn small_engine() -> AlphaBetaEngine {
    AlphaBetaEngine::with_config(EngineConfig {
        tt_bits: 14,
        ..EngineConfig::default()
    })
}

#[test]
fn test_search_start_position() {
    let mut engine = small_engine();
    let pos = Position::startpos();
    let result = engine.search(&pos, SearchLimits::depth(3));
    let mv = result.best_move.expect("a move");
    assert!(legal_moves(&pos).contains(&mv));
    assert_eq!(result.depth, 3);
    assert!(result.nodes > 0);
    assert!(!result.stopped);
}

#[test]
fn test_timed_search_stops_early() {
    let mut engine = small_engine();
    let pos = Position::startpos();
    let start = Instant::now();
    let result = engine.search(&pos, SearchLimits::time(Duration::from_millis(50)));
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(result.stopped);
    assert!(result.depth >= 1);
    assert!(legal_moves(&pos).contains(&result.best_move.unwrap()));
}

#[test]
fn test_clock_limits_use_time_divisor() {
    let mut engine = small_engine();
    assert!(engine.set_option("TimeDivisor", "1000"));
    let pos = Position::startpos();
    let start = Instant::now();
    // 20s / 1000 = 20ms for this move
    let result = engine.search(&pos, SearchLimits::clock(Duration::from_secs(20)));
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(result.stopped);
}

#[test]
fn test_set_option() {
    let mut engine = small_engine();
    assert!(engine.set_option("Hash", "1"));
    assert_eq!(
        engine.config().tt_bits,
        TranspositionTable::bits_for_mb(1).max(10)
    );
    assert!(!engine.set_option("Hash", "lots"));
    assert!(!engine.set_option("TimeDivisor", "0"));
    assert!(engine.set_option("TimeDivisor", "45"));
    assert_eq!(engine.config().time_divisor, 45);
    assert!(!engine.set_option("Ponder", "true"));
}

#[test]
fn test_table_survives_turns_until_new_game() {
    let mut engine = small_engine();
    let pos = Position::startpos();
    engine.search(&pos, SearchLimits::depth(2));
    assert!(engine.tt.probe(pos.position_hash()).is_some());

    engine.new_game();
    assert!(engine.tt.probe(pos.position_hash()).is_none());
}

//! Behavioural checks of the whole engine against a plain minimax search.

use alphabeta_engine::{evaluate, AlphaBetaEngine, EngineConfig, INFINITY, MATE};
use chess_core::{
    legal_captures_into, legal_moves, move_to_uci, Engine, Position, SearchLimits,
};

/// Pruning that changes results (null move, reverse futility) switched off.
fn exact_config() -> EngineConfig {
    EngineConfig {
        tt_bits: 16,
        null_move_min_depth: 99,
        futility_max_depth: 0,
        max_qsearch_depth: 6,
        ..EngineConfig::default()
    }
}

fn reference_quiesce(pos: &mut Position, depth: i32, cap: i32) -> i32 {
    let stand_pat = evaluate(&*pos);
    if -depth >= cap {
        return stand_pat;
    }
    let mut captures = Vec::new();
    legal_captures_into(pos, &mut captures);
    let mut best = stand_pat;
    for mv in captures {
        let undo = pos.make_move(mv);
        best = best.max(-reference_quiesce(pos, depth - 1, cap));
        pos.unmake_move(mv, undo);
    }
    best
}

/// Full-width negamax, no pruning and no table.
fn reference(pos: &mut Position, depth: i32, ply: i32, cap: i32) -> i32 {
    if depth <= 0 {
        return reference_quiesce(pos, depth, cap);
    }
    let moves = legal_moves(pos);
    if moves.is_empty() {
        return if pos.in_check(pos.side_to_move) {
            -MATE + ply
        } else {
            0
        };
    }
    let mut best = -INFINITY;
    for mv in moves {
        let undo = pos.make_move(mv);
        best = best.max(-reference(pos, depth - 1, ply + 1, cap));
        pos.unmake_move(mv, undo);
    }
    best
}

const POSITIONS: &[&str] = &[
    "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1",
    "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "4k3/8/3p4/2n1b3/3P4/2N5/8/4K3 w - - 0 1",
    "r3k3/1p6/8/8/8/8/6P1/4K2R b Kq - 0 1",
];

#[test]
fn alpha_beta_matches_full_width_minimax() {
    let config = exact_config();
    for fen in POSITIONS {
        for depth in 1..=3 {
            let mut engine = AlphaBetaEngine::with_config(config.clone());
            let pos = Position::from_fen(fen).unwrap();
            let result = engine.search(&pos, SearchLimits::depth(depth as u8));

            let mut scratch = pos.clone();
            let expected = reference(&mut scratch, depth, 0, config.max_qsearch_depth);
            assert_eq!(
                result.score, expected,
                "score mismatch at depth {depth} for {fen}"
            );
        }
    }
}

#[test]
fn mate_in_one_is_found_with_full_pruning() {
    let mut engine = AlphaBetaEngine::new();
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let result = engine.search(&pos, SearchLimits::depth(4));

    assert_eq!(result.score, MATE - 1);
    let mv = result.best_move.unwrap();
    let mut after = pos.clone();
    after.make_move(mv);
    assert!(legal_moves(&after).is_empty());
    assert!(after.in_check(after.side_to_move));
}

#[test]
fn stalemated_root_scores_zero_with_no_move() {
    let mut engine = AlphaBetaEngine::new();
    let pos = Position::from_fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let result = engine.search(&pos, SearchLimits::depth(5));
    assert_eq!(result.score, 0);
    assert_eq!(result.best_move, None);
}

#[test]
fn avoids_stalemating_when_winning() {
    // Qb6 would stalemate; any sensible engine keeps the win.
    let mut engine = AlphaBetaEngine::new();
    let pos = Position::from_fen("k7/2K5/8/1Q6/8/8/8/8 w - - 0 1").unwrap();
    let result = engine.search(&pos, SearchLimits::depth(4));
    let mv = result.best_move.unwrap();
    assert_ne!(move_to_uci(mv), "b5b6");
    assert!(result.score > 500);
}

#[test]
fn deeper_iteration_never_picks_a_worse_move() {
    let config = exact_config();
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let pos = Position::from_fen(fen).unwrap();
    let depth = 2u8;

    let shallow = AlphaBetaEngine::with_config(config.clone())
        .search(&pos, SearchLimits::depth(depth))
        .best_move
        .unwrap();
    let deep = AlphaBetaEngine::with_config(config.clone())
        .search(&pos, SearchLimits::depth(depth + 1))
        .best_move
        .unwrap();

    // Judge both moves the way the deeper search did: the reply searched
    // `depth` plies, seen from the mover's side.
    let judge = |mv| {
        let mut child = pos.clone();
        child.make_move(mv);
        -AlphaBetaEngine::with_config(config.clone())
            .search(&child, SearchLimits::depth(depth))
            .score
    };
    assert!(
        judge(deep) >= judge(shallow),
        "{} judged worse than {}",
        move_to_uci(deep),
        move_to_uci(shallow)
    );
}

#[test]
fn start_position_depth_one() {
    let mut engine = AlphaBetaEngine::new();
    let pos = Position::startpos();
    let result = engine.search(&pos, SearchLimits::depth(1));
    let mv = result.best_move.unwrap();
    assert!(!mv.is_null());
    assert!(legal_moves(&pos).contains(&mv));
    assert!(result.score.abs() < 1_000);
}

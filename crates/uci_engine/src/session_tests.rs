use super::*;

fn run(session: &mut UciSession, line: &str) -> (Flow, String) {
    let mut out = Vec::new();
    let flow = session.handle_line(line, &mut out).unwrap();
    (flow, String::from_utf8(out).unwrap())
}

fn session() -> UciSession {
    UciSession::new(AlphaBetaEngine::new())
}

#[test]
fn test_handshake() {
    let mut s = session();
    let (flow, out) = run(&mut s, "uci");
    assert_eq!(flow, Flow::Continue);
    assert!(out.starts_with("id name AlphaBeta"));
    assert!(out.contains("option name Hash type spin"));
    assert!(out.contains("option name TimeDivisor type spin default 30"));
    assert!(out.trim_end().ends_with("uciok"));

    let (_, out) = run(&mut s, "isready");
    assert_eq!(out, "readyok\n");
}

#[test]
fn test_quit_and_blank_lines() {
    let mut s = session();
    assert_eq!(run(&mut s, "   ").0, Flow::Continue);
    assert_eq!(run(&mut s, "foo bar").0, Flow::Continue);
    assert_eq!(run(&mut s, "quit").0, Flow::Quit);
}

#[test]
fn test_position_with_moves() {
    let mut s = session();
    run(&mut s, "position startpos moves e2e4 e7e5");
    assert_eq!(
        s.pos.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
    );
}

#[test]
fn test_bad_position_keeps_previous() {
    let mut s = session();
    run(&mut s, "position startpos moves e2e4");
    let before = s.pos.to_fen();
    run(&mut s, "position startpos moves e2e5");
    assert_eq!(s.pos.to_fen(), before);
}

#[test]
fn test_go_depth_finds_mate() {
    let mut s = session();
    run(&mut s, "position fen 6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    let (_, out) = run(&mut s, "go depth 3");
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("info depth 3 score mate 1 "));
    assert_eq!(lines[1], "bestmove e1e8");
}

#[test]
fn test_go_without_moves() {
    let mut s = session();
    run(&mut s, "position fen 6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    let (_, out) = run(&mut s, "go depth 4");
    assert!(out.trim_end().ends_with("bestmove 0000"));
}

#[test]
fn test_setoption() {
    let mut s = session();
    run(&mut s, "setoption name TimeDivisor value 10");
    assert_eq!(s.engine.config().time_divisor, 10);
    run(&mut s, "setoption name TimeDivisor value 0");
    assert_eq!(s.engine.config().time_divisor, 10);
}

#[test]
fn test_parse_go_picks_the_movers_clock() {
    let pos = Position::startpos();
    let limits = parse_go(&["wtime", "60000", "btime", "1000"], &pos);
    assert_eq!(limits.remaining, Some(Duration::from_secs(60)));
    assert_eq!(limits.move_time, None);
    assert_eq!(limits.depth, u8::MAX);

    let mut black = pos.clone();
    set_position_from_uci(&mut black, &["startpos", "moves", "e2e4"]).unwrap();
    let limits = parse_go(&["wtime", "60000", "btime", "1000"], &black);
    assert_eq!(limits.remaining, Some(Duration::from_secs(1)));
}

#[test]
fn test_parse_go_depth_and_movetime() {
    let pos = Position::startpos();
    let limits = parse_go(&["depth", "5"], &pos);
    assert_eq!(limits.depth, 5);
    assert_eq!(limits.move_time, None);

    let limits = parse_go(&["movetime", "250"], &pos);
    assert_eq!(limits.move_time, Some(Duration::from_millis(250)));
    assert_eq!(limits.depth, u8::MAX);

    assert_eq!(parse_go(&[], &pos).depth, DEFAULT_GO_DEPTH);
}

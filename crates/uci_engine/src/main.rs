//! UCI engine binary.
//!
//! `uci_engine [--config <file>]` speaks UCI on stdin/stdout.
//! `uci_engine selfplay [--depth D] [--movetime MS] [--max-moves N] [--config <file>]`
//! plays the engine against itself from the start position.

mod selfplay;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use alphabeta_engine::{AlphaBetaEngine, EngineConfig};
use anyhow::{bail, Context, Result};
use chess_core::{move_to_uci, Position};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::selfplay::{play_game, SelfPlayConfig};
use crate::session::{Flow, UciSession};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  uci_engine [--config <file>]");
    eprintln!("  uci_engine selfplay [--depth D] [--movetime MS] [--max-moves N] [--config <file>]");
}

/// Logs go to stderr; stdout belongs to the protocol.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

struct Args {
    selfplay: bool,
    config: Option<PathBuf>,
    game: SelfPlayConfig,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args {
        selfplay: false,
        config: None,
        game: SelfPlayConfig::default(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{flag} needs a value"))
        };
        match arg.as_str() {
            "selfplay" => parsed.selfplay = true,
            "--config" | "-c" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--depth" | "-d" => {
                let v = value("--depth")?;
                parsed.game.depth = v.parse().with_context(|| format!("invalid depth '{v}'"))?;
            }
            "--movetime" => {
                let v = value("--movetime")?;
                let ms: u64 = v.parse().with_context(|| format!("invalid movetime '{v}'"))?;
                parsed.game.time_per_move = Some(Duration::from_millis(ms));
            }
            "--max-moves" => {
                let v = value("--max-moves")?;
                parsed.game.max_moves =
                    v.parse().with_context(|| format!("invalid max-moves '{v}'"))?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(parsed)
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load engine config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn run_uci(config: EngineConfig) -> Result<()> {
    let mut session = UciSession::new(AlphaBetaEngine::with_config(config));
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let flow = session
            .handle_line(&line, &mut stdout)
            .context("failed to write to stdout")?;
        stdout.flush().context("failed to flush stdout")?;
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn run_selfplay(config: EngineConfig, game: &SelfPlayConfig) {
    let mut white = AlphaBetaEngine::with_config(config.clone());
    let mut black = AlphaBetaEngine::with_config(config);

    info!(depth = game.depth, max_moves = game.max_moves, "starting self-play game");
    let record = play_game(&mut white, &mut black, Position::startpos(), game);

    let moves: Vec<String> = record.moves.iter().map(|&m| move_to_uci(m)).collect();
    println!("{}", moves.join(" "));
    println!("{} ({})", record.result, record.termination);
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            print_usage();
            return Err(e);
        }
    };

    let config = load_config(args.config.as_ref())?;
    if args.selfplay {
        run_selfplay(config, &args.game);
        Ok(())
    } else {
        run_uci(config)
    }
}

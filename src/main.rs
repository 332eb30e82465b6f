use anyhow::{Context, Result, bail};
use sable_core::Board;
use sable_engine::Engine;
use tracing::info;

/// Command line: `sable [--depth N] [FEN]`. The FEN may be given unquoted;
/// everything that is not a flag is joined back together.
struct Args {
    depth: i32,
    fen: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut depth = Engine::DEFAULT_DEPTH;
    let mut fen_parts: Vec<String> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--depth" | "-d" => {
                let value = args.next().context("--depth requires a value")?;
                depth = value
                    .parse()
                    .with_context(|| format!("invalid depth: {value}"))?;
                if depth < 1 {
                    bail!("depth must be at least 1");
                }
            }
            "--help" | "-h" => {
                println!("usage: sable [--depth N] [FEN]");
                std::process::exit(0);
            }
            _ => fen_parts.push(arg),
        }
    }

    let fen = if fen_parts.is_empty() {
        None
    } else {
        Some(fen_parts.join(" "))
    };
    Ok(Args { depth, fen })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = parse_args()?;
    let board = match &args.fen {
        Some(fen) => fen
            .parse::<Board>()
            .with_context(|| format!("invalid FEN: {fen}"))?,
        None => Board::starting_position(),
    };

    info!(position = %board, depth = args.depth, "searching");
    println!("{}", board.pretty());

    let mut engine = Engine::new(board, args.depth);
    let best = engine.best_move();
    if best.is_null() {
        if board.is_checkmate() {
            bail!("no legal moves: the side to move is checkmated");
        }
        bail!("no legal moves: stalemate");
    }

    println!("bestmove {best}");
    Ok(())
}

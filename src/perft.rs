use std::env;

use anyhow::{bail, Context};
use shogi_engine::utils::{perft, perft_divide, PerftResult};
use shogi_engine::{Board, Side};

/// Usage: `perft <layout|startpos> <sente|gote> <depth> [expected]`
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        bail!("usage: {} <layout|startpos> <sente|gote> <depth> [expected]", args[0]);
    }
    let board: Board = if args[1] == "startpos" {
        Board::initial()
    } else {
        args[1].parse().context("failed to parse board layout")?
    };
    let side: Side = args[2].parse().context("failed to parse side")?;
    let depth: usize = args[3].parse().context("depth must be a number")?;

    println!("{board}");
    let mut total = PerftResult::default();
    for (_move, result) in perft_divide(&board, side, depth) {
        println!(" {_move} : {result}");
        total += result;
    }
    println!("+ total: {total}");
    if depth > 0 {
        debug_assert_eq!(total.all, perft(&board, side, depth).all);
    }

    if let Some(expected) = args.get(4) {
        let expected: usize = expected.parse().context("expected must be a number")?;
        if total.all != expected {
            bail!("found {} moves, expected {expected}", total.all);
        }
    }
    Ok(())
}

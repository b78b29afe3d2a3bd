use std::env;

use anyhow::Context;
use log::info;
use shogi_engine::{Difficulty, Game, Side, Status};

/** Hard stop for matches that shuffle pieces forever. */
const DEFAULT_MAX_PLIES: usize = 200;

/// Usage: `selfplay [sente difficulty] [gote difficulty] [max plies]`
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let sente: Difficulty = match args.get(1) {
        Some(level) => level.parse().context("failed to parse sente difficulty")?,
        None => Difficulty::Medium,
    };
    let gote: Difficulty = match args.get(2) {
        Some(level) => level.parse().context("failed to parse gote difficulty")?,
        None => Difficulty::Easy,
    };
    let max_plies: usize = match args.get(3) {
        Some(plies) => plies.parse().context("max plies must be a number")?,
        None => DEFAULT_MAX_PLIES,
    };
    info!("Self-play: sente {sente} vs gote {gote}, at most {max_plies} plies");

    let mut game = Game::default();
    while !game.is_finished() && game.history().len() < max_plies {
        let difficulty = match game.side_to_move() {
            Side::Sente => sente,
            Side::Gote => gote,
        };
        game.play_ai(difficulty)
            .with_context(|| format!("ply {} failed", game.history().len() + 1))?;
        if let Some(last) = game.history().last() {
            println!("{:>3}. {last}", game.history().len());
        }
    }

    println!("{}", game.board());
    let state = game.state();
    match (state.status, state.winner) {
        (Status::Checkmate, Some(winner)) => println!("Checkmate, {winner} wins"),
        (Status::Stalemate, _) => println!("Stalemate"),
        _ => println!("No result after {} plies", game.history().len()),
    }
    Ok(())
}

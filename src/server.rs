use std::convert::Infallible;

use warp::{reply::Reply, Filter};

pub mod definitions;
pub mod handlers;

use definitions::{ServerConfig, SharedEngine};
use handlers::*;

/** Body size cap, a board is well under 1 KiB. */
const MAX_BODY: u64 = 64 * 1024;

pub fn routes(
    engine: SharedEngine,
    config: &ServerConfig,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health = warp::path!("health")
        .and(warp::get())
        .and_then(health_handler);

    let new_game = warp::path!("api" / "new-game")
        .and(warp::get())
        .and(with(engine.clone()))
        .and_then(new_game_handler);

    let validate_move = warp::path!("api" / "validate-move")
        .and(warp::post())
        .and(json_body())
        .and(with(engine.clone()))
        .and_then(validate_move_handler);

    let valid_moves = warp::path!("api" / "valid-moves")
        .and(warp::post())
        .and(json_body())
        .and(with(engine.clone()))
        .and_then(valid_moves_handler);

    let game_state = warp::path!("api" / "game-state")
        .and(warp::post())
        .and(json_body())
        .and(with(engine.clone()))
        .and_then(game_state_handler);

    let ai_move = warp::path!("api" / "ai-move")
        .and(warp::post())
        .and(json_body())
        .and(with(engine.clone()))
        .and(with(config.default_difficulty))
        .and_then(ai_move_handler);

    let convert_notation = warp::path!("api" / "convert-notation")
        .and(warp::post())
        .and(json_body())
        .and(with(engine))
        .and_then(convert_notation_handler);

    health
        .or(new_game)
        .or(validate_move)
        .or(valid_moves)
        .or(game_state)
        .or(ai_move)
        .or(convert_notation)
        .recover(handle_rejection)
        .with(warp::log("shogi_engine::server"))
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY).and(warp::body::json())
}

fn with<T>(value: T) -> impl Filter<Extract = (T,), Error = Infallible> + Clone
where
    T: Clone + std::marker::Send,
{
    warp::any().map(move || value.clone())
}

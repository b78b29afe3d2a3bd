use std::convert::Infallible;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::reply::{Json, WithStatus};

use crate::server::definitions::*;
use crate::{Difficulty, Position, Side};

pub type JsonReply = WithStatus<Json>;

fn json_reply<T: Serialize>(value: &T, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(value), status)
}

fn error_reply(message: impl ToString, status: StatusCode) -> JsonReply {
    json_reply(
        &ErrorResponse {
            error: message.to_string(),
        },
        status,
    )
}

pub async fn health_handler() -> Result<JsonReply, Rejection> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    Ok(json_reply(
        &HealthResponse {
            status: "OK".to_string(),
            service: "shogi-engine".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp,
        },
        StatusCode::OK,
    ))
}

pub async fn new_game_handler(engine: SharedEngine) -> Result<JsonReply, Rejection> {
    Ok(json_reply(
        &NewGameResponse {
            board: engine.initial_board(),
            current_player: Side::Sente,
        },
        StatusCode::OK,
    ))
}

pub async fn validate_move_handler(
    request: ValidateMoveRequest,
    engine: SharedEngine,
) -> Result<JsonReply, Rejection> {
    let side = request.current_player;
    let result = engine.apply_move(&request.board, &request._move, side);
    let response = match result {
        Ok(outcome) => ValidateMoveResponse {
            valid: true,
            result: Some(outcome),
            message: "Valid move".to_string(),
        },
        Err(err) => {
            debg!("Rejected {} for {}: {}", request._move, side, err);
            ValidateMoveResponse {
                valid: false,
                result: None,
                message: "Invalid move".to_string(),
            }
        }
    };
    Ok(json_reply(&response, StatusCode::OK))
}

pub async fn valid_moves_handler(
    request: ValidMovesRequest,
    engine: SharedEngine,
) -> Result<JsonReply, Rejection> {
    let position: Position = match request.position.parse() {
        Ok(position) => position,
        Err(err) => return Ok(error_reply(err, StatusCode::BAD_REQUEST)),
    };
    let valid_moves = engine.legal_moves_from(&request.board, position, request.current_player);
    Ok(json_reply(
        &ValidMovesResponse {
            position: request.position,
            count: valid_moves.len(),
            valid_moves,
        },
        StatusCode::OK,
    ))
}

pub async fn game_state_handler(
    request: GameStateRequest,
    engine: SharedEngine,
) -> Result<JsonReply, Rejection> {
    let state = engine.check_state(&request.board, request.current_player);
    Ok(json_reply(&state, StatusCode::OK))
}

/// Search runs on the blocking pool, it can take seconds at expert level.
pub async fn ai_move_handler(
    request: AiMoveRequest,
    engine: SharedEngine,
    default_difficulty: Difficulty,
) -> Result<JsonReply, Rejection> {
    let difficulty = request.difficulty.unwrap_or(default_difficulty);
    let side = request.current_player;
    let board = request.board;
    let search =
        tokio::task::spawn_blocking(move || engine.best_move(&board, side, difficulty)).await;
    Ok(match search {
        Ok(Some(_move)) => json_reply(&AiMoveResponse { _move, difficulty }, StatusCode::OK),
        Ok(None) => error_reply("No valid AI move found", StatusCode::NOT_FOUND),
        Err(join_err) => {
            err!("AI search for {} failed: {}", side, join_err);
            error_reply("Failed to get AI move", StatusCode::INTERNAL_SERVER_ERROR)
        }
    })
}

pub async fn convert_notation_handler(
    request: ConvertNotationRequest,
    engine: SharedEngine,
) -> Result<JsonReply, Rejection> {
    let converted =
        engine.convert_notation(&request._move, &request.from_format, &request.to_format);
    Ok(json_reply(
        &ConvertNotationResponse {
            original: request._move,
            converted,
            from_format: request.from_format,
            to_format: request.to_format,
        },
        StatusCode::OK,
    ))
}

pub async fn handle_rejection(rejection: Rejection) -> Result<JsonReply, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(body_err) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, body_err.to_string())
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_string())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        wrn!("Unhandled rejection: {:?}", rejection);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
    };
    Ok(error_reply(message, status))
}

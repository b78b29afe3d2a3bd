use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Board, Difficulty, Engine, Move, MoveOutcome, Side};

#[allow(unused_imports)]
pub use log::{debug as debg, error as err, info as inf, trace as trc, warn as wrn};

pub type SharedEngine = Arc<Engine>;

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub default_difficulty: Difficulty,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8002),
            default_difficulty: Difficulty::Medium,
        }
    }
}

impl ServerConfig {
    /// `SHOGI_HOST` and `PORT` override the defaults, unparsable values are
    /// reported and ignored.
    pub fn from_env() -> Self {
        let mut config = ServerConfig::default();
        if let Ok(host) = std::env::var("SHOGI_HOST") {
            match host.parse() {
                Ok(ip) => config.address.set_ip(ip),
                Err(_) => wrn!("Ignoring unparsable SHOGI_HOST '{host}'"),
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => config.address.set_port(port),
                Err(_) => wrn!("Ignoring unparsable PORT '{port}'"),
            }
        }
        config
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateMoveRequest {
    pub board: Board,
    #[serde(rename = "move")]
    pub _move: Move,
    pub current_player: Side,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateMoveResponse {
    pub valid: bool,
    pub result: Option<MoveOutcome>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMovesRequest {
    pub board: Board,
    pub position: String,
    pub current_player: Side,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMovesResponse {
    pub position: String,
    pub valid_moves: Vec<Move>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateRequest {
    pub board: Board,
    pub current_player: Side,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMoveRequest {
    pub board: Board,
    pub current_player: Side,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AiMoveResponse {
    #[serde(rename = "move")]
    pub _move: Move,
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertNotationRequest {
    #[serde(rename = "move")]
    pub _move: String,
    pub from_format: String,
    pub to_format: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertNotationResponse {
    pub original: String,
    pub converted: String,
    pub from_format: String,
    pub to_format: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameResponse {
    pub board: Board,
    pub current_player: Side,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

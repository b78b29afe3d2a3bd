pub mod core;
#[cfg(feature = "network")]
pub mod server;
pub mod utils;

// module re-exports
pub use crate::core::algorithms::{AiConfig, AiPlayer};
pub use crate::core::board::Board;
pub use crate::core::definitions::{
    Difficulty, EngineError, GameState, Move, Piece, PieceKind, Position, Side, Status,
};
pub use crate::core::game::{Engine, Game, MoveOutcome};
pub use crate::core::notation::{NotationConverter, NotationFormat};
pub use crate::core::state::GameStateChecker;
pub use crate::core::validator::MoveValidator;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::algorithms::{AiConfig, AiPlayer};
use crate::core::board::Board;
use crate::core::definitions::{
    Difficulty, EngineError, GameState, Move, Piece, Position, Result, Side,
};
use crate::core::notation::NotationConverter;
use crate::core::state::GameStateChecker;
use crate::core::validator::MoveValidator;

/// Result of applying a move, the caller's board is not touched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub board: Board,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<Piece>,
    pub promoted: bool,
}

/// Entry points exposed to the service layer. Every call is a pure function
/// of its arguments, so one `Engine` can serve any number of matches.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    validator: MoveValidator,
    checker: GameStateChecker,
    ai: AiPlayer,
    notation: NotationConverter,
}

impl Engine {
    pub fn new(config: AiConfig) -> Self {
        Engine {
            ai: AiPlayer::new(config),
            ..Default::default()
        }
    }

    pub fn ai(&self) -> &AiPlayer {
        &self.ai
    }

    pub fn initial_board(&self) -> Board {
        Board::initial()
    }

    pub fn is_legal(&self, board: &Board, _move: &Move, side: Side) -> bool {
        self.validator.is_legal(board, _move, side)
    }

    pub fn apply_move(&self, board: &Board, _move: &Move, side: Side) -> Result<MoveOutcome> {
        if let Some(rejection) = self.validator.rejection(board, _move, side) {
            return Err(rejection.into());
        }
        let mut next = board.clone();
        let before = next.piece_at(_move.from);
        let captured = next.move_piece(_move)?;
        let promoted = before
            .zip(next.piece_at(_move.to))
            .map(|(before, after)| !before.promoted && after.promoted)
            .unwrap_or(false);
        debug!("{side} applied {_move}");
        Ok(MoveOutcome {
            board: next,
            captured,
            promoted,
        })
    }

    pub fn legal_moves_from(&self, board: &Board, pos: Position, side: Side) -> Vec<Move> {
        self.validator.legal_moves_from(board, pos, side)
    }

    pub fn check_state(&self, board: &Board, side: Side) -> GameState {
        self.checker.check(board, side)
    }

    /// May take a while at [`Difficulty::Expert`], there is no time budget.
    pub fn best_move(&self, board: &Board, side: Side, difficulty: Difficulty) -> Option<Move> {
        self.ai.best_move(board, side, difficulty)
    }

    pub fn try_best_move(&self, board: &Board, side: Side, difficulty: Difficulty) -> Result<Move> {
        self.best_move(board, side, difficulty)
            .ok_or(EngineError::NoLegalMove(side))
    }

    pub fn convert_notation(&self, _move: &str, from: &str, to: &str) -> String {
        self.notation.convert(_move, from, to)
    }
}

/// One match: the board, whose turn it is and what has been played.
#[derive(Debug, Clone)]
pub struct Game {
    engine: Engine,
    board: Board,
    side_to_move: Side,
    history: Vec<Move>,
    state: GameState,
}

impl Game {
    pub fn new(engine: Engine) -> Game {
        Game::with_board(engine, Board::initial(), Side::Sente)
    }

    pub fn with_board(engine: Engine, board: Board, side_to_move: Side) -> Game {
        let state = engine.check_state(&board, side_to_move);
        Game {
            engine,
            board,
            side_to_move,
            history: Vec::new(),
            state,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_over()
    }

    /// Play a move for the side to move. Moves that leave the mover's King
    /// attacked are refused here even though the engine alone accepts them.
    pub fn play(&mut self, _move: Move) -> Result<GameState> {
        if self.is_finished() {
            return Err(EngineError::InvalidMove("the game is over".to_string()));
        }
        let side = self.side_to_move;
        let outcome = self.engine.apply_move(&self.board, &_move, side)?;
        if self.engine.checker.in_check(&outcome.board, side) {
            return Err(EngineError::InvalidMove(format!(
                "{_move} leaves the {side} king in check"
            )));
        }
        let mut record = _move;
        record.piece = self.board.piece_at(_move.from);
        record.captured = outcome.captured;
        record.promoted = outcome.promoted;
        self.history.push(record);
        self.board = outcome.board;
        self.side_to_move = side.opposite();
        self.state = self.engine.check_state(&self.board, self.side_to_move);
        Ok(self.state)
    }

    pub fn play_ai(&mut self, difficulty: Difficulty) -> Result<GameState> {
        let _move = self
            .engine
            .try_best_move(&self.board, self.side_to_move, difficulty)?;
        self.play(_move)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Engine::default())
    }
}

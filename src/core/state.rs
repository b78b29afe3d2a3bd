use crate::core::board::Board;
use crate::core::definitions::{GameState, Move, Side, Status};
use crate::core::validator::MoveValidator;

/// Check, checkmate and stalemate detection on top of [`MoveValidator`].
///
/// Trial moves are played on a copy of the board, the board handed in is
/// never mutated.
#[derive(Clone, Copy, Debug, Default)]
pub struct GameStateChecker {
    validator: MoveValidator,
}

impl GameStateChecker {
    pub fn new(validator: MoveValidator) -> Self {
        GameStateChecker { validator }
    }

    pub fn validator(&self) -> &MoveValidator {
        &self.validator
    }

    pub fn check(&self, board: &Board, side: Side) -> GameState {
        let in_check = self.in_check(board, side);
        let can_escape = self.has_escaping_move(board, side);
        match (in_check, can_escape) {
            (true, false) => GameState {
                status: Status::Checkmate,
                in_check,
                winner: Some(side.opposite()),
            },
            (false, false) => GameState {
                status: Status::Stalemate,
                in_check,
                winner: None,
            },
            _ => GameState {
                status: Status::Active,
                in_check,
                winner: None,
            },
        }
    }

    /// True when any opposing piece can legally land on `side`'s King.
    /// A board without that King is never in check.
    pub fn in_check(&self, board: &Board, side: Side) -> bool {
        let Some(king) = board.find_king(side) else {
            return false;
        };
        let opponent = side.opposite();
        board
            .pieces(opponent)
            .any(|(pos, _)| self.validator.is_legal(board, &Move::new(pos, king), opponent))
    }

    /// Play the move on a copy and see whether `side` is out of check.
    pub fn is_move_safe(&self, board: &Board, _move: &Move, side: Side) -> bool {
        board
            .with_move(_move)
            .map(|next| !self.in_check(&next, side))
            .unwrap_or(false)
    }

    pub fn has_escaping_move(&self, board: &Board, side: Side) -> bool {
        board.pieces(side).any(|(pos, _)| {
            self.validator
                .legal_moves_from(board, pos, side)
                .iter()
                .any(|_move| self.is_move_safe(board, _move, side))
        })
    }

    /// Legal moves that don't leave `side`'s King attacked.
    pub fn safe_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        self.validator
            .legal_moves(board, side)
            .into_iter()
            .filter(|_move| self.is_move_safe(board, _move, side))
            .collect()
    }

    pub fn is_checkmate(&self, board: &Board, side: Side) -> bool {
        self.in_check(board, side) && !self.has_escaping_move(board, side)
    }
}

use std::fmt::{self, Display};

use crate::core::board::Board;
use crate::core::definitions::{EngineError, Move, Piece, PieceKind, Position, Side};
use crate::core::utils::{
    between, delta, is_in_diagonal_line, is_in_straight_line, mirror, GOLD_STEPS, KING_STEPS,
    KNIGHT_JUMPS, PAWN_STEPS, SILVER_STEPS,
};

/// Why a move request was turned down, in the order the checks run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    NullMove,
    NoPiece(Position),
    WrongOwner(Side),
    OwnPieceAtTarget(Position),
    IllegalShape(Piece),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NullMove => write!(f, "origin and destination are the same cell"),
            Rejection::NoPiece(pos) => write!(f, "no piece at {pos}"),
            Rejection::WrongOwner(side) => write!(f, "piece belongs to {side}"),
            Rejection::OwnPieceAtTarget(pos) => write!(f, "own piece stands on {pos}"),
            Rejection::IllegalShape(piece) => write!(f, "{piece} can't move like that"),
        }
    }
}

impl From<Rejection> for EngineError {
    fn from(value: Rejection) -> Self {
        EngineError::InvalidMove(value.to_string())
    }
}

/// Pseudo-legality of moves. Pure function of the board it is handed, knows
/// nothing about check.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveValidator;

impl MoveValidator {
    pub fn is_legal(&self, board: &Board, _move: &Move, side: Side) -> bool {
        self.rejection(board, _move, side).is_none()
    }

    /// First failed check for the move, `None` when the move is legal.
    pub fn rejection(&self, board: &Board, _move: &Move, side: Side) -> Option<Rejection> {
        if _move.from == _move.to {
            return Some(Rejection::NullMove);
        }
        let Some(piece) = board.piece_at(_move.from) else {
            return Some(Rejection::NoPiece(_move.from));
        };
        if piece.owner != side {
            return Some(Rejection::WrongOwner(piece.owner));
        }
        if let Some(target) = board.piece_at(_move.to) {
            if target.owner == side {
                return Some(Rejection::OwnPieceAtTarget(_move.to));
            }
        }
        if !self.follows_shape(board, &piece, _move.from, _move.to) {
            return Some(Rejection::IllegalShape(piece));
        }
        None
    }

    /// Every legal move of the piece on `pos`. Candidates are all other 80
    /// cells, filtered through [`MoveValidator::is_legal`].
    pub fn legal_moves_from(&self, board: &Board, pos: Position, side: Side) -> Vec<Move> {
        let Some(piece) = board.piece_at(pos) else {
            return Vec::new();
        };
        if piece.owner != side {
            return Vec::new();
        }
        Position::all()
            .filter(|to| *to != pos)
            .map(|to| Move::new(pos, to))
            .filter(|_move| self.is_legal(board, _move, side))
            .map(|mut _move| {
                _move.piece = Some(piece);
                _move.captured = board.piece_at(_move.to);
                _move
            })
            .collect()
    }

    /// Legal moves of every piece `side` owns, in board order.
    pub fn legal_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        board
            .pieces(side)
            .flat_map(|(pos, _)| self.legal_moves_from(board, pos, side))
            .collect()
    }

    fn follows_shape(&self, board: &Board, piece: &Piece, from: Position, to: Position) -> bool {
        let step = delta(from, to);
        let in_table = |table: &[(i8, i8)]| table.contains(&step);
        let in_mirrored = |table: &[(i8, i8)]| {
            table
                .iter()
                .any(|offset| mirror(piece.owner, *offset) == step)
        };
        let path_clear = || between(from, to).all(|cell| board.is_empty(cell));
        match (piece.kind, piece.promoted) {
            (PieceKind::King, _) => in_table(KING_STEPS),
            (PieceKind::Rook, promoted) => {
                (is_in_straight_line(from, to) && path_clear())
                    || (promoted && in_table(KING_STEPS))
            }
            (PieceKind::Bishop, promoted) => {
                (is_in_diagonal_line(from, to) && path_clear())
                    || (promoted && in_table(KING_STEPS))
            }
            (PieceKind::Gold, _) | (_, true) => in_table(GOLD_STEPS),
            (PieceKind::Silver, false) => in_table(SILVER_STEPS),
            (PieceKind::Knight, false) => in_mirrored(KNIGHT_JUMPS),
            (PieceKind::Lance, false) => {
                let (d_row, d_col) = step;
                d_col == 0 && d_row.signum() == piece.owner.forward() && path_clear()
            }
            (PieceKind::Pawn, false) => in_mirrored(PAWN_STEPS),
        }
    }
}

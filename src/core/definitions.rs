use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::core::utils::BOARD_SIZE;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /** coordinate outside the board or malformed "7f"-style address */
    InvalidPosition(String),
    /** move rejected for the given board and side */
    InvalidMove(String),
    /** side to move has nothing to play, a normal terminal condition */
    NoLegalMove(Side),
    NotationUnsupported { from: String, to: String },
    /** malformed board layout string */
    InvalidLayout(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidPosition(pos) => write!(f, "invalid position: {pos}"),
            EngineError::InvalidMove(reason) => write!(f, "invalid move: {reason}"),
            EngineError::NoLegalMove(side) => write!(f, "{side} has no legal move"),
            EngineError::NotationUnsupported { from, to } => {
                write!(f, "notation conversion {from} -> {to} is not supported")
            }
            EngineError::InvalidLayout(reason) => write!(f, "invalid board layout: {reason}"),
        }
    }
}

impl std::error::Error for EngineError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Sente,
    Gote,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Sente => Side::Gote,
            Side::Gote => Side::Sente,
        }
    }

    /// Row step that moves a piece of this side towards the opponent.
    pub fn forward(self) -> i8 {
        match self {
            Side::Sente => -1,
            Side::Gote => 1,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Side::Sente => "sente",
            Side::Gote => "gote",
        })
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sente" => Ok(Side::Sente),
            "gote" => Ok(Side::Gote),
            other => Err(EngineError::InvalidMove(format!("unknown side '{other}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Rook,
    Bishop,
    Gold,
    Silver,
    Knight,
    Lance,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 8] = [
        PieceKind::King,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Gold,
        PieceKind::Silver,
        PieceKind::Knight,
        PieceKind::Lance,
        PieceKind::Pawn,
    ];

    /// Sente letter of the kind, Gote pieces use the lowercase form.
    pub fn code(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Gold => 'G',
            PieceKind::Silver => 'S',
            PieceKind::Knight => 'N',
            PieceKind::Lance => 'L',
            PieceKind::Pawn => 'P',
        }
    }

    pub fn from_code(code: char) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code.to_ascii_uppercase())
    }

    /// Material value, promotion does not change it.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::King => 10000,
            PieceKind::Rook => 500,
            PieceKind::Bishop => 300,
            PieceKind::Gold => 200,
            PieceKind::Silver => 200,
            PieceKind::Knight => 100,
            PieceKind::Lance => 100,
            PieceKind::Pawn => 10,
        }
    }

    pub fn can_promote(self) -> bool {
        !matches!(self, PieceKind::King | PieceKind::Gold)
    }
}

/** Piece codes on the wire:
 * - `K R B G S N L P` -- Sente
 * - `k r b g s n l p` -- Gote
 * - `+` prefix -- promoted */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Piece {
    pub owner: Side,
    pub kind: PieceKind,
    pub promoted: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, owner: Side) -> Piece {
        Piece {
            owner,
            kind,
            promoted: false,
        }
    }

    pub fn promoted(kind: PieceKind, owner: Side) -> Piece {
        Piece {
            owner,
            kind,
            promoted: kind.can_promote(),
        }
    }

    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    pub fn can_promote(&self) -> bool {
        self.kind.can_promote() && !self.promoted
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self.owner {
            Side::Sente => self.kind.code(),
            Side::Gote => self.kind.code().to_ascii_lowercase(),
        };
        if self.promoted {
            write!(f, "+{code}")
        } else {
            write!(f, "{code}")
        }
    }
}

impl FromStr for Piece {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let (promoted, rest) = match s.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let mut chars = rest.chars();
        let (Some(code), None) = (chars.next(), chars.next()) else {
            return Err(EngineError::InvalidLayout(format!("bad piece code '{s}'")));
        };
        let kind = PieceKind::from_code(code)
            .ok_or_else(|| EngineError::InvalidLayout(format!("bad piece code '{s}'")))?;
        if promoted && !kind.can_promote() {
            return Err(EngineError::InvalidLayout(format!("{s} can't be promoted")));
        }
        let owner = if code.is_ascii_uppercase() {
            Side::Sente
        } else {
            Side::Gote
        };
        Ok(Piece {
            owner,
            kind,
            promoted,
        })
    }
}

/// Cell address. Row 0 is Gote's back rank, row 8 is Sente's.
///
/// On the wire a position is written column first: `"7f"` is column 7
/// (col index 6) and row `f` (row index 5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Position> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Ok(Position { row, col })
        } else {
            Err(EngineError::InvalidPosition(format!("({row}, {col})")))
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Neighbour reached by the given step, `None` off the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let row = (self.row as i8).checked_add(d_row)?;
        let col = (self.col as i8).checked_add(d_col)?;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position { row, col }))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col + 1, (b'a' + self.row) as char)
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidPosition(s.to_string());
        let &[col, row] = s.as_bytes() else {
            return Err(invalid());
        };
        if !(b'1'..=b'9').contains(&col) || !(b'a'..=b'i').contains(&row) {
            return Err(invalid());
        }
        Position::new(row - b'a', col - b'1')
    }
}

/// A move request. `piece` and `captured` are informational and filled in by
/// move generation, `promoted` asks for promotion when the piece is eligible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece: Option<Piece>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<Piece>,
    #[serde(default)]
    pub promoted: bool,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Move {
        Move {
            from,
            to,
            piece: None,
            captured: None,
            promoted: false,
        }
    }

    pub fn with_promotion(mut self) -> Move {
        self.promoted = true;
        self
    }
}

/// Standard notation, `7g-7f` or `8h-2b+` for a promotion request.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}{}", self.from, self.to, if self.promoted { "+" } else { "" })
    }
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let (body, promoted) = match s.strip_suffix('+') {
            Some(body) => (body, true),
            None => (s, false),
        };
        let (from, to) = body
            .split_once('-')
            .ok_or_else(|| EngineError::InvalidMove(format!("expected <from>-<to>, got '{s}'")))?;
        let _move = Move::new(from.parse()?, to.parse()?);
        Ok(if promoted { _move.with_promotion() } else { _move })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Checkmate,
    Stalemate,
}

/// Match status for a side to move, recomputed on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GameStateReport", from = "GameStateReport")]
pub struct GameState {
    pub status: Status,
    pub in_check: bool,
    pub winner: Option<Side>,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status != Status::Active
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameStateReport {
    status: Status,
    in_check: bool,
    #[serde(default)]
    checkmate: bool,
    #[serde(default)]
    stalemate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winner: Option<Side>,
}

impl From<GameState> for GameStateReport {
    fn from(state: GameState) -> Self {
        GameStateReport {
            status: state.status,
            in_check: state.in_check,
            checkmate: state.status == Status::Checkmate,
            stalemate: state.status == Status::Stalemate,
            winner: state.winner,
        }
    }
}

impl From<GameStateReport> for GameState {
    fn from(report: GameStateReport) -> Self {
        GameState {
            status: report.status,
            in_check: report.in_check,
            winner: report.winner,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        })
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(EngineError::InvalidMove(format!("unknown difficulty '{other}'"))),
        }
    }
}

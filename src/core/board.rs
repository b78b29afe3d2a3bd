use std::fmt::{self, Display, Write};
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{serde_as, DeserializeAs, SerializeAs};

use crate::core::definitions::{EngineError, Move, Piece, PieceKind, Position, Result, Side};
use crate::core::utils::{in_promotion_zone, BOARD_SIZE};

type Cells = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

/** Opening layout, row 0 first, each row from column 0 to column 8. */
pub const OPENING_LAYOUT: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL";

/// Cell on the wire: the piece code, or `""` when empty. Reads a plain string
/// so non-self-describing formats like postcard work too.
struct PieceCode;

impl SerializeAs<Option<Piece>> for PieceCode {
    fn serialize_as<S: Serializer>(
        cell: &Option<Piece>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match cell {
            Some(piece) => serializer.serialize_str(&piece.to_string()),
            None => serializer.serialize_str(""),
        }
    }
}

impl<'de> DeserializeAs<'de, Option<Piece>> for PieceCode {
    fn deserialize_as<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<Piece>, D::Error> {
        let code = String::deserialize(deserializer)?;
        if code.is_empty() {
            return Ok(None);
        }
        code.parse().map(Some).map_err(serde::de::Error::custom)
    }
}

/// 9x9 grid, one optional piece per cell. Knows nothing about rules beyond
/// the promotion zone.
///
/// Serialized as a 9x9 array of piece codes with `""` for empty cells.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    #[serde_as(as = "[[PieceCode; 9]; 9]")]
    cells: Cells,
}

/// Full copy of a board's cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot(Cells);

impl Board {
    pub fn empty() -> Board {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn initial() -> Board {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Lance,
            PieceKind::Knight,
            PieceKind::Silver,
            PieceKind::Gold,
            PieceKind::King,
            PieceKind::Gold,
            PieceKind::Silver,
            PieceKind::Knight,
            PieceKind::Lance,
        ];
        for (col, kind) in back_rank.into_iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(kind, Side::Gote));
            board.cells[8][col] = Some(Piece::new(kind, Side::Sente));
            board.cells[2][col] = Some(Piece::new(PieceKind::Pawn, Side::Gote));
            board.cells[6][col] = Some(Piece::new(PieceKind::Pawn, Side::Sente));
        }
        board.cells[1][1] = Some(Piece::new(PieceKind::Rook, Side::Gote));
        board.cells[1][7] = Some(Piece::new(PieceKind::Bishop, Side::Gote));
        board.cells[7][1] = Some(Piece::new(PieceKind::Bishop, Side::Sente));
        board.cells[7][7] = Some(Piece::new(PieceKind::Rook, Side::Sente));
        board
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.row() as usize][pos.col() as usize]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Put a piece on a cell, returning whatever stood there.
    pub fn place(&mut self, pos: Position, piece: Piece) -> Option<Piece> {
        self.cells[pos.row() as usize][pos.col() as usize].replace(piece)
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.row() as usize][pos.col() as usize].take()
    }

    /// Flip the promoted flag of the piece on `pos`. Returns false when the
    /// cell is empty or the piece can't promote.
    pub fn promote_at(&mut self, pos: Position) -> bool {
        match &mut self.cells[pos.row() as usize][pos.col() as usize] {
            Some(piece) if piece.can_promote() => {
                piece.promoted = true;
                true
            }
            _ => false,
        }
    }

    /// Promotion is allowed when the piece is eligible and either end of the
    /// move lies in its owner's promotion zone.
    pub fn can_promote(&self, piece: &Piece, from: Position, to: Position) -> bool {
        piece.can_promote()
            && (in_promotion_zone(piece.owner, from.row()) || in_promotion_zone(piece.owner, to.row()))
    }

    /** Relocate a piece. Rules are not checked, any piece on `to` is removed
     * and returned. */
    pub fn move_piece(&mut self, _move: &Move) -> Result<Option<Piece>> {
        let mut piece = self.piece_at(_move.from).ok_or_else(|| {
            EngineError::InvalidMove(format!("no piece at {}", _move.from))
        })?;
        if _move.promoted && self.can_promote(&piece, _move.from, _move.to) {
            piece.promoted = true;
        }
        self.remove(_move.from);
        let captured = self.place(_move.to, piece);
        trace!("{_move} moved {piece}, captured {captured:?}");
        Ok(captured)
    }

    /// Copy of the board with the move applied, `self` is left untouched.
    pub fn with_move(&self, _move: &Move) -> Result<Board> {
        let mut board = self.clone();
        board.move_piece(_move)?;
        Ok(board)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot(self.cells)
    }

    pub fn restore(&mut self, snapshot: &BoardSnapshot) {
        self.cells = snapshot.0;
    }

    pub fn find_king(&self, side: Side) -> Option<Position> {
        self.iter_pieces()
            .find(|(_, piece)| piece.owner == side && piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
    }

    /// Occupied cells in row-major order.
    pub fn iter_pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.iter_pieces().filter(move |(_, piece)| piece.owner == side)
    }

    /// Compact layout, rows separated by `/`, digits for runs of empty cells.
    pub fn to_layout(&self) -> String {
        let mut layout = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
        for (idx, row) in self.cells.iter().enumerate() {
            if idx > 0 {
                layout.push('/');
            }
            let mut empty = 0;
            for cell in row {
                match cell {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            let _ = write!(layout, "{empty}");
                            empty = 0;
                        }
                        let _ = write!(layout, "{piece}");
                    }
                }
            }
            if empty > 0 {
                let _ = write!(layout, "{empty}");
            }
        }
        layout
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl FromStr for Board {
    type Err = EngineError;

    fn from_str(layout: &str) -> Result<Self> {
        let mut board = Board::empty();
        let rows: Vec<_> = layout.split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(EngineError::InvalidLayout(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }
        for (row, text) in rows.into_iter().enumerate() {
            let mut col = 0usize;
            let mut promoted = false;
            for ch in text.chars() {
                if col >= BOARD_SIZE {
                    return Err(EngineError::InvalidLayout(format!("row {row} is too long")));
                }
                match ch {
                    '+' if promoted => {
                        return Err(EngineError::InvalidLayout(format!(
                            "repeated '+' in row {row}"
                        )));
                    }
                    '+' => promoted = true,
                    '1'..='9' if !promoted => col += ch as usize - '0' as usize,
                    _ => {
                        let code = if promoted { format!("+{ch}") } else { ch.to_string() };
                        let piece: Piece = code.parse()?;
                        board.cells[row][col] = Some(piece);
                        promoted = false;
                        col += 1;
                    }
                }
            }
            if col != BOARD_SIZE || promoted {
                return Err(EngineError::InvalidLayout(format!(
                    "row {row} covers {col} cells"
                )));
            }
        }
        Ok(board)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{} ", (b'a' + row as u8) as char)?;
            for cell in cells {
                match cell {
                    Some(piece) => write!(f, "{:>3}", piece.to_string())?,
                    None => write!(f, "  .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 1..=BOARD_SIZE {
            write!(f, "{col:>3}")?;
        }
        writeln!(f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.to_layout()).finish()
    }
}

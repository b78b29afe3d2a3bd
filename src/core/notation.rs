use std::fmt::{self, Display};
use std::str::FromStr;

use log::warn;

use crate::core::board::Board;
use crate::core::definitions::{EngineError, Move, Piece, PieceKind, Position, Result, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotationFormat {
    /** `7g-7f`, `8h-2b+` */
    Standard,
    /** `P-7f` */
    Algebraic,
    /** `▲７六歩` */
    Japanese,
}

impl Display for NotationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            NotationFormat::Standard => "standard",
            NotationFormat::Algebraic => "algebraic",
            NotationFormat::Japanese => "japanese",
        })
    }
}

impl FromStr for NotationFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(NotationFormat::Standard),
            "algebraic" => Ok(NotationFormat::Algebraic),
            "japanese" => Ok(NotationFormat::Japanese),
            other => Err(EngineError::NotationUnsupported {
                from: other.to_string(),
                to: "any".to_string(),
            }),
        }
    }
}

const JAPANESE_COLUMNS: [char; 9] = ['１', '２', '３', '４', '５', '６', '７', '８', '９'];
const JAPANESE_ROWS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];

fn japanese_piece(piece: &Piece) -> &'static str {
    match (piece.kind, piece.promoted) {
        (PieceKind::King, _) => "玉",
        (PieceKind::Rook, false) => "飛",
        (PieceKind::Rook, true) => "龍",
        (PieceKind::Bishop, false) => "角",
        (PieceKind::Bishop, true) => "馬",
        (PieceKind::Gold, _) => "金",
        (PieceKind::Silver, false) => "銀",
        (PieceKind::Silver, true) => "成銀",
        (PieceKind::Knight, false) => "桂",
        (PieceKind::Knight, true) => "成桂",
        (PieceKind::Lance, false) => "香",
        (PieceKind::Lance, true) => "成香",
        (PieceKind::Pawn, false) => "歩",
        (PieceKind::Pawn, true) => "と",
    }
}

fn japanese_position(pos: Position) -> String {
    format!(
        "{}{}",
        JAPANESE_COLUMNS[pos.col() as usize],
        JAPANESE_ROWS[pos.row() as usize]
    )
}

/// Display-only translation between move notations.
///
/// Only the directions out of standard notation are implemented. The other
/// directions need a board history to resolve which piece moved and are
/// reported as [`EngineError::NotationUnsupported`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NotationConverter;

impl NotationConverter {
    /// Lenient form used by the service: unknown formats, unsupported pairs
    /// and malformed input hand back the input unchanged.
    pub fn convert(&self, _move: &str, from: &str, to: &str) -> String {
        let result = from
            .parse()
            .and_then(|from: NotationFormat| Ok((from, to.parse::<NotationFormat>()?)))
            .and_then(|(from, to)| self.try_convert(_move, from, to));
        match result {
            Ok(converted) => converted,
            Err(err) => {
                warn!("passing '{_move}' through unconverted ({from} -> {to}): {err}");
                _move.to_string()
            }
        }
    }

    /// Without a board the moving piece is assumed to be a Sente pawn.
    pub fn try_convert(&self, _move: &str, from: NotationFormat, to: NotationFormat) -> Result<String> {
        self.convert_with(_move, from, to, |_| Piece::new(PieceKind::Pawn, Side::Sente))
    }

    /// Like [`NotationConverter::try_convert`], reading the moving piece off
    /// the position the move is played from.
    pub fn convert_on_board(
        &self,
        board: &Board,
        _move: &str,
        from: NotationFormat,
        to: NotationFormat,
    ) -> Result<String> {
        self.convert_with(_move, from, to, |parsed| {
            board
                .piece_at(parsed.from)
                .unwrap_or(Piece::new(PieceKind::Pawn, Side::Sente))
        })
    }

    fn convert_with<F>(&self, _move: &str, from: NotationFormat, to: NotationFormat, piece_of: F) -> Result<String>
    where
        F: Fn(&Move) -> Piece,
    {
        if from == to {
            return Ok(_move.to_string());
        }
        if from != NotationFormat::Standard {
            return Err(EngineError::NotationUnsupported {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        let parsed: Move = _move.parse()?;
        let piece = piece_of(&parsed);
        Ok(match to {
            NotationFormat::Algebraic => self.to_algebraic(&parsed, &piece),
            NotationFormat::Japanese => self.to_japanese(&parsed, &piece),
            NotationFormat::Standard => parsed.to_string(),
        })
    }

    fn to_algebraic(&self, _move: &Move, piece: &Piece) -> String {
        format!(
            "{}{}-{}{}",
            if piece.promoted { "+" } else { "" },
            piece.kind.code(),
            _move.to,
            if _move.promoted { "+" } else { "" }
        )
    }

    fn to_japanese(&self, _move: &Move, piece: &Piece) -> String {
        format!(
            "{}{}{}{}",
            match piece.owner {
                Side::Sente => '▲',
                Side::Gote => '△',
            },
            japanese_position(_move.to),
            japanese_piece(piece),
            if _move.promoted { "成" } else { "" }
        )
    }
}

use crate::core::definitions::{Position, Side};

pub const BOARD_SIZE: usize = 9;
/** Rows from the far edge an eligible piece may promote in. */
pub const PROMOTION_DEPTH: u8 = 3;

/** Offsets as (row, col) steps. Row -1 is towards Gote's back rank. */
pub type Offset = (i8, i8);

pub const KING_STEPS: &[Offset] = &[
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// Gold and Silver tables are applied as-is for both sides, they are not
// mirrored for Gote.
pub const GOLD_STEPS: &[Offset] = &[(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)];
pub const SILVER_STEPS: &[Offset] = &[(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 1)];

/** Forward-relative (forward, sideways) steps, mirrored per side. */
pub const KNIGHT_JUMPS: &[Offset] = &[(2, -1), (2, 1)];
pub const PAWN_STEPS: &[Offset] = &[(1, 0)];

/// Turn a forward-relative step into a board step for `side`.
#[inline]
pub fn mirror(side: Side, (forward, sideways): Offset) -> Offset {
    (forward * side.forward(), sideways)
}

#[inline]
pub fn delta(from: Position, to: Position) -> Offset {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

/** Row and column index of the centre cell, 5e. */
pub const CENTRE: u8 = (BOARD_SIZE / 2) as u8;

/// Manhattan distance to the centre cell.
pub fn centre_distance(pos: Position) -> u8 {
    pos.row().abs_diff(CENTRE) + pos.col().abs_diff(CENTRE)
}

pub fn is_in_straight_line(a: Position, b: Position) -> bool {
    a.row() == b.row() || a.col() == b.col()
}

pub fn is_in_diagonal_line(a: Position, b: Position) -> bool {
    a.row().abs_diff(b.row()) == a.col().abs_diff(b.col())
}

/// True when `row` lies in the three rows nearest the opponent of `side`.
pub fn in_promotion_zone(side: Side, row: u8) -> bool {
    match side {
        Side::Sente => row < PROMOTION_DEPTH,
        Side::Gote => row >= BOARD_SIZE as u8 - PROMOTION_DEPTH,
    }
}

#[derive(Debug)]
pub struct BetweenIterator {
    current: Position,
    target: Position,
    step: Offset,
}

impl Iterator for BetweenIterator {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let next = self.current.offset(self.step.0, self.step.1)?;
        if next == self.target {
            None
        } else {
            self.current = next;
            Some(next)
        }
    }
}

/// Cells strictly between two points of one line, yields nothing when the
/// points do not share a rank, file or diagonal.
pub fn between(from: Position, to: Position) -> BetweenIterator {
    let (d_row, d_col) = delta(from, to);
    let step = if is_in_straight_line(from, to) || is_in_diagonal_line(from, to) {
        (d_row.signum(), d_col.signum())
    } else {
        (0, 0)
    };
    BetweenIterator {
        current: from,
        // a zero step stops on the first call
        target: if step == (0, 0) { from } else { to },
        step,
    }
}

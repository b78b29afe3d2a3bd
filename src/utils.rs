use std::{fmt::Display, ops::AddAssign};

use crate::core::board::Board;
use crate::core::definitions::{Move, Side};
use crate::core::state::GameStateChecker;

/// Node counts of a perft run. Only leaf moves are classified.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PerftResult {
    pub all: usize,
    pub captures: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftResult {
    pub fn combine(self, other: PerftResult) -> Self {
        PerftResult {
            all: self.all + other.all,
            captures: self.captures + other.captures,
            promotions: self.promotions + other.promotions,
            checks: self.checks + other.checks,
            checkmates: self.checkmates + other.checkmates,
        }
    }
}

impl AddAssign for PerftResult {
    fn add_assign(&mut self, rhs: Self) {
        self.all += rhs.all;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - cp: {:<4} pr: {:<4} Ch: {:<4} CM: {:4}",
            self.all, self.captures, self.promotions, self.checks, self.checkmates
        )
    }
}

/// Safe moves of `side`, each also tried with promotion when allowed.
fn perft_moves(checker: &GameStateChecker, board: &Board, side: Side) -> Vec<Move> {
    let mut moves = checker.safe_moves(board, side);
    let promotions: Vec<_> = moves
        .iter()
        .filter(|_move| {
            board
                .piece_at(_move.from)
                .map(|piece| board.can_promote(&piece, _move.from, _move.to))
                .unwrap_or(false)
        })
        .map(|_move| _move.with_promotion())
        .collect();
    moves.extend(promotions);
    moves
}

fn count_perft_result(checker: &GameStateChecker, board: &Board, side: Side, moves: Vec<Move>) -> PerftResult {
    let mut result = PerftResult {
        all: moves.len(),
        ..Default::default()
    };
    for _move in moves {
        if _move.captured.is_some() {
            result.captures += 1;
        }
        if _move.promoted {
            result.promotions += 1;
        }
        let Ok(next) = board.with_move(&_move) else {
            continue;
        };
        if checker.in_check(&next, side.opposite()) {
            result.checks += 1;
            if !checker.has_escaping_move(&next, side.opposite()) {
                result.checkmates += 1;
            }
        }
    }
    result
}

fn perft_step(checker: &GameStateChecker, board: &Board, side: Side, depth: usize) -> PerftResult {
    if depth == 0 {
        return PerftResult {
            all: 1,
            ..Default::default()
        };
    }
    let moves = perft_moves(checker, board, side);
    if depth == 1 {
        return count_perft_result(checker, board, side, moves);
    }
    let mut result = PerftResult::default();
    for _move in moves {
        if let Ok(next) = board.with_move(&_move) {
            result += perft_step(checker, &next, side.opposite(), depth - 1);
        }
    }
    result
}

/// Count the move tree of `board` to `depth` plies, `side` moving first.
pub fn perft(board: &Board, side: Side, depth: usize) -> PerftResult {
    perft_step(&GameStateChecker::default(), board, side, depth)
}

/// Per-root-move breakdown, printed the way the debugging CLI shows it.
pub fn perft_divide(board: &Board, side: Side, depth: usize) -> Vec<(Move, PerftResult)> {
    let checker = GameStateChecker::default();
    perft_moves(&checker, board, side)
        .into_iter()
        .filter_map(|_move| {
            let next = board.with_move(&_move).ok()?;
            Some((_move, perft_step(&checker, &next, side.opposite(), depth.saturating_sub(1))))
        })
        .collect()
}

pub fn perft_test(layout: &str, side: Side, depth: usize, expected: usize, detailed: bool) -> bool {
    let Ok(board) = layout.parse::<Board>() else {
        return false;
    };
    if detailed {
        let mut total = PerftResult::default();
        for (_move, result) in perft_divide(&board, side, depth) {
            println!(" {_move} : {result}");
            total += result;
        }
        println!("+ total: {total}");
        total.all == expected
    } else {
        let result = perft(&board, side, depth);
        #[cfg(test)]
        println!(" details: {result}");
        result.all == expected
    }
}

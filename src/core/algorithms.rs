use std::cmp::Reverse;

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::definitions::{Difficulty, Move, Side};
use crate::core::state::GameStateChecker;
use crate::core::utils::centre_distance;

/// Move selection strategy. `rng` is only consumed by strategies that need it.
pub trait Algorithm {
    fn solve(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Move>;
}

pub type EvaluationFunc = dyn Fn(&Board, Side) -> i32 + Send + Sync;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Plies searched below the candidate move at `Hard`.
    pub hard_depth: u32,
    pub expert_depth: u32,
    /// Replies explored per ply inside the search.
    pub branch_limit: usize,
    pub checkmate_score: i32,
    /// Upper bound of the random bonus added to `Medium` scores.
    pub medium_jitter: f64,
    /// Sort replies by captured value before truncating to `branch_limit`.
    pub order_moves: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            hard_depth: 2,
            expert_depth: 3,
            branch_limit: 10,
            checkmate_score: 1000,
            medium_jitter: 5.0,
            order_moves: true,
        }
    }
}

/// Signed material sum, positive for `side`'s pieces.
pub fn material_balance(board: &Board, side: Side) -> i32 {
    board
        .iter_pieces()
        .map(|(_, piece)| {
            if piece.owner == side {
                piece.value()
            } else {
                -piece.value()
            }
        })
        .sum()
}

/// Moves `side` may play without leaving its King attacked, with promotion
/// requested wherever it is allowed.
pub fn candidate_moves(checker: &GameStateChecker, board: &Board, side: Side) -> Vec<Move> {
    checker
        .safe_moves(board, side)
        .into_iter()
        .map(|_move| request_promotion(board, _move))
        .collect()
}

fn request_promotion(board: &Board, _move: Move) -> Move {
    match board.piece_at(_move.from) {
        Some(piece) if board.can_promote(&piece, _move.from, _move.to) => _move.with_promotion(),
        _ => _move,
    }
}

fn captured_value(_move: &Move) -> i32 {
    _move.captured.map(|piece| piece.value()).unwrap_or(0)
}

/// Uniform choice among the candidates.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomBot {
    checker: GameStateChecker,
}

impl Algorithm for RandomBot {
    fn solve(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Move> {
        candidate_moves(&self.checker, board, side).choose(rng).copied()
    }
}

/// Captures first, then centre control, plus a little noise.
#[derive(Clone, Copy, Debug)]
pub struct GreedyBot {
    checker: GameStateChecker,
    jitter: f64,
}

impl GreedyBot {
    pub fn new(jitter: f64) -> Self {
        GreedyBot {
            checker: GameStateChecker::default(),
            jitter,
        }
    }

    fn score(&self, _move: &Move, rng: &mut dyn RngCore) -> f64 {
        let distance = centre_distance(_move.to) as f64;
        let noise = if self.jitter > 0.0 {
            rng.gen_range(0.0..self.jitter)
        } else {
            0.0
        };
        10.0 * captured_value(_move) as f64 + 2.0 * (8.0 - distance) + noise
    }
}

impl Algorithm for GreedyBot {
    fn solve(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;
        for _move in candidate_moves(&self.checker, board, side) {
            let score = self.score(&_move, rng);
            if best.map(|(_, best_score)| score > best_score).unwrap_or(true) {
                best = Some((_move, score));
            }
        }
        best.map(|(_move, _)| _move)
    }
}

/// Fixed-depth minimax over board copies. Every ply below the candidate move
/// only looks at `branch_limit` replies.
pub struct MinMaxBot {
    checker: GameStateChecker,
    max_depth: u32,
    branch_limit: usize,
    checkmate_score: i32,
    order_moves: bool,
    evaluate_fn: Box<EvaluationFunc>,
}

impl MinMaxBot {
    pub fn new(max_depth: u32, config: &AiConfig) -> Self {
        MinMaxBot {
            checker: GameStateChecker::default(),
            max_depth,
            branch_limit: config.branch_limit,
            checkmate_score: config.checkmate_score,
            order_moves: config.order_moves,
            evaluate_fn: Box::new(material_balance),
        }
    }

    pub fn with_evaluation(mut self, evaluate_fn: Box<EvaluationFunc>) -> Self {
        self.evaluate_fn = evaluate_fn;
        self
    }

    fn replies(&self, board: &Board, side: Side) -> Vec<Move> {
        let mut moves: Vec<_> = self
            .checker
            .validator()
            .legal_moves(board, side)
            .into_iter()
            .map(|_move| request_promotion(board, _move))
            .collect();
        if self.order_moves {
            // stable, so equal captures keep generation order
            moves.sort_by_key(|_move| Reverse(captured_value(_move)));
        }
        if moves.len() > self.branch_limit {
            trace!("truncating {} replies to {}", moves.len(), self.branch_limit);
            moves.truncate(self.branch_limit);
        }
        moves
    }

    /// Score of `mover` playing `_move`, always from `root`'s point of view.
    fn minimax(&self, board: &Board, _move: &Move, root: Side, mover: Side, depth: u32) -> i32 {
        let Ok(next) = board.with_move(_move) else {
            return 0;
        };
        let opponent = mover.opposite();
        if self.checker.is_checkmate(&next, opponent) {
            return if mover == root {
                self.checkmate_score
            } else {
                -self.checkmate_score
            };
        }
        if depth == 0 {
            return (self.evaluate_fn)(&next, root);
        }
        let scores = self
            .replies(&next, opponent)
            .into_iter()
            .map(|reply| self.minimax(&next, &reply, root, opponent, depth - 1));
        let score = if opponent == root {
            scores.max()
        } else {
            scores.min()
        };
        score.unwrap_or_else(|| (self.evaluate_fn)(&next, root))
    }
}

impl Algorithm for MinMaxBot {
    fn solve(&self, board: &Board, side: Side, _rng: &mut dyn RngCore) -> Option<Move> {
        let mut best: Option<(Move, i32)> = None;
        for _move in candidate_moves(&self.checker, board, side) {
            let score = self.minimax(board, &_move, side, side, self.max_depth);
            trace!("{_move} scored {score}");
            if best.map(|(_, best_score)| score > best_score).unwrap_or(true) {
                best = Some((_move, score));
            }
        }
        best.map(|(_move, _)| _move)
    }
}

/// Picks a move for a side at the requested strength.
#[derive(Clone, Debug, Default)]
pub struct AiPlayer {
    config: AiConfig,
}

impl AiPlayer {
    pub fn new(config: AiConfig) -> Self {
        AiPlayer { config }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn algorithm(&self, difficulty: Difficulty) -> Box<dyn Algorithm> {
        match difficulty {
            Difficulty::Easy => Box::new(RandomBot::default()),
            Difficulty::Medium => Box::new(GreedyBot::new(self.config.medium_jitter)),
            Difficulty::Hard => Box::new(MinMaxBot::new(self.config.hard_depth, &self.config)),
            Difficulty::Expert => Box::new(MinMaxBot::new(self.config.expert_depth, &self.config)),
        }
    }

    /// `None` when `side` has nothing to play (checkmate or stalemate).
    pub fn best_move(&self, board: &Board, side: Side, difficulty: Difficulty) -> Option<Move> {
        self.best_move_with_rng(board, side, difficulty, &mut rand::thread_rng())
    }

    pub fn best_move_with_rng(
        &self,
        board: &Board,
        side: Side,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Option<Move> {
        let chosen = self.algorithm(difficulty).solve(board, side, rng);
        match &chosen {
            Some(_move) => debug!("{side} ({difficulty}) plays {_move}"),
            None => debug!("{side} ({difficulty}) has no legal move"),
        }
        chosen
    }
}

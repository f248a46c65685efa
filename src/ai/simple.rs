//! Two simple bots: `RandomBot` and `BlockingBot`.
use std::fmt::{Debug, Formatter};

use internal_iterator::InternalIterator;
use rand::Rng;
use tracing::trace;

use crate::ai::{Bot, Sides};
use crate::board::{Board, Coord, Player};

/// Pick an empty tile uniformly at random, `None` if there are none.
pub fn random_move(board: &Board, rng: &mut impl Rng) -> Option<Coord> {
    let count = board.available_moves().count();
    if count == 0 {
        return None;
    }
    let index = rng.gen_range(0..count);
    board.available_moves().nth(index)
}

/// The lowest empty tile that would complete a line for `player`.
pub fn winning_move(board: &Board, player: Player) -> Option<Coord> {
    let mut scratch = *board;
    Coord::all().find(|&coord| scratch.is_winning_move(coord, player))
}

/// Take an immediate win for `sides.ai` if there is one, otherwise block an immediate win for `sides.human`,
/// otherwise fall back to [random_move]. This only looks a single move ahead, forks are not detected.
pub fn blocking_move(board: &Board, sides: Sides, rng: &mut impl Rng) -> Option<Coord> {
    if let Some(mv) = winning_move(board, sides.ai) {
        trace!(?mv, "taking immediate win");
        return Some(mv);
    }
    if let Some(mv) = winning_move(board, sides.human) {
        trace!(?mv, "blocking immediate loss");
        return Some(mv);
    }
    random_move(board, rng)
}

/// Bot that chooses moves randomly uniformly among possible moves.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> Debug for RandomBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RandomBot")
    }
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        RandomBot { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_move(&mut self, board: &Board) -> Option<Coord> {
        random_move(board, &mut self.rng)
    }
}

/// Bot that wins or blocks when that's possible in a single move and plays randomly otherwise.
pub struct BlockingBot<R: Rng> {
    sides: Sides,
    rng: R,
}

impl<R: Rng> Debug for BlockingBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockingBot {{ ai: {} }}", self.sides.ai)
    }
}

impl<R: Rng> BlockingBot<R> {
    pub fn new(sides: Sides, rng: R) -> Self {
        BlockingBot { sides, rng }
    }
}

impl<R: Rng> Bot for BlockingBot<R> {
    fn select_move(&mut self, board: &Board) -> Option<Coord> {
        blocking_move(board, self.sides, &mut self.rng)
    }
}

use std::fmt::{Debug, Formatter};

use tracing::trace;

use crate::ai::{Bot, Sides};
use crate::board::{Board, Coord};

/// Evaluate `board` using exhaustive minimax and return its score from the POV of `sides.ai`.
///
/// Leaves score [WIN_SCORE](crate::board::WIN_SCORE) if `sides.ai` has won,
/// `-WIN_SCORE` if `sides.human` has won and zero for a full board.
/// When `maximizing` is true `sides.ai` is the next player to move, otherwise `sides.human` is.
///
/// Faster wins are not preferred over slower ones, all wins score the same.
/// Every tile placed during the search is cleared again before returning.
pub fn minimax(board: &mut Board, sides: Sides, maximizing: bool) -> i32 {
    let score = board.terminal(sides.ai).score(sides.ai);
    if score != 0 || board.is_full() {
        return score;
    }

    let mover = if maximizing { sides.ai } else { sides.human };
    let mut best: Option<i32> = None;

    for coord in Coord::all() {
        if !board.is_empty_tile(coord) {
            continue;
        }

        let child = board.speculate(coord, mover, |child| minimax(child, sides, !maximizing));
        best = Some(match best {
            None => child,
            Some(best) if maximizing => best.max(child),
            Some(best) => best.min(child),
        });
    }

    // the board is not full so at least one child was visited
    best.unwrap_or(0)
}

/// The minimax score of playing each empty tile for `sides.ai`, in increasing index order.
pub fn minimax_scores(board: &Board, sides: Sides) -> Vec<(Coord, i32)> {
    let mut scratch = *board;

    Coord::all()
        .filter(|&coord| board.is_empty_tile(coord))
        .map(|coord| {
            let score = scratch.speculate(coord, sides.ai, |child| minimax(child, sides, false));
            trace!(?coord, score, "minimax child");
            (coord, score)
        })
        .collect()
}

/// The best tile to play for `sides.ai`, `None` if the board is full.
/// Ties are broken by picking the lowest index.
pub fn best_move(board: &Board, sides: Sides) -> Option<Coord> {
    let mut best: Option<(Coord, i32)> = None;

    for (coord, score) in minimax_scores(board, sides) {
        // only replace on strict improvement to keep the lowest index
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((coord, score));
        }
    }

    best.map(|(coord, _)| coord)
}

/// Bot that plays perfectly by searching the entire remaining game tree.
pub struct MinimaxBot {
    sides: Sides,
}

impl Debug for MinimaxBot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MinimaxBot {{ ai: {} }}", self.sides.ai)
    }
}

impl MinimaxBot {
    pub fn new(sides: Sides) -> Self {
        MinimaxBot { sides }
    }
}

impl Bot for MinimaxBot {
    fn select_move(&mut self, board: &Board) -> Option<Coord> {
        best_move(board, self.sides)
    }
}

//! Move selection for the automated player, in three tiers of strength.
//!
//! * [Difficulty::Easy] plays a uniformly random empty tile, see [simple::RandomBot].
//! * [Difficulty::Medium] takes an immediate win, otherwise blocks an immediate loss,
//!     otherwise plays randomly, see [simple::BlockingBot].
//! * [Difficulty::Hard] plays perfectly using exhaustive minimax, see [minimax::MinimaxBot].
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use rand::Rng;
use tracing::{debug, instrument};

use crate::board::{Board, Coord, Player};

pub mod minimax;
pub mod simple;

pub trait Bot {
    /// Pick an empty tile to play, or `None` if the board has no empty tiles left.
    ///
    /// `self` is mutable to allow for random state, this method is not supposed to
    /// modify `self` in any other significant way. The board itself is never modified.
    fn select_move(&mut self, board: &Board) -> Option<Coord>;
}

impl<F: FnMut(&Board) -> Option<Coord>> Bot for F {
    fn select_move(&mut self, board: &Board) -> Option<Coord> {
        self(board)
    }
}

/// Which symbol the automated player optimizes for, and which symbol it plays against.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Sides {
    pub ai: Player,
    pub human: Player,
}

impl Sides {
    pub fn new(ai: Player, human: Player) -> Self {
        assert_ne!(ai, human, "ai and human must play different symbols");
        Sides { ai, human }
    }

    /// The automated player is `ai`, the opponent plays the other symbol.
    pub fn for_ai(ai: Player) -> Self {
        Sides::new(ai, ai.other())
    }

    pub fn flip(self) -> Self {
        Sides::new(self.human, self.ai)
    }
}

/// O is the automated player and X the human.
impl Default for Sides {
    fn default() -> Self {
        Sides::for_ai(Player::O)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown difficulty {0:?}, expected one of easy, medium, hard")]
pub struct InvalidDifficulty(pub String);

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// The numeric codes used in older score and settings files.
    pub fn from_code(code: u32) -> Result<Difficulty, InvalidDifficulty> {
        match code {
            11 => Ok(Difficulty::Easy),
            22 => Ok(Difficulty::Medium),
            33 => Ok(Difficulty::Hard),
            _ => Err(InvalidDifficulty(code.to_string())),
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Difficulty {
    type Err = InvalidDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u32>() {
            return Difficulty::from_code(code);
        }

        match s.to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            _ => Err(InvalidDifficulty(s.to_owned())),
        }
    }
}

/// Select the move for `sides.ai` on `board` using the strategy of the given difficulty.
/// Returns `None` if the board is full.
#[instrument(level = "debug", skip(rng))]
pub fn select_move(board: &Board, difficulty: Difficulty, sides: Sides, rng: &mut impl Rng) -> Option<Coord> {
    let mv = match difficulty {
        Difficulty::Easy => simple::random_move(board, rng),
        Difficulty::Medium => simple::blocking_move(board, sides, rng),
        Difficulty::Hard => minimax::best_move(board, sides),
    };

    debug!(?mv, "selected move");
    mv
}

/// Bot that plays with a fixed difficulty for a fixed side.
pub struct DifficultyBot<R: Rng> {
    difficulty: Difficulty,
    sides: Sides,
    rng: R,
}

impl<R: Rng> Debug for DifficultyBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DifficultyBot {{ difficulty: {}, ai: {} }}",
            self.difficulty, self.sides.ai
        )
    }
}

impl<R: Rng> DifficultyBot<R> {
    pub fn new(difficulty: Difficulty, sides: Sides, rng: R) -> Self {
        DifficultyBot { difficulty, sides, rng }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn sides(&self) -> Sides {
        self.sides
    }
}

impl<R: Rng> Bot for DifficultyBot<R> {
    fn select_move(&mut self, board: &Board) -> Option<Coord> {
        select_move(board, self.difficulty, self.sides, &mut self.rng)
    }
}

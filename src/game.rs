//! Turn-taking on top of a [Board]: X always moves first and players alternate until one wins or the board fills up.
use std::fmt::{Display, Formatter};

use tracing::debug;

use crate::ai::{Bot, Difficulty};
use crate::board::{Board, Coord, Outcome, Player};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum PlayError {
    #[error("the game is already over")]
    GameOver,
    #[error("tile {0} is already occupied")]
    Occupied(Coord),
}

/// Whether the second seat is taken by another human or by a bot of some difficulty.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MatchMode {
    VsHuman,
    VsAi(Difficulty),
}

/// The authoritative state of a single match.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Game {
    board: Board,
    next_player: Player,
    outcome: Option<Outcome>,
}

impl Default for Game {
    fn default() -> Self {
        Game {
            board: Board::default(),
            next_player: Player::X,
            outcome: None,
        }
    }
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary position. The player to move is derived from the tile counts,
    /// O moves next iff X has placed more tiles.
    pub fn from_board(board: Board) -> Self {
        let x = board.count_tiles(Some(Player::X));
        let o = board.count_tiles(Some(Player::O));
        let next_player = if x > o { Player::O } else { Player::X };

        Game {
            board,
            next_player,
            outcome: board.outcome(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move next. Once the game is over this is the player that did not play the last move.
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn reset(&mut self) {
        *self = Game::default();
    }

    /// Place the next player's symbol on `coord`, switch players and update the outcome.
    pub fn play(&mut self, coord: Coord) -> Result<(), PlayError> {
        if self.is_done() {
            return Err(PlayError::GameOver);
        }
        if !self.board.is_empty_tile(coord) {
            return Err(PlayError::Occupied(coord));
        }

        self.board.set_tile(coord, Some(self.next_player));
        self.next_player = self.next_player.other();
        self.outcome = self.board.outcome();

        if let Some(outcome) = self.outcome {
            debug!(?outcome, board = ?self.board, "game finished");
        }
        Ok(())
    }

    /// Ask `bot` for a move on the current board and play it.
    /// Returns the move that was played, or `None` if the bot had nothing to play.
    pub fn play_bot(&mut self, bot: &mut impl Bot) -> Result<Option<Coord>, PlayError> {
        if self.is_done() {
            return Err(PlayError::GameOver);
        }

        match bot.select_move(&self.board) {
            Some(coord) => {
                self.play(coord)?;
                Ok(Some(coord))
            }
            None => Ok(None),
        }
    }

    /// Clone this game, play `coord` on it and return the new game.
    pub fn clone_and_play(&self, coord: Coord) -> Result<Game, PlayError> {
        let mut next = self.clone();
        next.play(coord)?;
        Ok(next)
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)?;
        match self.outcome {
            None => writeln!(f, "next: {}", self.next_player),
            Some(Outcome::WonBy(player)) => writeln!(f, "won by {}", player),
            Some(Outcome::Draw) => writeln!(f, "draw"),
        }
    }
}

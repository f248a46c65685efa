#![warn(missing_debug_implementations)]
#![allow(clippy::new_without_default)]

//! [Tic-tac-toe](https://en.wikipedia.org/wiki/Tic-tac-toe) board evaluation and automated opponents.
//!
//! # Features
//!
//! * A compact 3x3 [Board](crate::board::Board) with win detection, tile counting
//!     and scoped speculative placement.
//! * Turn-taking on top of it as [Game](crate::game::Game), where X always moves first.
//! * Three tiers of automated opponents, selected by [Difficulty](crate::ai::Difficulty):
//!     * [RandomBot](crate::ai::simple::RandomBot),
//!         which simply picks a random empty tile.
//!     * [BlockingBot](crate::ai::simple::BlockingBot),
//!         which takes an immediate win, blocks an immediate loss and plays randomly otherwise.
//!     * [MinimaxBot](crate::ai::minimax::MinimaxBot),
//!         which plays perfectly by searching the entire game tree with plain minimax.
//! * A persistent [ScoreBoard](crate::score::ScoreBoard) of wins per user.
//! * A bot vs bot game runner to compare playing strength, see [bot_game](crate::util::bot_game).
//!
//! Bots never modify the board they are given, all lookahead happens on a private copy.
//!
//! # Examples
//!
//! ## Let the perfect player pick a move.
//!
//! ```
//! # use tictactoe_engine::ai::{select_move, Difficulty, Sides};
//! # use tictactoe_engine::board::{Board, Coord};
//! # use tictactoe_engine::util::tiny::consistent_rng;
//! let board: Board = "oo./xx./...".parse().unwrap();
//! println!("{}", board);
//!
//! let mv = select_move(&board, Difficulty::Hard, Sides::default(), &mut consistent_rng());
//! assert_eq!(mv, Some(Coord::from_i(2)));
//! ```
//!
//! ## Play a full game against the medium bot.
//!
//! ```
//! # use tictactoe_engine::ai::{Difficulty, DifficultyBot, Sides};
//! # use tictactoe_engine::board::Coord;
//! # use tictactoe_engine::game::Game;
//! # use rand::thread_rng;
//! let mut game = Game::new();
//! let mut bot = DifficultyBot::new(Difficulty::Medium, Sides::default(), thread_rng());
//!
//! while !game.is_done() {
//!     // the "human" always takes the first empty tile
//!     let first = Coord::all().find(|&c| game.board().is_empty_tile(c)).unwrap();
//!     game.play(first).unwrap();
//!     if !game.is_done() {
//!         game.play_bot(&mut bot).unwrap();
//!     }
//! }
//! println!("{}", game);
//! ```

pub mod board;
pub mod game;

pub mod wdl;

pub mod ai;

pub mod score;

pub mod util;

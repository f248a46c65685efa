//! Utilities for collecting game statistics and testing bot implementations.
use std::collections::HashSet;

use internal_iterator::InternalIterator;

use crate::ai::Bot;
use crate::game::Game;

/// The number of legal games that continue for `depth` more moves, including transpositions.
/// See <https://www.chessprogramming.org/Perft>.
pub fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    if game.is_done() {
        return 0;
    }

    let mut p = 0;
    game.board().available_moves().for_each(|mv| {
        let mut child = game.clone();
        if child.play(mv).is_ok() {
            p += perft(&child, depth - 1);
        }
    });
    p
}

/// Structure returned by [`average_game_stats`].
#[derive(Debug)]
pub struct GameStats {
    pub game_length: f32,
    pub available_moves: f32,
}

/// Return `GameStats` estimated from `n` games starting from `start` where `bot` plays both sides.
/// Games where the bot has no move left end early.
pub fn average_game_stats(start: &Game, mut bot: impl Bot, n: u64) -> GameStats {
    let mut total_moves = 0;
    let mut total_positions = 0;

    for _ in 0..n {
        let mut game = start.clone();
        while !game.is_done() {
            total_moves += game.board().available_moves().count();
            total_positions += 1;

            match game.play_bot(&mut bot) {
                Ok(Some(_)) => {}
                Ok(None) | Err(_) => break,
            }
        }
    }

    GameStats {
        game_length: total_positions as f32 / n.max(1) as f32,
        available_moves: total_moves as f32 / total_positions.max(1) as f32,
    }
}

/// Generate the set of all possible games reachable from the given game, without duplicates.
pub fn all_possible_games(start: &Game, include_done: bool) -> Vec<Game> {
    let mut set = HashSet::new();
    let mut result = vec![];
    all_possible_games_impl(start, include_done, &mut result, &mut set);
    result
}

fn all_possible_games_impl(start: &Game, include_done: bool, result: &mut Vec<Game>, set: &mut HashSet<Game>) {
    if !include_done && start.is_done() {
        return;
    }
    if !set.insert(start.clone()) {
        return;
    }
    result.push(start.clone());
    if start.is_done() {
        return;
    }

    start.board().available_moves().for_each(|mv| {
        if let Ok(child) = start.clone_and_play(mv) {
            all_possible_games_impl(&child, include_done, result, set)
        }
    })
}

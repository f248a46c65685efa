use internal_iterator::InternalIterator;

use tictactoe_engine::ai::simple::{blocking_move, random_move, winning_move, BlockingBot, RandomBot};
use tictactoe_engine::ai::{Bot, Sides};
use tictactoe_engine::board::{Board, Coord, Player};
use tictactoe_engine::game::Game;
use tictactoe_engine::util::game_stats::all_possible_games;
use tictactoe_engine::util::tiny::consistent_rng;

use crate::util::test_sampler_uniform;

#[test]
fn easy_always_legal() {
    let mut bot = RandomBot::new(consistent_rng());

    for game in all_possible_games(&Game::new(), false) {
        let board = game.board();
        for _ in 0..10 {
            let mv = bot.select_move(board).unwrap();
            assert!(board.is_empty_tile(mv), "picked occupied {:?} on {}", mv, board);
        }
    }
}

#[test]
fn easy_uniform() {
    let mut rng = consistent_rng();
    for s in [".........", "x.o/.x./o..", "xox/xo./oxx"] {
        let board: Board = s.parse().unwrap();
        let expected: Vec<Coord> = board.available_moves().collect();
        test_sampler_uniform(&expected, || random_move(&board, &mut rng));
    }
}

#[test]
fn easy_full_board() {
    let board: Board = "xox/xoo/oxx".parse().unwrap();
    test_sampler_uniform(&[], || random_move(&board, &mut consistent_rng()));
}

#[test]
fn medium_blocks_immediate_threat() {
    let mut rng = consistent_rng();

    // X threatens the middle row, O has nothing to win with
    let board: Board = "o../xx./...".parse().unwrap();
    for _ in 0..100 {
        assert_eq!(blocking_move(&board, Sides::default(), &mut rng), Some(Coord::from_i(5)));
    }

    // X threatens the anti-diagonal
    let board: Board = "..x/ox./...".parse().unwrap();
    assert_eq!(blocking_move(&board, Sides::default(), &mut rng), Some(Coord::from_i(6)));
}

#[test]
fn medium_prefers_own_win() {
    let mut rng = consistent_rng();

    // X threatens the left column, O can complete the right column
    let board: Board = "x.o/x.o/...".parse().unwrap();
    for _ in 0..100 {
        assert_eq!(blocking_move(&board, Sides::default(), &mut rng), Some(Coord::from_i(8)));
    }
}

#[test]
fn medium_blocks_lowest_threat() {
    // X threatens both 2 and 6, a fork that can't be fully blocked
    let board: Board = "xx./xo./..o".parse().unwrap();
    let mut bot = BlockingBot::new(Sides::default(), consistent_rng());
    assert_eq!(bot.select_move(&board), Some(Coord::from_i(2)));
}

#[test]
fn medium_falls_back_to_random() {
    let board: Board = "x../.o./...".parse().unwrap();
    assert_eq!(winning_move(&board, Player::O), None);
    assert_eq!(winning_move(&board, Player::X), None);

    let expected: Vec<Coord> = board.available_moves().collect();
    let mut rng = consistent_rng();
    test_sampler_uniform(&expected, || blocking_move(&board, Sides::default(), &mut rng));
}

#[test]
fn medium_priority_exhaustive() {
    let sides = Sides::default();
    let mut bot = BlockingBot::new(sides, consistent_rng());

    for game in all_possible_games(&Game::new(), false) {
        if game.next_player() != sides.ai {
            continue;
        }

        let board = *game.board();
        let mv = bot.select_move(&board).unwrap();
        let mut scratch = board;

        if let Some(win) = winning_move(&board, sides.ai) {
            assert_eq!(mv, win, "{}", board);
            assert!(scratch.is_winning_move(mv, sides.ai));
        } else if let Some(block) = winning_move(&board, sides.human) {
            assert_eq!(mv, block, "{}", board);
            assert!(scratch.is_winning_move(mv, sides.human));
        } else {
            assert!(board.is_empty_tile(mv));
        }
    }
}

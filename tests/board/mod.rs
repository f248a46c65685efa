use internal_iterator::InternalIterator;

use tictactoe_engine::board::{Board, Coord, Outcome, Player, Terminal, LINES, WIN_SCORE};
use tictactoe_engine::game::Game;
use tictactoe_engine::util::game_stats::all_possible_games;

fn board_with(tiles: &[(usize, Player)]) -> Board {
    let mut board = Board::default();
    for &(i, player) in tiles {
        board.set_tile(Coord::from_i(i), Some(player));
    }
    board
}

#[test]
fn lines_cover_rows_columns_diagonals() {
    let indices: Vec<[usize; 3]> = LINES.iter().map(|line| line.map(Coord::i)).collect();
    assert_eq!(
        indices,
        vec![
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ]
    );
}

#[test]
fn has_won_every_line() {
    for line in LINES {
        for player in Player::BOTH {
            let board = board_with(&line.map(|c| (c.i(), player)));
            println!("{}", board);

            assert!(board.has_won(player), "{:?} should have won {:?}", player, line);
            assert!(!board.has_won(player.other()));
            assert_eq!(board.terminal(player), Terminal::WinFor(player));
            assert_eq!(board.terminal(player.other()), Terminal::WinFor(player));
        }
    }
}

#[test]
fn has_won_with_noise_elsewhere() {
    // the other player owns every tile outside of the line but never a full line of their own
    for (line_i, line) in LINES.iter().enumerate() {
        for player in Player::BOTH {
            let mut board = Board::default();
            for coord in Coord::all() {
                let tile = if line.contains(&coord) { player } else { player.other() };
                board.set_tile(coord, Some(tile));
            }

            assert!(board.has_won(player), "line {} for {:?}", line_i, player);

            let other_has_line = LINES
                .iter()
                .any(|other| other.iter().all(|&c| board.tile(c) == Some(player.other())));
            assert_eq!(board.has_won(player.other()), other_has_line, "{}", board);
        }
    }
}

#[test]
fn two_in_a_row_is_not_a_win() {
    let board: Board = "xx./oo./...".parse().unwrap();
    assert!(!board.has_won(Player::X));
    assert!(!board.has_won(Player::O));
    assert_eq!(board.terminal(Player::O), Terminal::OngoingOrDraw);
    assert_eq!(board.outcome(), None);
}

#[test]
fn both_players_can_be_reported() {
    // malformed, but the predicate is evaluated per player independently
    let board: Board = "xxx/ooo/...".parse().unwrap();
    assert!(board.has_won(Player::X));
    assert!(board.has_won(Player::O));
    assert_eq!(board.terminal(Player::O), Terminal::WinFor(Player::O));
    assert_eq!(board.outcome(), Some(Outcome::WonBy(Player::X)));
}

#[test]
fn terminal_scores() {
    assert_eq!(Terminal::WinFor(Player::O).score(Player::O), WIN_SCORE);
    assert_eq!(Terminal::WinFor(Player::X).score(Player::O), -WIN_SCORE);
    assert_eq!(Terminal::OngoingOrDraw.score(Player::X), 0);
}

#[test]
fn count_tiles_sums_to_nine() {
    for game in all_possible_games(&Game::new(), true) {
        let board = game.board();
        let total = board.count_tiles(None) + board.count_tiles(Some(Player::X)) + board.count_tiles(Some(Player::O));
        assert_eq!(total, 9, "{}", board);

        assert_eq!(board.is_full(), board.count_tiles(None) == 0);
        if !game.is_done() {
            assert_eq!(board.available_moves().count(), board.count_tiles(None));
        }
    }
}

#[test]
fn count_tiles_simple() {
    let board: Board = "xo./.x./..o".parse().unwrap();
    assert_eq!(board.count_tiles(None), 5);
    assert_eq!(board.count_tiles(Some(Player::X)), 2);
    assert_eq!(board.count_tiles(Some(Player::O)), 2);
}

#[test]
fn full_board_outcome() {
    let draw: Board = "xox/xoo/oxx".parse().unwrap();
    assert!(draw.is_full());
    assert_eq!(draw.outcome(), Some(Outcome::Draw));
    assert_eq!(draw.terminal(Player::O), Terminal::OngoingOrDraw);

    let full_win: Board = "xxo/oox/xxx".parse().unwrap();
    assert_eq!(full_win.outcome(), Some(Outcome::WonBy(Player::X)));
}

#[test]
fn available_moves_in_index_order() {
    let board: Board = "x.o/.x./o..".parse().unwrap();
    let moves: Vec<usize> = board.available_moves().map(Coord::i).collect();
    assert_eq!(moves, vec![1, 3, 5, 7, 8]);
}

#[test]
fn winning_move_is_speculative() {
    let mut board: Board = "oo./xx./...".parse().unwrap();
    let before = board;

    assert!(board.is_winning_move(Coord::from_i(2), Player::O));
    assert!(!board.is_winning_move(Coord::from_i(2), Player::X));
    assert!(board.is_winning_move(Coord::from_i(5), Player::X));
    // occupied tiles are never winning moves
    assert!(!board.is_winning_move(Coord::from_i(0), Player::O));

    assert_eq!(board, before);
}

#[test]
fn display_and_parse_agree() {
    let board: Board = "xo./.x./..o".parse().unwrap();
    assert_eq!(format!("{}", board), "+---+\n|xo.|\n|.x.|\n|..o|\n+---+\n");
    assert_eq!(board.to_compact_string().parse::<Board>().unwrap(), board);
    assert_eq!(format!("{:?}", board), "Board(xo./.x./..o)");
}

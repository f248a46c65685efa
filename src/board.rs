use std::fmt::{Debug, Display, Formatter};
use std::iter::Map;
use std::ops::{Deref, DerefMut, Range};
use std::str::FromStr;

use internal_iterator::{InternalIterator, IteratorExt};

/// One of the two players.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    X,
    O,
}

/// The absolute outcome for a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    WonBy(Player),
    Draw,
}

/// A tile on the 3x3 grid, stored as the index `row * 3 + col`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coord(u8);

/// The terminal status of a board as seen by the search.
/// A full board without a winner and an unfinished board both map to [Terminal::OngoingOrDraw].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Terminal {
    OngoingOrDraw,
    WinFor(Player),
}

/// The score assigned to a won position, a lost position scores the negation.
pub const WIN_SCORE: i32 = 10;

/// The 3x3 grid. Each tile is either empty (`None`) or owned by a player.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    tiles: [Option<Player>; 9],
}

/// The 8 lines that win the game when fully owned by a single player:
/// 3 rows, 3 columns, the main diagonal and the anti-diagonal.
pub const LINES: [[Coord; 3]; 8] = [
    [Coord(0), Coord(1), Coord(2)],
    [Coord(3), Coord(4), Coord(5)],
    [Coord(6), Coord(7), Coord(8)],
    [Coord(0), Coord(3), Coord(6)],
    [Coord(1), Coord(4), Coord(7)],
    [Coord(2), Coord(5), Coord(8)],
    [Coord(0), Coord(4), Coord(8)],
    [Coord(2), Coord(4), Coord(6)],
];

impl Player {
    pub const BOTH: [Player; 2] = [Player::X, Player::O];

    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    pub fn sign<V: num_traits::One + std::ops::Neg<Output = V>>(self, pov: Player) -> V {
        if self == pov {
            V::one()
        } else {
            -V::one()
        }
    }
}

impl Coord {
    pub const COUNT: usize = 9;

    pub fn from_rc(row: usize, col: usize) -> Self {
        assert!(row < 3, "row {} out of range", row);
        assert!(col < 3, "col {} out of range", col);
        Coord((row * 3 + col) as u8)
    }

    pub fn from_i(i: usize) -> Self {
        assert!(i < Self::COUNT, "index {} out of range", i);
        Coord(i as u8)
    }

    /// Like [Coord::from_i] but returns `None` instead of panicking.
    pub fn try_from_i(i: usize) -> Option<Self> {
        if i < Self::COUNT {
            Some(Coord(i as u8))
        } else {
            None
        }
    }

    /// All coordinates in increasing index order, row by row.
    pub fn all() -> Map<Range<usize>, fn(usize) -> Coord> {
        let f: fn(usize) -> Coord = Coord::from_i;
        (0..Self::COUNT).map(f)
    }

    pub fn i(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.i() / 3
    }

    pub fn col(self) -> usize {
        self.i() % 3
    }
}

impl Terminal {
    /// The leaf score from the POV of `ai`: a win for `ai` is [WIN_SCORE],
    /// a win for the opponent is `-WIN_SCORE` and everything else is zero.
    pub fn score(self, ai: Player) -> i32 {
        match self {
            Terminal::OngoingOrDraw => 0,
            Terminal::WinFor(player) => player.sign::<i32>(ai) * WIN_SCORE,
        }
    }
}

impl Board {
    pub fn tiles(&self) -> &[Option<Player>; 9] {
        &self.tiles
    }

    pub fn tile(&self, coord: Coord) -> Option<Player> {
        self.tiles[coord.i()]
    }

    /// Overwrite a single tile. No rules are checked, see [crate::game::Game] for turn-taking.
    pub fn set_tile(&mut self, coord: Coord, tile: Option<Player>) {
        self.tiles[coord.i()] = tile;
    }

    pub fn is_empty_tile(&self, coord: Coord) -> bool {
        self.tile(coord).is_none()
    }

    /// Whether `player` fully owns any of the [LINES].
    ///
    /// This is a pure predicate per player, on a malformed board both players can have won.
    pub fn has_won(&self, player: Player) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&coord| self.tile(coord) == Some(player)))
    }

    /// The number of tiles equal to `tile`, use `None` to count empty tiles.
    pub fn count_tiles(&self, tile: Option<Player>) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn is_full(&self) -> bool {
        self.count_tiles(None) == 0
    }

    /// The terminal status from the POV of the search, checking for a win by `ai` first.
    pub fn terminal(&self, ai: Player) -> Terminal {
        if self.has_won(ai) {
            Terminal::WinFor(ai)
        } else if self.has_won(ai.other()) {
            Terminal::WinFor(ai.other())
        } else {
            Terminal::OngoingOrDraw
        }
    }

    /// The outcome of this board, `None` if the game is still running.
    /// A win by X is checked before a win by O.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.has_won(Player::X) {
            Some(Outcome::WonBy(Player::X))
        } else if self.has_won(Player::O) {
            Some(Outcome::WonBy(Player::O))
        } else if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// The empty tiles in increasing index order.
    pub fn available_moves(&self) -> impl InternalIterator<Item = Coord> + '_ {
        Coord::all().filter(move |&coord| self.is_empty_tile(coord)).into_internal()
    }

    /// Temporarily place `player` on the empty tile `coord`, run `f` on the modified board
    /// and clear the tile again before returning, including when `f` panics.
    pub fn speculate<R>(&mut self, coord: Coord, player: Player, f: impl FnOnce(&mut Board) -> R) -> R {
        let mut speculation = Speculation::new(self, coord, player);
        f(&mut *speculation)
    }

    /// Whether placing `player` on the empty tile `coord` would complete a line for them.
    pub fn is_winning_move(&mut self, coord: Coord, player: Player) -> bool {
        self.is_empty_tile(coord) && self.speculate(coord, player, |board| board.has_won(player))
    }

    pub fn to_compact_string(&self) -> String {
        let mut s = String::with_capacity(11);
        for coord in Coord::all() {
            if coord.i() != 0 && coord.col() == 0 {
                s.push('/');
            }
            s.push(tile_to_char(self.tile(coord)));
        }
        s
    }
}

/// Guard that clears a speculatively placed tile when dropped.
struct Speculation<'a> {
    board: &'a mut Board,
    coord: Coord,
}

impl<'a> Speculation<'a> {
    fn new(board: &'a mut Board, coord: Coord, player: Player) -> Self {
        assert!(
            board.is_empty_tile(coord),
            "cannot speculate on occupied tile {} of {:?}",
            coord,
            board
        );
        board.set_tile(coord, Some(player));
        Speculation { board, coord }
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Speculation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.board.set_tile(self.coord, None);
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("invalid board string {input:?}, expected 9 tiles out of 'x', 'o', '.', '_', '-', ' ' with optional '/' row separators")]
pub struct InvalidBoardString {
    pub input: String,
}

impl FromStr for Board {
    type Err = InvalidBoardString;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidBoardString { input: s.to_owned() };

        let (_, rows) = parse::board(s.trim_end_matches(|c: char| c == '\r' || c == '\n')).map_err(|_| err())?;

        let mut board = Board::default();
        for (row, tiles) in rows.iter().enumerate() {
            for (col, &tile) in tiles.iter().enumerate() {
                board.set_tile(Coord::from_rc(row, col), tile);
            }
        }
        Ok(board)
    }
}

mod parse {
    use nom::branch::alt;
    use nom::character::complete::{char, one_of};
    use nom::combinator::{eof, opt, value};
    use nom::multi::count;
    use nom::sequence::tuple;
    use nom::IResult;

    use crate::board::Player;

    type Row = Vec<Option<Player>>;

    fn tile(input: &str) -> IResult<&str, Option<Player>> {
        alt((
            value(Some(Player::X), one_of("xX")),
            value(Some(Player::O), one_of("oO")),
            value(None, one_of("._- ")),
        ))(input)
    }

    fn row(input: &str) -> IResult<&str, Row> {
        count(tile, 3)(input)
    }

    pub fn board(input: &str) -> IResult<&str, [Row; 3]> {
        let (left, (a, _, b, _, c, _)) = tuple((row, opt(char('/')), row, opt(char('/')), row, eof))(input)?;
        Ok((left, [a, b, c]))
    }
}

fn tile_to_char(tile: Option<Player>) -> char {
    match tile {
        Some(Player::X) => 'x',
        Some(Player::O) => 'o',
        None => '.',
    }
}

impl Debug for Coord {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Coord({}, {})", self.row(), self.col())
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.i())
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({})", self.to_compact_string())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "+---+")?;
        for row in 0..3 {
            write!(f, "|")?;
            for col in 0..3 {
                write!(f, "{}", tile_to_char(self.tile(Coord::from_rc(row, col))))?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+---+")?;
        Ok(())
    }
}

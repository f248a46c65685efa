//! Utilities to run bots against each other and report the results.
use std::fmt::{Debug, Formatter};
use std::time::Instant;

use tracing::debug;

use crate::ai::Bot;
use crate::board::{Coord, Outcome, Player};
use crate::game::Game;
use crate::wdl::{POV, WDL};

/// Run `bot_l` against `bot_r` on the game given by `start`.
///
/// The bot factories receive the symbol the bot is going to play.
/// `games_per_side` games are run, except if `both_sides` is true, in
/// which case a match consists of two games per start position where players switch sides.
///
/// `callback` is called after every game with the running tally for `bot_l`.
#[must_use]
pub fn run<L: Bot, R: Bot>(
    start: impl Fn() -> Game,
    bot_l: impl Fn(Player) -> L,
    bot_r: impl Fn(Player) -> R,
    games_per_side: u32,
    both_sides: bool,
    callback: impl Fn(WDL<u32>, &Replay),
) -> BotGameResult {
    let game_count = if both_sides { 2 * games_per_side } else { games_per_side };

    let mut partial_wdl = WDL::<u32>::default();
    let mut replays = Vec::with_capacity(game_count as usize);

    for game_i in 0..game_count {
        let flip = both_sides && game_i % 2 == 1;
        let start = start();
        let player_l = if flip {
            start.next_player().other()
        } else {
            start.next_player()
        };

        let replay = play_single_game(
            &start,
            player_l,
            &mut bot_l(player_l),
            &mut bot_r(player_l.other()),
        );

        partial_wdl += replay.outcome.pov(replay.player_l).to_wdl();
        callback(partial_wdl, &replay);
        debug!(game_i, outcome = ?replay.outcome, moves = ?replay.moves, "bot game finished");

        replays.push(replay);
    }

    let total_time_l = replays.iter().map(|r| r.total_time_l).sum::<f32>();
    let total_time_r = replays.iter().map(|r| r.total_time_r).sum::<f32>();
    let move_count_l = replays.iter().map(|r| r.move_count_l).sum::<u32>();
    let move_count_r = replays.iter().map(|r| r.move_count_r).sum::<u32>();

    BotGameResult {
        game_count,
        average_game_length: replays.iter().map(|r| r.moves.len() as f32).sum::<f32>() / game_count.max(1) as f32,
        wdl_l: partial_wdl,
        time_l: total_time_l / move_count_l.max(1) as f32,
        time_r: total_time_r / move_count_r.max(1) as f32,
        replays,
    }
}

/// Play a single game starting from `start`, `bot_l` plays `player_l` and `bot_r` plays the other symbol.
///
/// Panics if a bot returns no move or an unavailable move on an unfinished game.
pub fn play_single_game(start: &Game, player_l: Player, bot_l: &mut impl Bot, bot_r: &mut impl Bot) -> Replay {
    let mut game = start.clone();

    let mut total_time_l = 0.0;
    let mut total_time_r = 0.0;
    let mut move_count_l: u32 = 0;
    let mut move_count_r: u32 = 0;
    let mut moves = vec![];

    loop {
        match game.outcome() {
            None => {
                let start_time = Instant::now();
                let is_l = game.next_player() == player_l;

                let played = if is_l {
                    game.play_bot(bot_l)
                } else {
                    game.play_bot(bot_r)
                };
                let mv = match played {
                    Ok(Some(mv)) => mv,
                    Ok(None) => panic!("bot returned no move on unfinished game\n{}", game),
                    Err(e) => panic!("bot played an invalid move: {}\n{}", e, game),
                };

                let elapsed = start_time.elapsed().as_secs_f32();
                if is_l {
                    total_time_l += elapsed;
                    move_count_l += 1;
                } else {
                    total_time_r += elapsed;
                    move_count_r += 1;
                }

                moves.push(mv);
            }
            Some(outcome) => {
                return Replay {
                    start: start.clone(),
                    player_l,
                    moves,
                    outcome,
                    total_time_l,
                    total_time_r,
                    move_count_l,
                    move_count_r,
                };
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Replay {
    pub start: Game,
    pub player_l: Player,

    pub moves: Vec<Coord>,
    pub outcome: Outcome,

    pub total_time_l: f32,
    pub total_time_r: f32,
    pub move_count_l: u32,
    pub move_count_r: u32,
}

/// Structure returned by the function [`run`].
pub struct BotGameResult {
    pub game_count: u32,
    pub replays: Vec<Replay>,

    pub average_game_length: f32,
    pub wdl_l: WDL<u32>,

    //time per move in seconds
    pub time_l: f32,
    pub time_r: f32,
}

impl Debug for BotGameResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BotGameResult {{")?;
        writeln!(
            f,
            "  {} games, average length {}",
            self.game_count, self.average_game_length
        )?;
        writeln!(f, "  left      {:?}", self.wdl_l)?;
        writeln!(
            f,
            "  left      {:.3?}",
            self.wdl_l.cast::<f32>() / self.game_count.max(1) as f32
        )?;
        writeln!(f, "  time_l:   {:.6}, time_r: {:.6}", self.time_l, self.time_r)?;
        writeln!(f, "}}")?;

        Ok(())
    }
}

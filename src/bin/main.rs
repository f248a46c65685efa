//! Terminal front end: play against the AI, let bots duel, or show the score board.
use std::cell::Cell;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictactoe_engine::ai::{Difficulty, DifficultyBot, Sides};
use tictactoe_engine::board::{Board, Coord, Outcome, Player};
use tictactoe_engine::game::{Game, MatchMode};
use tictactoe_engine::score::{validate_username, ScoreBoard, DEFAULT_SCORES_FILE};
use tictactoe_engine::util::bot_game;
use tictactoe_engine::util::tiny::seeded_rng;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Tic-tac-toe against a random, blocking or perfect opponent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game in the terminal
    Play(PlayArgs),

    /// Let two bots play against each other
    Duel(DuelArgs),

    /// Print the score board
    Scores(ScoresArgs),
}

#[derive(Args)]
struct PlayArgs {
    /// Strength of the automated opponent
    #[arg(short, long, env = "TTT_DIFFICULTY", default_value = "medium")]
    difficulty: Difficulty,

    /// Two humans share the keyboard instead of playing against the AI
    #[arg(long)]
    human_vs_human: bool,

    /// Let the AI play X and move first
    #[arg(long)]
    ai_first: bool,

    /// Record results against the AI under this name
    #[arg(short, long)]
    username: Option<String>,

    /// Score file to update
    #[arg(long, env = "TTT_SCORES", default_value = DEFAULT_SCORES_FILE)]
    scores: PathBuf,

    /// Seed for the AI, random if not given
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct DuelArgs {
    /// Difficulty of the bot playing X
    #[arg(long, default_value = "hard")]
    x: Difficulty,

    /// Difficulty of the bot playing O
    #[arg(long, default_value = "hard")]
    o: Difficulty,

    /// Number of games to play
    #[arg(short, long, default_value_t = 100)]
    games: u32,

    /// Also play every game with the bots switching sides
    #[arg(long)]
    swap: bool,

    /// Seed for the first bot, later bots use the following seeds
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Args)]
struct ScoresArgs {
    /// Score file to read
    #[arg(long, env = "TTT_SCORES", default_value = DEFAULT_SCORES_FILE)]
    scores: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play(args),
        Commands::Duel(args) => duel(args),
        Commands::Scores(args) => scores(args),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let mode = if args.human_vs_human {
        MatchMode::VsHuman
    } else {
        MatchMode::VsAi(args.difficulty)
    };

    if let Some(username) = &args.username {
        validate_username(username)?;
    }
    let mut scores = match (&args.username, mode) {
        (Some(_), MatchMode::VsAi(_)) => Some(
            ScoreBoard::load(&args.scores).with_context(|| format!("loading scores from {:?}", args.scores))?,
        ),
        _ => None,
    };

    let ai_player = if args.ai_first { Player::X } else { Player::O };
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut bot = match mode {
        MatchMode::VsHuman => None,
        MatchMode::VsAi(difficulty) => Some(DifficultyBot::new(difficulty, Sides::for_ai(ai_player), seeded_rng(seed))),
    };
    info!(?mode, ?ai_player, seed, "starting session");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut game = Game::new();

    loop {
        while !game.is_done() {
            print_board(game.board());

            match &mut bot {
                Some(bot) if game.next_player() == ai_player => match game.play_bot(bot)? {
                    Some(mv) => println!("AI plays {}", mv),
                    None => break,
                },
                _ => {
                    let line = match prompt(&mut input, &format!("{} to move (0-8 or row,col): ", game.next_player()))? {
                        Some(line) => line,
                        None => return Ok(()),
                    };

                    match parse_move(&line) {
                        Some(mv) => {
                            if let Err(e) = game.play(mv) {
                                println!("{}", e);
                            }
                        }
                        None => println!("invalid move {:?}", line.trim()),
                    }
                }
            }
        }

        print_board(game.board());
        match game.outcome() {
            Some(Outcome::WonBy(player)) => println!("{} wins!", player),
            Some(Outcome::Draw) | None => println!("Draw."),
        }

        if let (Some(scores), Some(username)) = (&mut scores, &args.username) {
            let won = game.outcome() == Some(Outcome::WonBy(ai_player.other()));
            let entry = scores.record(username, won)?;
            scores.save(&args.scores)?;
            println!(
                "{}: {} wins out of {} games ({:.1}%)",
                entry.username,
                entry.wins,
                entry.games_played,
                entry.win_ratio()
            );
        }

        match prompt(&mut input, "Play again? [y/N] ")? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => game.reset(),
            _ => return Ok(()),
        }
    }
}

fn duel(args: DuelArgs) -> Result<()> {
    let next_seed = Cell::new(args.seed);
    let bot_for = |difficulty: Difficulty| {
        let next_seed = &next_seed;
        move |player: Player| {
            let seed = next_seed.get();
            next_seed.set(seed + 1);
            DifficultyBot::new(difficulty, Sides::for_ai(player), seeded_rng(seed))
        }
    };

    let result = bot_game::run(
        Game::new,
        bot_for(args.x),
        bot_for(args.o),
        args.games,
        args.swap,
        |_, _| {},
    );

    println!("{} (left) vs {} (right)", args.x, args.o);
    println!("{:?}", result);
    Ok(())
}

fn scores(args: ScoresArgs) -> Result<()> {
    let scores = ScoreBoard::load(&args.scores).with_context(|| format!("loading scores from {:?}", args.scores))?;
    print!("{}", scores);
    Ok(())
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Parse either a tile index `0-8` or a `row,col` pair.
fn parse_move(s: &str) -> Option<Coord> {
    let s = s.trim();
    if let Ok(i) = s.parse::<usize>() {
        return Coord::try_from_i(i);
    }

    let (row, col) = s.split_once(|c: char| c == ',' || c.is_whitespace())?;
    let row = row.trim().parse::<usize>().ok()?;
    let col = col.trim().parse::<usize>().ok()?;
    if row < 3 && col < 3 {
        Some(Coord::from_rc(row, col))
    } else {
        None
    }
}

fn print_board(board: &Board) {
    for row in 0..3 {
        if row != 0 {
            println!("---+---+---");
        }
        let cells = (0..3)
            .map(|col| {
                let coord = Coord::from_rc(row, col);
                match board.tile(coord) {
                    Some(player) => player.to_char(),
                    None => char::from_digit(coord.i() as u32, 10).unwrap_or('?'),
                }
            })
            .map(|c| format!(" {} ", c))
            .collect::<Vec<_>>();
        println!("{}", cells.join("|"));
    }
    println!();
}

//! Persistent per-user win/loss statistics.
//!
//! The score file is plain text, one user per line: `<username> <wins> <games_played>`.
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{debug, warn};

/// The maximum number of users kept in a score board, new users are not recorded once it is full.
pub const MAX_SCORES: usize = 100;

/// The maximum number of characters in a username.
pub const MAX_USERNAME_LENGTH: usize = 15;

/// The default score file, relative to the working directory.
pub const DEFAULT_SCORES_FILE: &str = "scores.txt";

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("failed to {operation} score file {path:?}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid username {0:?}, must be 1 to {} characters without whitespace", MAX_USERNAME_LENGTH)]
    InvalidUsername(String),
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SessionScore {
    pub username: String,
    pub wins: u32,
    pub games_played: u32,
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ScoreBoard {
    entries: Vec<SessionScore>,
}

/// Check that `username` can be stored in a score file.
pub fn validate_username(username: &str) -> Result<(), ScoreError> {
    let len = username.chars().count();
    if len == 0 || len > MAX_USERNAME_LENGTH || username.chars().any(char::is_whitespace) {
        return Err(ScoreError::InvalidUsername(username.to_owned()));
    }
    Ok(())
}

impl SessionScore {
    pub fn new(username: impl Into<String>) -> Self {
        SessionScore {
            username: username.into(),
            wins: 0,
            games_played: 0,
        }
    }

    /// The percentage of games won, zero if no games were played yet.
    pub fn win_ratio(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f32 / self.games_played as f32 * 100.0
        }
    }

    fn parse_line(line: &str) -> Option<SessionScore> {
        let (username, wins, games_played) = line.split_whitespace().collect_tuple()?;
        Some(SessionScore {
            username: username.to_owned(),
            wins: wins.parse().ok()?,
            games_played: games_played.parse().ok()?,
        })
    }
}

impl ScoreBoard {
    /// Load the score board stored at `path`, creating an empty file if it doesn't exist yet.
    /// Lines that can't be parsed are skipped, and only the first [MAX_SCORES] entries are kept.
    pub fn load(path: impl AsRef<Path>) -> Result<ScoreBoard, ScoreError> {
        let path = path.as_ref();
        let io_err = |operation| move |source| ScoreError::Io {
            operation,
            path: path.to_owned(),
            source,
        };

        if !path.exists() {
            debug!(?path, "creating empty score file");
            File::create(path).map_err(io_err("create"))?;
            return Ok(ScoreBoard::default());
        }

        let file = File::open(path).map_err(io_err("open"))?;
        let (entries, overflow) = read_entries(BufReader::new(file), path).map_err(io_err("read"))?;
        if overflow {
            warn!(?path, "score file has more than {} entries, ignoring the rest", MAX_SCORES);
        }

        Ok(ScoreBoard { entries })
    }

    /// Write this score board to `path`, replacing the existing content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScoreError> {
        let path = path.as_ref();
        let io_err = |source| ScoreError::Io {
            operation: "write",
            path: path.to_owned(),
            source,
        };

        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        for entry in &self.entries {
            writeln!(writer, "{} {} {}", entry.username, entry.wins, entry.games_played).map_err(io_err)?;
        }
        writer.flush().map_err(io_err)?;

        debug!(?path, entries = self.entries.len(), "saved score file");
        Ok(())
    }

    pub fn entries(&self) -> &[SessionScore] {
        &self.entries
    }

    pub fn get(&self, username: &str) -> Option<&SessionScore> {
        self.entries.iter().find(|e| e.username == username)
    }

    /// Count a finished game for `username`, adding the user if there is room left.
    /// Returns the updated score, which is not stored if the board was already full.
    pub fn record(&mut self, username: &str, won: bool) -> Result<SessionScore, ScoreError> {
        validate_username(username)?;

        let index = match self.entries.iter().position(|e| e.username == username) {
            Some(index) => Some(index),
            None if self.entries.len() < MAX_SCORES => {
                self.entries.push(SessionScore::new(username));
                Some(self.entries.len() - 1)
            }
            None => None,
        };

        let mut detached = SessionScore::new(username);
        let entry = match index {
            Some(index) => &mut self.entries[index],
            None => {
                warn!(username, "score board is full, not recording new user");
                &mut detached
            }
        };

        entry.games_played += 1;
        if won {
            entry.wins += 1;
        }
        Ok(entry.clone())
    }
}

/// Parse score lines until [MAX_SCORES] entries are read, skipping blank and malformed lines.
/// The returned flag is true if more entries followed.
fn read_entries(reader: impl BufRead, path: &Path) -> std::io::Result<(Vec<SessionScore>, bool)> {
    let mut entries = vec![];

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if entries.len() >= MAX_SCORES {
            return Ok((entries, true));
        }

        match SessionScore::parse_line(&line) {
            Some(entry) => entries.push(entry),
            None => warn!(?path, line = i + 1, content = %line, "skipping malformed score line"),
        }
    }

    Ok((entries, false))
}

impl Display for ScoreBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<16} {:>8} {:>8} {:>8}", "player", "wins", "games", "ratio")?;
        for entry in &self.entries {
            writeln!(
                f,
                "{:<16} {:>8} {:>8} {:>7.1}%",
                entry.username,
                entry.wins,
                entry.games_played,
                entry.win_ratio()
            )?;
        }
        Ok(())
    }
}

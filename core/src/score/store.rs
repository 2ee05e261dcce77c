use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::Value;

use super::ScoreRecord;
use crate::error::PersistenceError;

/// Backing storage for the scoreboard history and the leaderboard.
pub trait ScoreStore {
    /// Entries that fail to decode are skipped.
    fn load_scoreboard(&mut self) -> Result<Vec<ScoreRecord>, PersistenceError>;

    fn save_scoreboard(&mut self, games: &[ScoreRecord]) -> Result<(), PersistenceError>;

    /// Entries that fail to decode come back as `None` so the caller can zero them.
    fn load_leaderboard(&mut self) -> Result<Vec<Option<ScoreRecord>>, PersistenceError>;

    fn save_leaderboard(&mut self, games: &[ScoreRecord]) -> Result<(), PersistenceError>;
}

#[derive(Serialize)]
struct GamesFile<'a> {
    games: &'a [ScoreRecord],
}

/// Two JSON documents of the shape `{"games": [...]}`.
#[derive(Clone, Debug)]
pub struct JsonScoreStore {
    scoreboard_path: PathBuf,
    leaderboard_path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(scoreboard_path: impl Into<PathBuf>, leaderboard_path: impl Into<PathBuf>) -> Self {
        Self {
            scoreboard_path: scoreboard_path.into(),
            leaderboard_path: leaderboard_path.into(),
        }
    }

    pub fn scoreboard_path(&self) -> &Path {
        &self.scoreboard_path
    }

    pub fn leaderboard_path(&self) -> &Path {
        &self.leaderboard_path
    }
}

impl ScoreStore for JsonScoreStore {
    fn load_scoreboard(&mut self) -> Result<Vec<ScoreRecord>, PersistenceError> {
        Ok(read_games(&self.scoreboard_path)?
            .into_iter()
            .flatten()
            .collect())
    }

    fn save_scoreboard(&mut self, games: &[ScoreRecord]) -> Result<(), PersistenceError> {
        write_games(&self.scoreboard_path, games)
    }

    fn load_leaderboard(&mut self) -> Result<Vec<Option<ScoreRecord>>, PersistenceError> {
        read_games(&self.leaderboard_path)
    }

    fn save_leaderboard(&mut self, games: &[ScoreRecord]) -> Result<(), PersistenceError> {
        write_games(&self.leaderboard_path, games)
    }
}

/// A missing file reads as no games. A document without a `games` array is
/// a decode error; individual malformed entries decode to `None`.
fn read_games(path: &Path) -> Result<Vec<Option<ScoreRecord>>, PersistenceError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let document: Value = serde_json::from_str(&raw).map_err(|source| PersistenceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let games = match document.get("games") {
        Some(Value::Array(games)) => games,
        _ => {
            return Err(PersistenceError::Decode {
                path: path.to_path_buf(),
                source: <serde_json::Error as serde::de::Error>::custom("expected a \"games\" array"),
            })
        }
    };

    Ok(games
        .iter()
        .map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect())
}

fn write_games(path: &Path, games: &[ScoreRecord]) -> Result<(), PersistenceError> {
    let io_error = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(&GamesFile { games }).map_err(|source| {
        PersistenceError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, json).map_err(io_error)
}

/// Keeps both documents in memory. Used when persistence is disabled.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    scoreboard: Vec<ScoreRecord>,
    leaderboard: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leaderboard(leaderboard: Vec<ScoreRecord>) -> Self {
        Self {
            scoreboard: Vec::new(),
            leaderboard,
        }
    }

    pub fn scoreboard(&self) -> &[ScoreRecord] {
        &self.scoreboard
    }

    pub fn leaderboard(&self) -> &[ScoreRecord] {
        &self.leaderboard
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_scoreboard(&mut self) -> Result<Vec<ScoreRecord>, PersistenceError> {
        Ok(self.scoreboard.clone())
    }

    fn save_scoreboard(&mut self, games: &[ScoreRecord]) -> Result<(), PersistenceError> {
        self.scoreboard = games.to_vec();
        Ok(())
    }

    fn load_leaderboard(&mut self) -> Result<Vec<Option<ScoreRecord>>, PersistenceError> {
        Ok(self.leaderboard.iter().cloned().map(Some).collect())
    }

    fn save_leaderboard(&mut self, games: &[ScoreRecord]) -> Result<(), PersistenceError> {
        self.leaderboard = games.to_vec();
        Ok(())
    }
}

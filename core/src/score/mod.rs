//! Running score of the current game, the best-of-3 leaderboard and their
//! persistence.

mod leaderboard;
mod store;
mod timestamp;

pub use leaderboard::{Leaderboard, LeaderboardRank};
pub use store::{JsonScoreStore, MemoryScoreStore, ScoreStore};
pub use timestamp::{format_timestamp, now_timestamp};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{SCORE_PER_MASS, SCORE_PER_SPEED};
use crate::error::PersistenceError;

/// One persisted game result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub date_time: String,
    pub score: u64,
    pub asteroids_destroyed: u32,
}

impl ScoreRecord {
    pub fn zero(date_time: &str) -> Self {
        Self {
            date_time: date_time.to_string(),
            score: 0,
            asteroids_destroyed: 0,
        }
    }
}

/// Points for destroying an asteroid of the given mass moving at the given speed.
pub fn asteroid_points(mass: f64, speed: f64) -> u64 {
    (SCORE_PER_MASS * mass + SCORE_PER_SPEED * speed).round().max(0.0) as u64
}

pub struct ScoreTracker {
    store: Box<dyn ScoreStore>,
    current: ScoreRecord,
    history: Vec<ScoreRecord>,
    leaderboard: Leaderboard,
}

impl ScoreTracker {
    /// Opens a new game stamped with `date_time`.
    ///
    /// Unreadable score files are logged and replaced by an empty history and
    /// a zeroed leaderboard; the next write overwrites them.
    pub fn load(mut store: Box<dyn ScoreStore>, date_time: &str) -> Self {
        let mut history = store.load_scoreboard().unwrap_or_else(|e| {
            warn!("scoreboard unreadable, starting a fresh history: {e}");
            Vec::new()
        });
        let leaderboard = match store.load_leaderboard() {
            Ok(entries) => Leaderboard::from_entries(entries, date_time),
            Err(e) => {
                warn!("leaderboard unreadable, starting from zero entries: {e}");
                Leaderboard::empty(date_time)
            }
        };

        let current = ScoreRecord::zero(date_time);
        history.push(current.clone());

        Self {
            store,
            current,
            history,
            leaderboard,
        }
    }

    /// Writes the scoreboard and leaderboard as they are now.
    ///
    /// Both writes are always attempted; the first failure is returned.
    pub fn persist(&mut self) -> Result<(), PersistenceError> {
        let scoreboard = self.store.save_scoreboard(&self.history);
        let leaderboard = self.store.save_leaderboard(self.leaderboard.slots());
        scoreboard.and(leaderboard)
    }

    /// Awards an asteroid kill and persists both records.
    ///
    /// In-memory state is updated even when the write fails. Returns the
    /// points awarded.
    pub fn add_score(&mut self, mass: f64, speed: f64) -> Result<u64, PersistenceError> {
        let points = asteroid_points(mass, speed);
        self.current.score += points;
        self.current.asteroids_destroyed += 1;

        self.history.push(self.current.clone());
        self.leaderboard.update(&self.current);
        self.persist()?;
        Ok(points)
    }

    pub fn score(&self) -> u64 {
        self.current.score
    }

    pub fn asteroids_destroyed(&self) -> u32 {
        self.current.asteroids_destroyed
    }

    pub fn date_time(&self) -> &str {
        &self.current.date_time
    }

    pub fn current(&self) -> &ScoreRecord {
        &self.current
    }

    pub fn history(&self) -> &[ScoreRecord] {
        &self.history
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use super::*;

    const DATE: &str = "16/10/2026 12:00:00";

    /// Reads succeed with nothing stored; every write fails.
    struct ReadOnlyStore;

    impl ScoreStore for ReadOnlyStore {
        fn load_scoreboard(&mut self) -> Result<Vec<ScoreRecord>, PersistenceError> {
            Ok(Vec::new())
        }

        fn save_scoreboard(&mut self, _: &[ScoreRecord]) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io {
                path: "scoreboard.json".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn load_leaderboard(&mut self) -> Result<Vec<Option<ScoreRecord>>, PersistenceError> {
            Err(PersistenceError::Io {
                path: "leaderboard.json".into(),
                source: io::Error::new(io::ErrorKind::Other, "corrupt disk"),
            })
        }

        fn save_leaderboard(&mut self, _: &[ScoreRecord]) -> Result<(), PersistenceError> {
            Ok(())
        }
    }

    /// Rejects scoreboard writes and keeps the last leaderboard it was given.
    #[derive(Clone, Default)]
    struct LeaderboardOnlyStore {
        saved: Rc<RefCell<Option<Vec<ScoreRecord>>>>,
    }

    impl ScoreStore for LeaderboardOnlyStore {
        fn load_scoreboard(&mut self) -> Result<Vec<ScoreRecord>, PersistenceError> {
            Ok(Vec::new())
        }

        fn save_scoreboard(&mut self, _: &[ScoreRecord]) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io {
                path: "scoreboard.json".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn load_leaderboard(&mut self) -> Result<Vec<Option<ScoreRecord>>, PersistenceError> {
            Ok(Vec::new())
        }

        fn save_leaderboard(&mut self, games: &[ScoreRecord]) -> Result<(), PersistenceError> {
            *self.saved.borrow_mut() = Some(games.to_vec());
            Ok(())
        }
    }

    fn tracker() -> ScoreTracker {
        ScoreTracker::load(Box::new(MemoryScoreStore::new()), DATE)
    }

    #[test]
    fn points_follow_mass_and_speed() {
        assert_eq!(asteroid_points(2.0, 3.0), 1_300);
        assert_eq!(asteroid_points(0.5, 0.2), 160);
        assert_eq!(asteroid_points(0.0, 0.0), 0);
        assert_eq!(asteroid_points(0.0, 0.01), 3);
    }

    #[test]
    fn new_game_starts_at_zero_with_a_history_entry() {
        let tracker = tracker();
        assert_eq!(tracker.score(), 0);
        assert_eq!(tracker.asteroids_destroyed(), 0);
        assert_eq!(tracker.history(), &[ScoreRecord::zero(DATE)]);
        assert_eq!(tracker.leaderboard().rank(), LeaderboardRank::Unranked);
    }

    #[test]
    fn add_score_accumulates_and_appends_snapshots() {
        let mut tracker = tracker();
        assert_eq!(tracker.add_score(2.0, 3.0).expect("memory store"), 1_300);
        assert_eq!(tracker.add_score(0.5, 0.2).expect("memory store"), 160);

        assert_eq!(tracker.score(), 1_460);
        assert_eq!(tracker.asteroids_destroyed(), 2);
        let scores: Vec<u64> = tracker.history().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![0, 1_300, 1_460]);
        assert_eq!(tracker.leaderboard().slots()[0], *tracker.current());
    }

    #[test]
    fn history_continues_previous_games() {
        let mut store = MemoryScoreStore::new();
        let earlier = ScoreRecord {
            date_time: "01/01/2026 08:00:00".to_string(),
            score: 900,
            asteroids_destroyed: 2,
        };
        store.save_scoreboard(&[earlier.clone()]).expect("memory store");

        let tracker = ScoreTracker::load(Box::new(store), DATE);
        assert_eq!(tracker.history(), &[earlier, ScoreRecord::zero(DATE)]);
    }

    #[test]
    fn unreadable_leaderboard_falls_back_to_zero_entries() {
        let tracker = ScoreTracker::load(Box::new(ReadOnlyStore), DATE);
        assert_eq!(tracker.leaderboard(), &Leaderboard::empty(DATE));
    }

    #[test]
    fn write_failures_surface_but_keep_the_score() {
        let mut tracker = ScoreTracker::load(Box::new(ReadOnlyStore), DATE);
        let err = tracker
            .add_score(1.0, 1.0)
            .expect_err("writes are rejected");
        assert!(err.to_string().contains("scoreboard.json"));
        assert_eq!(tracker.score(), 500);
        assert_eq!(tracker.leaderboard().slots()[0].score, 500);
        assert!(tracker.persist().is_err());
    }

    #[test]
    fn failed_scoreboard_write_still_saves_the_leaderboard() {
        let store = LeaderboardOnlyStore::default();
        let saved = Rc::clone(&store.saved);
        let mut tracker = ScoreTracker::load(Box::new(store), DATE);

        for _ in 0..5 {
            assert!(tracker.add_score(2.0, 3.0).is_err());
        }

        let leaderboard = saved.borrow().clone().expect("leaderboard written");
        assert_eq!(leaderboard[0].score, 6_500);
        assert_eq!(leaderboard[0].asteroids_destroyed, 5);
        assert_eq!(leaderboard.as_slice(), tracker.leaderboard().slots());
    }
}

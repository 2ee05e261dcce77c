use tracing::info;

use super::ScoreRecord;
use crate::constants::LEADERBOARD_SLOTS;

const LAST_SLOT: usize = LEADERBOARD_SLOTS - 1;

/// Best position the current game has reached. Only ever promotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaderboardRank {
    Unranked,
    Third,
    Second,
    First,
}

impl LeaderboardRank {
    fn slot(self) -> Option<usize> {
        match self {
            Self::Unranked => None,
            Self::Third => Some(2),
            Self::Second => Some(1),
            Self::First => Some(0),
        }
    }

    fn from_slot(slot: usize) -> Self {
        match slot {
            0 => Self::First,
            1 => Self::Second,
            _ => Self::Third,
        }
    }
}

/// Three ranked slots, highest score first.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaderboard {
    slots: [ScoreRecord; LEADERBOARD_SLOTS],
    current_rank: LeaderboardRank,
}

impl Leaderboard {
    pub fn empty(date_time: &str) -> Self {
        Self {
            slots: std::array::from_fn(|_| ScoreRecord::zero(date_time)),
            current_rank: LeaderboardRank::Unranked,
        }
    }

    /// Builds the board from loaded entries; `None` marks an entry that failed
    /// to parse and counts as a zero entry. Missing slots are zero-filled and
    /// surplus entries dropped.
    pub fn from_entries(entries: Vec<Option<ScoreRecord>>, date_time: &str) -> Self {
        let mut board = Self::empty(date_time);
        for (slot, entry) in board.slots.iter_mut().zip(entries) {
            *slot = entry.unwrap_or_else(|| ScoreRecord::zero(date_time));
        }
        // Stable: equal scores keep their stored order.
        board.slots.sort_by(|a, b| b.score.cmp(&a.score));
        board
    }

    pub fn slots(&self) -> &[ScoreRecord; LEADERBOARD_SLOTS] {
        &self.slots
    }

    pub fn rank(&self) -> LeaderboardRank {
        self.current_rank
    }

    /// Feeds the current game's latest cumulative record through the rank
    /// promotion state machine. Returns `true` when the board changed.
    ///
    /// Unranked games enter the last slot once they strictly beat it. A ranked
    /// game overwrites its own slot and then climbs past every slot it
    /// strictly beats, shifting the previous occupants down by one.
    pub fn update(&mut self, record: &ScoreRecord) -> bool {
        let mut slot = match self.current_rank.slot() {
            Some(slot) => slot,
            None if record.score > self.slots[LAST_SLOT].score => LAST_SLOT,
            None => return false,
        };

        self.slots[slot] = record.clone();
        while slot > 0 && record.score > self.slots[slot - 1].score {
            self.slots.swap(slot - 1, slot);
            slot -= 1;
        }

        let rank = LeaderboardRank::from_slot(slot);
        if rank != self.current_rank {
            info!(?rank, score = record.score, "leaderboard promotion");
            self.current_rank = rank;
        }
        debug_assert!(self.is_sorted());
        true
    }

    fn is_sorted(&self) -> bool {
        self.slots.windows(2).all(|pair| pair[0].score >= pair[1].score)
    }
}

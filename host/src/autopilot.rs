//! Seed-driven stand-in for a human player.

use galaxy_raiders_core::{CommandSource, PlayerCommand, RandomSource, SeededRng};

const DEFAULT_FIRE_INTERVAL: u64 = 12;
const BOOST_CHANCE: f64 = 0.2;

const BOOSTS: [PlayerCommand; 4] = [
    PlayerCommand::MoveShipUp,
    PlayerCommand::MoveShipDown,
    PlayerCommand::MoveShipLeft,
    PlayerCommand::MoveShipRight,
];

/// Fires on a fixed cadence and boosts in random directions in between, so
/// missiles sweep the field. Never pauses.
#[derive(Clone, Debug)]
pub struct Autopilot {
    rng: SeededRng,
    fire_interval: u64,
    polls: u64,
}

impl Autopilot {
    pub fn new(seed: u32) -> Self {
        Self::with_fire_interval(seed, DEFAULT_FIRE_INTERVAL)
    }

    pub fn with_fire_interval(seed: u32, fire_interval: u64) -> Self {
        Self {
            // Decorrelated from the field's generator, which uses the same seed.
            rng: SeededRng::new(seed.rotate_left(16) ^ 0x9E37_79B9),
            fire_interval: fire_interval.max(1),
            polls: 0,
        }
    }
}

impl CommandSource for Autopilot {
    fn next_command(&mut self) -> Option<PlayerCommand> {
        self.polls += 1;
        if self.polls % self.fire_interval == 0 {
            return Some(PlayerCommand::LaunchMissile);
        }
        if self.rng.probability() < BOOST_CHANCE {
            return Some(BOOSTS[self.rng.index(BOOSTS.len())]);
        }
        None
    }
}

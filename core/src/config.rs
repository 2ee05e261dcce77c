use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::MILLISECONDS_PER_SECOND;
use crate::error::ConfigError;

pub const ENV_PREFIX: &str = "GR__CORE__GAME__GAME_ENGINE__";

pub const KEY_FRAME_RATE: &str = "FRAME_RATE";
pub const KEY_SPACEFIELD_WIDTH: &str = "SPACEFIELD_WIDTH";
pub const KEY_SPACEFIELD_HEIGHT: &str = "SPACEFIELD_HEIGHT";
pub const KEY_ASTEROID_PROBABILITY: &str = "ASTEROID_PROBABILITY";
pub const KEY_COEFFICIENT_RESTITUTION: &str = "COEFFICIENT_RESTITUTION";

const MAX_FRAME_RATE: u32 = 1_000;
const MAX_SPACEFIELD_DIMENSION: u32 = 100_000;

/// Engine options, built once at startup and handed to the engine by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    /// Ticks per second.
    pub frame_rate: u32,
    pub spacefield_width: u32,
    pub spacefield_height: u32,
    /// Per-tick chance of spawning an asteroid.
    pub asteroid_probability: f64,
    pub coefficient_restitution: f64,
}

impl GameConfig {
    /// Reads every option from `GR__CORE__GAME__GAME_ENGINE__<KEY>` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Reads every option through `lookup`, which receives the unprefixed key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            frame_rate: read_required(&lookup, KEY_FRAME_RATE)?,
            spacefield_width: read_required(&lookup, KEY_SPACEFIELD_WIDTH)?,
            spacefield_height: read_required(&lookup, KEY_SPACEFIELD_HEIGHT)?,
            asteroid_probability: read_required(&lookup, KEY_ASTEROID_PROBABILITY)?,
            coefficient_restitution: read_required(&lookup, KEY_COEFFICIENT_RESTITUTION)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(KEY_FRAME_RATE, f64::from(self.frame_rate), 1.0, f64::from(MAX_FRAME_RATE))?;
        check_range(
            KEY_SPACEFIELD_WIDTH,
            f64::from(self.spacefield_width),
            1.0,
            f64::from(MAX_SPACEFIELD_DIMENSION),
        )?;
        check_range(
            KEY_SPACEFIELD_HEIGHT,
            f64::from(self.spacefield_height),
            1.0,
            f64::from(MAX_SPACEFIELD_DIMENSION),
        )?;
        check_range(KEY_ASTEROID_PROBABILITY, self.asteroid_probability, 0.0, 1.0)?;
        check_range(
            KEY_COEFFICIENT_RESTITUTION,
            self.coefficient_restitution,
            0.0,
            1.0,
        )?;
        Ok(())
    }

    pub fn ms_per_frame(&self) -> u64 {
        MILLISECONDS_PER_SECOND / u64::from(self.frame_rate.max(1))
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.ms_per_frame())
    }

    pub fn width(&self) -> f64 {
        f64::from(self.spacefield_width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.spacefield_height)
    }
}

fn read_required<T, F>(lookup: &F, key: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or_else(|| ConfigError::Missing {
        key: key.to_string(),
    })?;
    raw.trim().parse::<T>().map_err(|_| ConfigError::Unparsable {
        key: key.to_string(),
        value: raw,
    })
}

fn check_range(key: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons, so test for containment instead of exclusion.
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(ConfigError::OutOfRange {
        key: key.to_string(),
        value,
        min,
        max,
    })
}

//! The fixed-tick game loop: input, update, render, sleep.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::collision::resolve_collisions;
use crate::config::GameConfig;
use crate::error::PersistenceError;
use crate::field::SpaceField;
use crate::rng::RandomSource;
use crate::score::ScoreTracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerCommand {
    MoveShipUp,
    MoveShipDown,
    MoveShipLeft,
    MoveShipRight,
    LaunchMissile,
    PauseGame,
}

/// Polled once per tick; `None` means no input this tick.
pub trait CommandSource {
    fn next_command(&mut self) -> Option<PlayerCommand>;
}

/// Receives the field after every tick, paused or not.
pub trait RenderSink {
    fn render(&mut self, tick: u64, field: &SpaceField);
}

/// Replays a fixed input tape, one slot per tick. Yields `None` once exhausted.
#[derive(Clone, Debug, Default)]
pub struct ScriptedCommands {
    tape: VecDeque<Option<PlayerCommand>>,
}

impl ScriptedCommands {
    pub fn new(tape: impl IntoIterator<Item = Option<PlayerCommand>>) -> Self {
        Self {
            tape: tape.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.tape.len()
    }
}

impl CommandSource for ScriptedCommands {
    fn next_command(&mut self) -> Option<PlayerCommand> {
        self.tape.pop_front().flatten()
    }
}

/// Sleep needed to hold a fixed frame interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `max(0, interval - elapsed)`.
    pub fn sleep_for(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }

    pub fn pace(&self, tick_started: Instant) {
        let remaining = self.sleep_for(tick_started.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Playing,
    Paused,
}

pub struct GameEngine<C, V> {
    config: GameConfig,
    field: SpaceField,
    controller: C,
    visualizer: V,
    tracker: ScoreTracker,
    mode: GameMode,
    tick_count: u64,
}

impl<C: CommandSource, V: RenderSink> GameEngine<C, V> {
    pub fn new(
        config: GameConfig,
        generator: Box<dyn RandomSource>,
        controller: C,
        visualizer: V,
        tracker: ScoreTracker,
    ) -> Self {
        debug_assert!(config.validate().is_ok(), "{config:?}");
        info!(
            width = config.spacefield_width,
            height = config.spacefield_height,
            frame_rate = config.frame_rate,
            date_time = tracker.date_time(),
            "game started"
        );

        Self {
            field: SpaceField::new(config.width(), config.height(), generator),
            config,
            controller,
            visualizer,
            tracker,
            mode: GameMode::Playing,
            tick_count: 0,
        }
    }

    /// Writes the opening scoreboard entry and the loaded leaderboard.
    pub fn setup_score_files(&mut self) -> Result<(), PersistenceError> {
        self.tracker.persist()
    }

    /// Runs ticks at the configured frame rate until `limit` ticks have run,
    /// or forever when `limit` is `None`. Score write failures are logged and
    /// the loop keeps going.
    pub fn execute(&mut self, limit: Option<u64>) {
        let pacer = FramePacer::new(self.config.frame_interval());
        let mut remaining = limit;
        while remaining != Some(0) {
            let started = Instant::now();
            self.tick_logged();
            pacer.pace(started);
            remaining = remaining.map(|left| left - 1);
        }
    }

    /// Runs exactly `ticks` ticks back to back, without sleeping.
    pub fn execute_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick_logged();
        }
    }

    fn tick_logged(&mut self) {
        if let Err(e) = self.tick() {
            warn!(tick = self.tick_count, "score write failed: {e}");
        }
    }

    /// One simulation step. The tick always completes; the first score write
    /// failure, if any, is returned afterwards.
    pub fn tick(&mut self) -> Result<(), PersistenceError> {
        self.tick_count += 1;
        self.process_player_input();
        let outcome = self.update_space_objects();
        self.visualizer.render(self.tick_count, &self.field);
        outcome
    }

    fn process_player_input(&mut self) {
        let Some(command) = self.controller.next_command() else {
            return;
        };
        match command {
            PlayerCommand::MoveShipUp => self.field.ship_mut().boost_up(),
            PlayerCommand::MoveShipDown => self.field.ship_mut().boost_down(),
            PlayerCommand::MoveShipLeft => self.field.ship_mut().boost_left(),
            PlayerCommand::MoveShipRight => self.field.ship_mut().boost_right(),
            PlayerCommand::LaunchMissile => self.field.generate_missile(),
            PlayerCommand::PauseGame => {
                self.mode = match self.mode {
                    GameMode::Playing => GameMode::Paused,
                    GameMode::Paused => GameMode::Playing,
                };
                info!(mode = ?self.mode, tick = self.tick_count, "pause toggled");
            }
        }
    }

    fn update_space_objects(&mut self) -> Result<(), PersistenceError> {
        if self.mode == GameMode::Paused {
            return Ok(());
        }

        let outcome = self.handle_collisions();
        self.move_space_objects();
        self.trim_space_objects();
        self.generate_asteroids();
        outcome
    }

    fn handle_collisions(&mut self) -> Result<(), PersistenceError> {
        let destroyed = resolve_collisions(&mut self.field, self.config.coefficient_restitution);

        let mut outcome = Ok(());
        for event in destroyed {
            match self.tracker.add_score(event.mass, event.speed) {
                Ok(points) => debug!(points, score = self.tracker.score(), "score awarded"),
                Err(e) if outcome.is_ok() => outcome = Err(e),
                Err(e) => warn!("score write failed: {e}"),
            }
        }
        outcome
    }

    fn move_space_objects(&mut self) {
        self.field.move_ship();
        self.field.move_asteroids();
        self.field.move_missiles();
        self.field.move_explosions();
    }

    fn trim_space_objects(&mut self) {
        self.field.trim_asteroids();
        self.field.trim_missiles();
        self.field.trim_explosions();
    }

    fn generate_asteroids(&mut self) {
        let draw = self.field.generator().probability();
        if draw <= self.config.asteroid_probability {
            self.field.generate_asteroid();
        }
    }
}

impl<C, V> GameEngine<C, V> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &SpaceField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut SpaceField {
        &mut self.field
    }

    pub fn tracker(&self) -> &ScoreTracker {
        &self.tracker
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == GameMode::Playing
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn visualizer(&self) -> &V {
        &self.visualizer
    }

    pub fn into_visualizer(self) -> V {
        self.visualizer
    }
}

#[cfg(test)]
mod tests;

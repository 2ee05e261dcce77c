use std::io;

use super::*;
use crate::field::{Asteroid, SpaceObject};
use crate::physics::{Point2D, Vector2D};
use crate::rng::{FixedSequence, SeededRng};
use crate::score::{MemoryScoreStore, ScoreRecord, ScoreStore};

const DATE: &str = "16/10/2026 09:30:00";

fn config(asteroid_probability: f64) -> GameConfig {
    GameConfig {
        frame_rate: 1_000,
        spacefield_width: 40,
        spacefield_height: 20,
        asteroid_probability,
        coefficient_restitution: 1.0,
    }
}

#[derive(Default)]
struct Recorder {
    frames: Vec<(u64, usize)>,
}

impl RenderSink for Recorder {
    fn render(&mut self, tick: u64, field: &SpaceField) {
        self.frames.push((tick, field.asteroids().len()));
    }
}

/// Loads nothing; every write is rejected.
struct FailingStore;

impl ScoreStore for FailingStore {
    fn load_scoreboard(&mut self) -> Result<Vec<ScoreRecord>, PersistenceError> {
        Ok(Vec::new())
    }

    fn save_scoreboard(&mut self, _: &[ScoreRecord]) -> Result<(), PersistenceError> {
        Err(PersistenceError::Io {
            path: "scoreboard.json".into(),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        })
    }

    fn load_leaderboard(&mut self) -> Result<Vec<Option<ScoreRecord>>, PersistenceError> {
        Ok(Vec::new())
    }

    fn save_leaderboard(&mut self, _: &[ScoreRecord]) -> Result<(), PersistenceError> {
        Ok(())
    }
}

fn engine_with(
    config: GameConfig,
    generator: Box<dyn RandomSource>,
    tape: Vec<Option<PlayerCommand>>,
    store: Box<dyn ScoreStore>,
) -> GameEngine<ScriptedCommands, Recorder> {
    GameEngine::new(
        config,
        generator,
        ScriptedCommands::new(tape),
        Recorder::default(),
        ScoreTracker::load(store, DATE),
    )
}

/// No spawns (0.5 never beats a zero probability) and no input.
fn quiet_engine(tape: Vec<Option<PlayerCommand>>) -> GameEngine<ScriptedCommands, Recorder> {
    engine_with(
        config(0.0),
        Box::new(FixedSequence::new(vec![0.5])),
        tape,
        Box::new(MemoryScoreStore::new()),
    )
}

fn asteroid_touching_ship(engine: &GameEngine<ScriptedCommands, Recorder>) -> Asteroid {
    let ship = engine.field().ship().center();
    Asteroid::new(
        ship.translate(Vector2D::new(1.5, 0.0)),
        Vector2D::ZERO,
        1.0,
        2.0,
    )
}

#[test]
fn ship_impact_scores_and_leaves_an_explosion() {
    let mut engine = quiet_engine(Vec::new());
    let asteroid = asteroid_touching_ship(&engine);
    engine.field_mut().add_asteroid(asteroid);

    engine.tick().expect("memory store never fails");

    assert_eq!(engine.tracker().score(), 400);
    assert_eq!(engine.tracker().asteroids_destroyed(), 1);
    assert!(engine.field().asteroids().is_empty());
    assert_eq!(engine.field().explosions().len(), 1);
    assert_eq!(engine.field().explosions()[0].ticks(), 1);
    let history: Vec<u64> = engine.tracker().history().iter().map(|r| r.score).collect();
    assert_eq!(history, vec![0, 400]);
}

#[test]
fn pause_freezes_the_simulation_until_toggled_back() {
    let mut engine = quiet_engine(vec![
        Some(PlayerCommand::PauseGame),
        None,
        Some(PlayerCommand::PauseGame),
    ]);
    engine.field_mut().add_asteroid(Asteroid::new(
        Point2D::new(5.0, 5.0),
        Vector2D::new(1.0, 0.0),
        1.0,
        1.0,
    ));

    engine.tick().expect("tick");
    assert_eq!(engine.mode(), GameMode::Paused);
    engine.tick().expect("tick");
    assert_eq!(engine.field().asteroids()[0].center(), Point2D::new(5.0, 5.0));

    engine.tick().expect("tick");
    assert!(engine.is_playing());
    assert_eq!(engine.field().asteroids()[0].center(), Point2D::new(6.0, 5.0));
}

#[test]
fn commands_boost_the_ship_and_launch_missiles() {
    let mut engine = quiet_engine(vec![
        Some(PlayerCommand::MoveShipRight),
        Some(PlayerCommand::LaunchMissile),
    ]);

    engine.tick().expect("tick");
    assert_eq!(engine.field().ship().center(), Point2D::new(21.0, 10.0));
    assert_eq!(engine.field().ship().velocity(), Vector2D::new(1.0, 0.0));

    engine.tick().expect("tick");
    let missiles = engine.field().missiles();
    assert_eq!(missiles.len(), 1);
    assert_eq!(missiles[0].velocity(), Vector2D::new(2.0, 0.0));
    assert!(missiles[0].center().x > engine.field().ship().center().x);
}

#[test]
fn asteroids_spawn_when_the_draw_is_within_probability() {
    // Every draw is 0.5: left edge, straight across, mid-range size.
    let mut engine = engine_with(
        config(1.0),
        Box::new(FixedSequence::new(vec![0.5])),
        Vec::new(),
        Box::new(MemoryScoreStore::new()),
    );
    engine.execute_ticks(3);

    let asteroids = engine.field().asteroids();
    assert_eq!(asteroids.len(), 3);
    assert!(asteroids.iter().all(|a| a.velocity().dx > 0.0));
    assert_eq!(asteroids[2].center(), Point2D::new(0.0, 10.0));
}

#[test]
fn every_tick_renders_even_while_paused() {
    let mut engine = quiet_engine(vec![Some(PlayerCommand::PauseGame)]);
    engine.execute_ticks(3);

    let ticks: Vec<u64> = engine.visualizer().frames.iter().map(|f| f.0).collect();
    assert_eq!(ticks, vec![1, 2, 3]);
    assert_eq!(engine.tick_count(), 3);
}

#[test]
fn same_seed_and_tape_replay_identically() {
    let tape: Vec<Option<PlayerCommand>> = (0..400)
        .map(|i| match i % 7 {
            0 => Some(PlayerCommand::LaunchMissile),
            1 => Some(PlayerCommand::MoveShipLeft),
            3 => Some(PlayerCommand::MoveShipUp),
            5 => Some(PlayerCommand::MoveShipRight),
            _ => None,
        })
        .collect();
    let run = || {
        let mut engine = engine_with(
            config(0.3),
            Box::new(SeededRng::new(1_234)),
            tape.clone(),
            Box::new(MemoryScoreStore::new()),
        );
        engine.execute_ticks(400);
        (
            engine.field().snapshot(),
            engine.tracker().history().to_vec(),
            engine.tracker().leaderboard().clone(),
        )
    };

    assert_eq!(run(), run());
}

#[test]
fn write_failures_are_returned_but_the_game_goes_on() {
    let mut engine = engine_with(
        config(0.0),
        Box::new(FixedSequence::new(vec![0.5])),
        Vec::new(),
        Box::new(FailingStore),
    );
    let asteroid = asteroid_touching_ship(&engine);
    engine.field_mut().add_asteroid(asteroid);

    let err = engine.tick().expect_err("store rejects writes");
    assert!(matches!(err, PersistenceError::Io { .. }));
    assert_eq!(engine.tracker().score(), 400);
    assert!(engine.field().asteroids().is_empty());

    engine.tick().expect("nothing to write");
    assert_eq!(engine.tick_count(), 2);
}

#[test]
fn paced_execution_stops_at_the_limit() {
    let mut engine = quiet_engine(Vec::new());
    engine.execute(Some(3));
    assert_eq!(engine.tick_count(), 3);
}

#[test]
fn pacer_sleeps_only_for_the_remaining_interval() {
    let pacer = FramePacer::new(Duration::from_millis(20));
    assert_eq!(pacer.sleep_for(Duration::from_millis(5)), Duration::from_millis(15));
    assert_eq!(pacer.sleep_for(Duration::from_millis(20)), Duration::ZERO);
    assert_eq!(pacer.sleep_for(Duration::from_millis(35)), Duration::ZERO);
}

#[test]
fn scripted_commands_run_dry() {
    let mut commands = ScriptedCommands::new(vec![Some(PlayerCommand::MoveShipUp), None]);
    assert_eq!(commands.remaining(), 2);
    assert_eq!(commands.next_command(), Some(PlayerCommand::MoveShipUp));
    assert_eq!(commands.next_command(), None);
    assert_eq!(commands.next_command(), None);
    assert_eq!(commands.remaining(), 0);
}

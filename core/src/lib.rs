pub mod collision;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod field;
pub mod physics;
pub mod rng;
pub mod score;

pub use config::GameConfig;
pub use engine::{
    CommandSource, FramePacer, GameEngine, GameMode, PlayerCommand, RenderSink, ScriptedCommands,
};
pub use error::{ConfigError, PersistenceError, VectorError};
pub use field::SpaceField;
pub use physics::{Point2D, Vector2D};
pub use rng::{RandomSource, SeededRng};
pub use score::{JsonScoreStore, MemoryScoreStore, ScoreRecord, ScoreStore, ScoreTracker};

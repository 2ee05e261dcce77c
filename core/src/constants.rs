// Ship
pub const SHIP_RADIUS: f64 = 1.0;
pub const SHIP_MASS: f64 = 10.0;
pub const SHIP_BOOST: f64 = 1.0;
pub const SHIP_MAX_SPEED: f64 = 5.0;

// Missiles
pub const MISSILE_RADIUS: f64 = 0.5;
pub const MISSILE_MASS: f64 = 1.0;
pub const MISSILE_SPEED: f64 = 2.0;
pub const MISSILE_MAX_TRAVEL: f64 = 60.0;
/// Gap left between the ship hull and a freshly launched missile.
pub const MISSILE_LAUNCH_GAP: f64 = 0.1;

// Asteroids
pub const ASTEROID_MIN_RADIUS: f64 = 0.5;
pub const ASTEROID_MAX_RADIUS: f64 = 2.0;
pub const ASTEROID_MIN_MASS: f64 = 0.5;
pub const ASTEROID_MAX_MASS: f64 = 3.0;
pub const ASTEROID_MIN_SPEED: f64 = 0.2;
pub const ASTEROID_MAX_SPEED: f64 = 1.0;
/// Half-width of the cone (radians) around the inward edge normal used for spawn headings.
pub const ASTEROID_HEADING_SPREAD: f64 = core::f64::consts::FRAC_PI_4;

// Explosions
pub const EXPLOSION_LIFETIME_TICKS: u32 = 6;

// Scoring
pub const SCORE_PER_MASS: f64 = 200.0;
pub const SCORE_PER_SPEED: f64 = 300.0;
pub const LEADERBOARD_SLOTS: usize = 3;

pub const MILLISECONDS_PER_SECOND: u64 = 1_000;

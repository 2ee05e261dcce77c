//! The space field owns every entity and is the only place they are created,
//! moved and removed.

mod entities;

pub use entities::{
    Asteroid, Body, Direction, Explosion, Missile, ObjectKind, Ship, SpaceObject,
};

use serde::Serialize;
use tracing::debug;

use crate::constants::{
    ASTEROID_HEADING_SPREAD, ASTEROID_MAX_MASS, ASTEROID_MAX_RADIUS, ASTEROID_MAX_SPEED,
    ASTEROID_MIN_MASS, ASTEROID_MIN_RADIUS, ASTEROID_MIN_SPEED, MISSILE_LAUNCH_GAP,
    MISSILE_RADIUS, MISSILE_SPEED,
};
use crate::physics::{Point2D, Vector2D};
use crate::rng::RandomSource;

const PRUNE_ASTEROIDS: u8 = 1 << 0;
const PRUNE_MISSILES: u8 = 1 << 1;

/// Stable handle into the field for the duration of one collision scan.
///
/// Indices stay valid until the next prune/trim, because destruction only
/// flags entities and spawning only appends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectId {
    Ship,
    Asteroid(usize),
    Missile(usize),
    Explosion(usize),
}

impl ObjectId {
    pub fn kind(self) -> ObjectKind {
        match self {
            Self::Ship => ObjectKind::Ship,
            Self::Asteroid(_) => ObjectKind::Asteroid,
            Self::Missile(_) => ObjectKind::Missile,
            Self::Explosion(_) => ObjectKind::Explosion,
        }
    }
}

pub struct SpaceField {
    width: f64,
    height: f64,
    generator: Box<dyn RandomSource>,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    missiles: Vec<Missile>,
    explosions: Vec<Explosion>,
    prune_mask: u8,
}

impl SpaceField {
    pub fn new(width: f64, height: f64, generator: Box<dyn RandomSource>) -> Self {
        debug_assert!(width > 0.0 && height > 0.0);
        Self {
            width,
            height,
            generator,
            ship: Ship::new(Point2D::new(width / 2.0, height / 2.0)),
            asteroids: Vec::new(),
            missiles: Vec::new(),
            explosions: Vec::new(),
            prune_mask: 0,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub(crate) fn generator(&mut self) -> &mut dyn RandomSource {
        self.generator.as_mut()
    }

    /// Every entity as one ordered sequence: ship, asteroids, missiles, explosions.
    pub fn space_objects(&self) -> Vec<ObjectId> {
        let mut ids = Vec::with_capacity(
            1 + self.asteroids.len() + self.missiles.len() + self.explosions.len(),
        );
        ids.push(ObjectId::Ship);
        ids.extend((0..self.asteroids.len()).map(ObjectId::Asteroid));
        ids.extend((0..self.missiles.len()).map(ObjectId::Missile));
        ids.extend((0..self.explosions.len()).map(ObjectId::Explosion));
        ids
    }

    pub fn object(&self, id: ObjectId) -> Option<&dyn SpaceObject> {
        match id {
            ObjectId::Ship => Some(&self.ship),
            ObjectId::Asteroid(index) => self.asteroids.get(index).map(|a| a as &dyn SpaceObject),
            ObjectId::Missile(index) => self.missiles.get(index).map(|m| m as &dyn SpaceObject),
            ObjectId::Explosion(index) => {
                self.explosions.get(index).map(|e| e as &dyn SpaceObject)
            }
        }
    }

    pub fn body(&self, id: ObjectId) -> Option<&Body> {
        self.object(id).map(|object| object.body())
    }

    pub fn body_mut(&mut self, id: ObjectId) -> Option<&mut Body> {
        match id {
            ObjectId::Ship => Some(self.ship.body_mut()),
            ObjectId::Asteroid(index) => self.asteroids.get_mut(index).map(|a| a.body_mut()),
            ObjectId::Missile(index) => self.missiles.get_mut(index).map(|m| m.body_mut()),
            ObjectId::Explosion(index) => self.explosions.get_mut(index).map(|e| e.body_mut()),
        }
    }

    /// Destroyed entities stay in place until the next sweep and must be ignored meanwhile.
    pub fn is_destroyed(&self, id: ObjectId) -> bool {
        match id {
            ObjectId::Ship => false,
            ObjectId::Asteroid(index) => self
                .asteroids
                .get(index)
                .map_or(true, Asteroid::is_destroyed),
            ObjectId::Missile(index) => self
                .missiles
                .get(index)
                .map_or(true, Missile::is_destroyed),
            ObjectId::Explosion(index) => index >= self.explosions.len(),
        }
    }

    pub fn add_asteroid(&mut self, asteroid: Asteroid) {
        self.asteroids.push(asteroid);
    }

    pub fn add_missile(&mut self, missile: Missile) {
        self.missiles.push(missile);
    }

    /// Spawns an asteroid on a random edge, heading into the field.
    pub fn generate_asteroid(&mut self) {
        let asteroid = self.create_asteroid();
        debug!(
            x = asteroid.center().x,
            y = asteroid.center().y,
            mass = asteroid.mass(),
            "asteroid spawned"
        );
        self.asteroids.push(asteroid);
    }

    fn create_asteroid(&mut self) -> Asteroid {
        use core::f64::consts::{FRAC_PI_2, PI};

        let (width, height) = (self.width, self.height);
        let rng = self.generator.as_mut();

        let (center, inward) = match rng.index(4) {
            0 => (Point2D::new(rng.range(0.0, width), height), -FRAC_PI_2),
            1 => (Point2D::new(rng.range(0.0, width), 0.0), FRAC_PI_2),
            2 => (Point2D::new(0.0, rng.range(0.0, height)), 0.0),
            _ => (Point2D::new(width, rng.range(0.0, height)), PI),
        };
        let heading = inward + rng.range(-ASTEROID_HEADING_SPREAD, ASTEROID_HEADING_SPREAD);
        let speed = rng.range(ASTEROID_MIN_SPEED, ASTEROID_MAX_SPEED);
        let radius = rng.range(ASTEROID_MIN_RADIUS, ASTEROID_MAX_RADIUS);
        let mass = rng.range(ASTEROID_MIN_MASS, ASTEROID_MAX_MASS);

        Asteroid::new(center, Vector2D::from_polar(speed, heading), radius, mass)
    }

    /// Launches a missile just ahead of the ship, along the ship's facing.
    pub fn generate_missile(&mut self) {
        let facing = self.ship.facing().unit();
        let offset = self.ship.radius() + MISSILE_RADIUS + MISSILE_LAUNCH_GAP;
        let center = self.ship.center().translate(facing * offset);

        self.missiles.push(Missile::new(center, facing * MISSILE_SPEED));
        debug!(missiles = self.missiles.len(), "missile launched");
    }

    /// Flags the asteroid as destroyed and leaves an explosion where it was.
    ///
    /// Returns the asteroid as it was at the moment of destruction, or `None`
    /// when it was already gone.
    pub fn explode_asteroid(&mut self, index: usize) -> Option<Asteroid> {
        let asteroid = self.asteroids.get_mut(index)?;
        if asteroid.is_destroyed() {
            return None;
        }
        asteroid.mark_destroyed();
        let destroyed = *asteroid;
        self.prune_mask |= PRUNE_ASTEROIDS;

        self.explosions
            .push(Explosion::new(destroyed.center(), destroyed.radius()));
        debug!(
            x = destroyed.center().x,
            y = destroyed.center().y,
            "asteroid exploded"
        );
        Some(destroyed)
    }

    pub fn destroy_missile(&mut self, index: usize) {
        if let Some(missile) = self.missiles.get_mut(index) {
            missile.mark_destroyed();
            self.prune_mask |= PRUNE_MISSILES;
        }
    }

    /// Sweeps entities flagged during the last collision scan.
    pub fn prune_destroyed(&mut self) {
        if self.prune_mask == 0 {
            return;
        }
        if (self.prune_mask & PRUNE_ASTEROIDS) != 0 {
            self.asteroids.retain(|entry| !entry.is_destroyed());
        }
        if (self.prune_mask & PRUNE_MISSILES) != 0 {
            self.missiles.retain(|entry| !entry.is_destroyed());
        }
        self.prune_mask = 0;
    }

    pub fn move_ship(&mut self) {
        self.ship.move_within(self.width, self.height);
    }

    pub fn move_asteroids(&mut self) {
        self.asteroids.iter_mut().for_each(Asteroid::advance);
    }

    pub fn move_missiles(&mut self) {
        self.missiles.iter_mut().for_each(Missile::advance);
    }

    pub fn move_explosions(&mut self) {
        self.explosions.iter_mut().for_each(Explosion::advance);
    }

    pub fn trim_asteroids(&mut self) {
        let (width, height) = (self.width, self.height);
        self.asteroids
            .retain(|entry| !entry.is_destroyed() && !entry.is_out_of_bounds(width, height));
    }

    pub fn trim_missiles(&mut self) {
        let (width, height) = (self.width, self.height);
        self.missiles.retain(|entry| !entry.is_expired(width, height));
    }

    pub fn trim_explosions(&mut self) {
        self.explosions.retain(|entry| !entry.is_expired());
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            width: self.width,
            height: self.height,
            ship: ObjectSnapshot::of(&self.ship),
            asteroids: self.asteroids.iter().map(|a| ObjectSnapshot::of(a)).collect(),
            missiles: self.missiles.iter().map(|m| ObjectSnapshot::of(m)).collect(),
            explosions: self.explosions.iter().map(|e| ObjectSnapshot::of(e)).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectSnapshot {
    pub symbol: char,
    pub center: Point2D,
    pub velocity: Vector2D,
    pub radius: f64,
}

impl ObjectSnapshot {
    fn of(object: &dyn SpaceObject) -> Self {
        Self {
            symbol: object.symbol(),
            center: object.center(),
            velocity: object.velocity(),
            radius: object.radius(),
        }
    }
}

/// Read-only copy of the field handed to render sinks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSnapshot {
    pub width: f64,
    pub height: f64,
    pub ship: ObjectSnapshot,
    pub asteroids: Vec<ObjectSnapshot>,
    pub missiles: Vec<ObjectSnapshot>,
    pub explosions: Vec<ObjectSnapshot>,
}

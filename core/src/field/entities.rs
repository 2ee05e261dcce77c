use serde::Serialize;

use crate::constants::{
    EXPLOSION_LIFETIME_TICKS, MISSILE_MASS, MISSILE_MAX_TRAVEL, MISSILE_RADIUS, SHIP_BOOST,
    SHIP_MASS, SHIP_MAX_SPEED, SHIP_RADIUS,
};
use crate::physics::{Point2D, Vector2D};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectKind {
    Ship,
    Asteroid,
    Missile,
    Explosion,
}

impl ObjectKind {
    pub fn symbol(self) -> char {
        match self {
            Self::Ship => '^',
            Self::Asteroid => '.',
            Self::Missile => '|',
            Self::Explosion => '*',
        }
    }

    /// Explosions are drawn but never take part in collisions.
    pub fn is_solid(self) -> bool {
        !matches!(self, Self::Explosion)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn unit(self) -> Vector2D {
        match self {
            Self::Up => Vector2D::new(0.0, 1.0),
            Self::Down => Vector2D::new(0.0, -1.0),
            Self::Left => Vector2D::new(-1.0, 0.0),
            Self::Right => Vector2D::new(1.0, 0.0),
        }
    }
}

/// Physical state shared by every space object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub center: Point2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub mass: f64,
}

impl Body {
    pub fn new(center: Point2D, velocity: Vector2D, radius: f64, mass: f64) -> Self {
        debug_assert!(radius > 0.0 && mass > 0.0);
        Self {
            center,
            velocity,
            radius,
            mass,
        }
    }

    /// Advances the center by one tick of velocity.
    pub fn advance(&mut self) {
        self.center = self.center.translate(self.velocity);
    }

    /// Circle-circle overlap, touching included.
    pub fn impacts(&self, other: &Body) -> bool {
        self.center.distance(other.center) <= self.radius + other.radius
    }

    /// True once the whole circle has left `[0, width] x [0, height]`.
    pub fn is_out_of_bounds(&self, width: f64, height: f64) -> bool {
        let Point2D { x, y } = self.center;
        x < -self.radius
            || y < -self.radius
            || x > width + self.radius
            || y > height + self.radius
    }
}

pub trait SpaceObject {
    fn kind(&self) -> ObjectKind;
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn symbol(&self) -> char {
        self.kind().symbol()
    }

    fn center(&self) -> Point2D {
        self.body().center
    }

    fn velocity(&self) -> Vector2D {
        self.body().velocity
    }

    fn mass(&self) -> f64 {
        self.body().mass
    }

    fn radius(&self) -> f64 {
        self.body().radius
    }

    fn impacts(&self, other: &dyn SpaceObject) -> bool {
        self.body().impacts(other.body())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ship {
    body: Body,
    facing: Direction,
}

impl Ship {
    pub fn new(center: Point2D) -> Self {
        Self {
            body: Body::new(center, Vector2D::ZERO, SHIP_RADIUS, SHIP_MASS),
            facing: Direction::Up,
        }
    }

    /// Direction of the most recent boost; missiles launch this way.
    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn boost(&mut self, direction: Direction) {
        let boosted = self.body.velocity + direction.unit() * SHIP_BOOST;
        self.body.velocity = boosted.clamp_magnitude(SHIP_MAX_SPEED);
        self.facing = direction;
    }

    pub fn boost_up(&mut self) {
        self.boost(Direction::Up);
    }

    pub fn boost_down(&mut self) {
        self.boost(Direction::Down);
    }

    pub fn boost_left(&mut self) {
        self.boost(Direction::Left);
    }

    pub fn boost_right(&mut self) {
        self.boost(Direction::Right);
    }

    /// Moves one tick and keeps the hull inside the field, dropping the velocity
    /// component that pushed it against a wall.
    pub fn move_within(&mut self, width: f64, height: f64) {
        self.body.advance();

        let radius = self.body.radius;
        let (x, vx) = clamp_axis(self.body.center.x, self.body.velocity.dx, radius, width);
        let (y, vy) = clamp_axis(self.body.center.y, self.body.velocity.dy, radius, height);
        self.body.center = Point2D::new(x, y);
        self.body.velocity = Vector2D::new(vx, vy);
    }
}

fn clamp_axis(position: f64, velocity: f64, radius: f64, extent: f64) -> (f64, f64) {
    let (low, high) = if extent >= 2.0 * radius {
        (radius, extent - radius)
    } else {
        (extent / 2.0, extent / 2.0)
    };

    if position < low {
        (low, velocity.max(0.0))
    } else if position > high {
        (high, velocity.min(0.0))
    } else {
        (position, velocity)
    }
}

impl SpaceObject for Ship {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Ship
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Asteroid {
    body: Body,
    destroyed: bool,
}

impl Asteroid {
    pub fn new(center: Point2D, velocity: Vector2D, radius: f64, mass: f64) -> Self {
        Self {
            body: Body::new(center, velocity, radius, mass),
            destroyed: false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    pub fn advance(&mut self) {
        self.body.advance();
    }

    pub fn is_out_of_bounds(&self, width: f64, height: f64) -> bool {
        self.body.is_out_of_bounds(width, height)
    }
}

impl SpaceObject for Asteroid {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Asteroid
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Missile {
    body: Body,
    travelled: f64,
    destroyed: bool,
}

impl Missile {
    pub fn new(center: Point2D, velocity: Vector2D) -> Self {
        Self {
            body: Body::new(center, velocity, MISSILE_RADIUS, MISSILE_MASS),
            travelled: 0.0,
            destroyed: false,
        }
    }

    pub fn travelled(&self) -> f64 {
        self.travelled
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    pub fn advance(&mut self) {
        self.body.advance();
        self.travelled += self.body.velocity.magnitude();
    }

    pub fn is_expired(&self, width: f64, height: f64) -> bool {
        self.destroyed
            || self.travelled >= MISSILE_MAX_TRAVEL
            || self.body.is_out_of_bounds(width, height)
    }
}

impl SpaceObject for Missile {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Missile
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    body: Body,
    ticks: u32,
}

impl Explosion {
    pub fn new(center: Point2D, radius: f64) -> Self {
        // Mass never matters (explosions are not solid) but stays positive like every body.
        Self {
            body: Body::new(center, Vector2D::ZERO, radius, 1.0),
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn advance(&mut self) {
        self.body.advance();
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn is_expired(&self) -> bool {
        self.ticks >= EXPLOSION_LIFETIME_TICKS
    }
}

impl SpaceObject for Explosion {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Explosion
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impacts_uses_sum_of_radii() {
        let ship = Ship::new(Point2D::new(0.0, 0.0));
        let near = Asteroid::new(Point2D::new(1.5, 0.0), Vector2D::ZERO, 1.0, 1.0);
        let far = Asteroid::new(Point2D::new(3.0, 0.0), Vector2D::ZERO, 1.0, 1.0);
        let touching = Asteroid::new(Point2D::new(2.0, 0.0), Vector2D::ZERO, 1.0, 1.0);

        assert!(ship.impacts(&near));
        assert!(near.impacts(&ship));
        assert!(!ship.impacts(&far));
        assert!(ship.impacts(&touching));
    }

    #[test]
    fn boost_adds_increment_and_sets_facing() {
        let mut ship = Ship::new(Point2D::new(10.0, 10.0));
        assert_eq!(ship.facing(), Direction::Up);

        ship.boost_right();
        ship.boost_right();
        ship.boost_down();
        assert_eq!(
            ship.velocity(),
            Vector2D::new(2.0 * SHIP_BOOST, -SHIP_BOOST)
        );
        assert_eq!(ship.facing(), Direction::Down);

        ship.boost_left();
        ship.boost_up();
        assert_eq!(ship.velocity(), Vector2D::new(SHIP_BOOST, 0.0));
        assert_eq!(ship.facing(), Direction::Up);
    }

    #[test]
    fn boost_is_clamped_to_max_speed() {
        let mut ship = Ship::new(Point2D::new(10.0, 10.0));
        for _ in 0..50 {
            ship.boost_up();
        }
        assert!((ship.velocity().magnitude() - SHIP_MAX_SPEED).abs() < 1e-9);
    }

    #[test]
    fn ship_is_kept_inside_the_field() {
        let mut ship = Ship::new(Point2D::new(2.0, 5.0));
        ship.boost_left();
        ship.boost_left();
        ship.boost_left();
        ship.move_within(20.0, 10.0);

        assert_eq!(ship.center(), Point2D::new(SHIP_RADIUS, 5.0));
        assert_eq!(ship.velocity(), Vector2D::ZERO);

        ship.boost_right();
        ship.move_within(20.0, 10.0);
        assert_eq!(ship.center(), Point2D::new(SHIP_RADIUS + SHIP_BOOST, 5.0));
    }

    #[test]
    fn asteroid_leaves_bounds_only_when_fully_outside() {
        let mut asteroid = Asteroid::new(Point2D::new(0.0, 5.0), Vector2D::new(-1.0, 0.0), 1.0, 1.0);
        assert!(!asteroid.is_out_of_bounds(10.0, 10.0));
        asteroid.advance();
        assert!(!asteroid.is_out_of_bounds(10.0, 10.0));
        asteroid.advance();
        assert!(asteroid.is_out_of_bounds(10.0, 10.0));
    }

    #[test]
    fn missile_expires_after_max_travel() {
        let mut missile = Missile::new(Point2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0));
        let huge = MISSILE_MAX_TRAVEL * 10.0;
        while missile.travelled() < MISSILE_MAX_TRAVEL {
            assert!(!missile.is_expired(huge, huge));
            missile.advance();
        }
        assert!(missile.is_expired(huge, huge));
    }

    #[test]
    fn explosion_expires_after_lifetime() {
        let mut explosion = Explosion::new(Point2D::new(1.0, 1.0), 1.0);
        for _ in 0..EXPLOSION_LIFETIME_TICKS {
            assert!(!explosion.is_expired());
            explosion.advance();
        }
        assert!(explosion.is_expired());
        assert_eq!(explosion.center(), Point2D::new(1.0, 1.0));
        assert!(!explosion.kind().is_solid());
    }

    #[test]
    fn symbols() {
        assert_eq!(Ship::new(Point2D::ORIGIN).symbol(), '^');
        assert_eq!(ObjectKind::Asteroid.symbol(), '.');
        assert_eq!(ObjectKind::Missile.symbol(), '|');
        assert_eq!(ObjectKind::Explosion.symbol(), '*');
    }
}

//! Pairwise impact detection and restitution response over the whole field.

use tracing::debug;

use crate::field::{Body, ObjectId, SpaceField};
use crate::physics::{Point2D, Vector2D};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impactor {
    Ship,
    Missile,
}

/// An asteroid removed by a scoring impact, captured before the impact changed it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidDestroyed {
    pub mass: f64,
    pub speed: f64,
    pub center: Point2D,
    pub by: Impactor,
}

/// Scans every unordered pair `(i, j)`, `i < j`, of the field's objects once.
///
/// Impacting solid pairs get their normal velocities resolved with
/// `restitution`; ship or missile hits on an asteroid explode it and are
/// reported. The ship never interacts with its own missiles. Destroyed
/// entities are skipped for the rest of the scan and swept when it completes.
pub fn resolve_collisions(field: &mut SpaceField, restitution: f64) -> Vec<AsteroidDestroyed> {
    debug_assert!((0.0..=1.0).contains(&restitution));

    let ids = field.space_objects();
    let mut destroyed = Vec::new();

    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            let (first, second) = (ids[i], ids[j]);
            if !first.kind().is_solid() || !second.kind().is_solid() {
                continue;
            }
            if is_ship_and_missile(first, second) {
                continue;
            }
            if field.is_destroyed(first) || field.is_destroyed(second) {
                continue;
            }

            let (Some(a), Some(b)) = (field.body(first).copied(), field.body(second).copied())
            else {
                continue;
            };
            if !a.impacts(&b) {
                continue;
            }

            let scoring = scoring_pair(first, second).map(|(asteroid_index, impactor)| {
                let asteroid = if matches!(first, ObjectId::Asteroid(_)) { a } else { b };
                (asteroid_index, impactor, asteroid)
            });

            if let Some((velocity_a, velocity_b)) = resolve_impact(&a, &b, restitution) {
                if let Some(body) = field.body_mut(first) {
                    body.velocity = velocity_a;
                }
                if let Some(body) = field.body_mut(second) {
                    body.velocity = velocity_b;
                }
            }

            let Some((asteroid_index, impactor, asteroid)) = scoring else {
                continue;
            };
            if field.explode_asteroid(asteroid_index).is_none() {
                continue;
            }
            let by = match impactor {
                ObjectId::Missile(missile_index) => {
                    field.destroy_missile(missile_index);
                    Impactor::Missile
                }
                _ => Impactor::Ship,
            };
            debug!(?by, mass = asteroid.mass, "asteroid destroyed");
            destroyed.push(AsteroidDestroyed {
                mass: asteroid.mass,
                speed: asteroid.velocity.magnitude(),
                center: asteroid.center,
                by,
            });
        }
    }

    field.prune_destroyed();
    destroyed
}

/// Matches (ship|missile, asteroid) in either order.
fn scoring_pair(first: ObjectId, second: ObjectId) -> Option<(usize, ObjectId)> {
    match (first, second) {
        (ObjectId::Asteroid(index), impactor @ (ObjectId::Ship | ObjectId::Missile(_)))
        | (impactor @ (ObjectId::Ship | ObjectId::Missile(_)), ObjectId::Asteroid(index)) => {
            Some((index, impactor))
        }
        _ => None,
    }
}

fn is_ship_and_missile(first: ObjectId, second: ObjectId) -> bool {
    matches!(
        (first, second),
        (ObjectId::Ship, ObjectId::Missile(_)) | (ObjectId::Missile(_), ObjectId::Ship)
    )
}

/// Post-impact velocities of `a` and `b`.
///
/// The velocities are split along the line of centers; the normal parts follow
/// the 1D restitution formula and the tangential parts are kept. Returns `None`
/// when the centers coincide or the bodies are already separating.
pub fn resolve_impact(a: &Body, b: &Body, restitution: f64) -> Option<(Vector2D, Vector2D)> {
    let normal = a.center.impact_direction(b.center).ok()?;

    let speed_a = a.velocity.dot(normal);
    let speed_b = b.velocity.dot(normal);
    let closing = speed_a - speed_b;
    if closing <= 0.0 {
        return None;
    }

    let total_mass = a.mass + b.mass;
    let momentum = a.mass * speed_a + b.mass * speed_b;
    let after_a = (momentum - b.mass * restitution * closing) / total_mass;
    let after_b = (momentum + a.mass * restitution * closing) / total_mass;

    let tangent_a = a.velocity - a.velocity.vector_project(normal).ok()?;
    let tangent_b = b.velocity - b.velocity.vector_project(normal).ok()?;

    Some((tangent_a + normal * after_a, tangent_b + normal * after_b))
}

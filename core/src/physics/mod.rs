//! Value-type 2D algebra used by the entities and the collision resolver.

mod point;
mod vector;

pub use point::Point2D;
pub use vector::Vector2D;

use core::ops::Add;

use serde::{Deserialize, Serialize};

use super::Vector2D;
use crate::error::VectorError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vector(&self) -> Vector2D {
        Vector2D::new(self.x, self.y)
    }

    pub fn translate(&self, by: Vector2D) -> Self {
        Self::new(self.x + by.dx, self.y + by.dy)
    }

    /// Componentwise absolute difference between the two points.
    pub fn impact_vector(&self, other: Self) -> Vector2D {
        Vector2D::new((self.x - other.x).abs(), (self.y - other.y).abs())
    }

    /// Unit vector along the line of centers, pointing from `self` towards `other`.
    pub fn impact_direction(&self, other: Self) -> Result<Vector2D, VectorError> {
        Vector2D::new(other.x - self.x, other.y - self.y).unit()
    }

    pub fn contact_vector(&self, other: Self) -> Result<Vector2D, VectorError> {
        self.impact_vector(other).normal()
    }

    /// Unit vector lying on the contact plane (perpendicular to the line of centers).
    pub fn contact_direction(&self, other: Self) -> Result<Vector2D, VectorError> {
        self.impact_direction(other)?.normal()
    }

    pub fn distance(&self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Add for Point2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<Vector2D> for Point2D {
    type Output = Self;

    fn add(self, rhs: Vector2D) -> Self {
        self.translate(rhs)
    }
}

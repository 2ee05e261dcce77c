use core::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::Point2D;
use crate::error::VectorError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Builds a vector of the given length pointing at `radians` (counter-clockwise from +x).
    pub fn from_polar(magnitude: f64, radians: f64) -> Self {
        Self::new(magnitude * radians.cos(), magnitude * radians.sin())
    }

    pub fn magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn radiant(&self) -> f64 {
        self.dy.atan2(self.dx)
    }

    pub fn degree(&self) -> f64 {
        self.radiant().to_degrees()
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    pub fn unit(&self) -> Result<Self, VectorError> {
        let magnitude = self.non_zero_magnitude()?;
        Ok(*self / magnitude)
    }

    /// Unit vector rotated 90 degrees clockwise: `(dy, -dx) / |v|`.
    pub fn normal(&self) -> Result<Self, VectorError> {
        let magnitude = self.non_zero_magnitude()?;
        Ok(Self::new(self.dy, -self.dx) / magnitude)
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Self::new(self.dx * scalar, self.dy * scalar)
    }

    pub fn scalar_project(&self, target: Self) -> Result<f64, VectorError> {
        let magnitude = target.non_zero_magnitude()?;
        Ok(self.dot(target) / magnitude)
    }

    pub fn vector_project(&self, target: Self) -> Result<Self, VectorError> {
        let onto_x_axis = target.dx != 0.0 && target.dy == 0.0;
        let onto_y_axis = target.dx == 0.0 && target.dy != 0.0;

        if onto_x_axis {
            return Ok(Self::new(self.dx, 0.0));
        }
        if onto_y_axis {
            return Ok(Self::new(0.0, self.dy));
        }

        let magnitude = target.non_zero_magnitude()?;
        Ok(target * (self.scalar_project(target)? / magnitude))
    }

    /// Rescales the vector down to `max` when it is longer; shorter vectors are returned as-is.
    pub fn clamp_magnitude(&self, max: f64) -> Self {
        let magnitude = self.magnitude();
        if magnitude <= max || magnitude == 0.0 {
            return *self;
        }
        *self * (max / magnitude)
    }

    fn non_zero_magnitude(&self) -> Result<f64, VectorError> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Err(VectorError::DegenerateVector);
        }
        Ok(magnitude)
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Add<Point2D> for Vector2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        rhs.translate(self)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl Mul<Vector2D> for f64 {
    type Output = Vector2D;

    fn mul(self, v: Vector2D) -> Vector2D {
        v.scale(self)
    }
}

/// `v * w` is the dot product.
impl Mul for Vector2D {
    type Output = f64;

    fn mul(self, rhs: Self) -> f64 {
        self.dot(rhs)
    }
}

impl Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.dx / scalar, self.dy / scalar)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

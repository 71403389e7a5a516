//! 2D vector type for the particle engine.

use crate::error::PhysicsError;
use crate::float::Float;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Squared length below which a direction is considered undefined.
pub(crate) const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

/// 2D vector with value-returning and in-place arithmetic.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// Zero vector.
    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }

    /// Dot product.
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// Squared length (avoids sqrt).
    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    /// Length (magnitude).
    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    /// Squared distance between two points.
    pub fn distance_sq(self, other: Self) -> F {
        (self - other).length_sq()
    }

    /// Scale all components by a scalar.
    pub fn scale(self, s: F) -> Self {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    /// Scale in place.
    pub fn scale_mut(&mut self, s: F) -> &mut Self {
        self.x = self.x * s;
        self.y = self.y * s;
        self
    }

    /// Unit vector in the same direction.
    ///
    /// Fails with [`PhysicsError::DegenerateGeometry`] when the length is too
    /// close to zero for a direction to exist.
    pub fn try_normalized(self) -> Result<Self, PhysicsError> {
        let len_sq = self.length_sq();
        if len_sq < F::from_f32(DEGENERATE_LENGTH_SQ) {
            return Err(PhysicsError::DegenerateGeometry);
        }
        Ok(self.scale(F::one() / len_sq.sqrt()))
    }

    /// Normalize in place. Leaves the vector untouched on failure.
    pub fn normalize(&mut self) -> Result<&mut Self, PhysicsError> {
        *self = self.try_normalized()?;
        Ok(self)
    }

    /// Unit vector, or zero if the length is near zero.
    pub fn normalize_or_zero(self) -> Self {
        self.try_normalized().unwrap_or_else(|_| Self::zero())
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> AddAssign for Vec2<F> {
    fn add_assign(&mut self, rhs: Self) {
        self.x = self.x + rhs.x;
        self.y = self.y + rhs.y;
    }
}

impl<F: Float> SubAssign for Vec2<F> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x = self.x - rhs.x;
        self.y = self.y - rhs.y;
    }
}

//! Integration state and its time derivative.

use crate::float::Float;
use crate::vec::Vec2;
use core::ops::Add;

/// Position and momentum of a particle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct State<F: Float> {
    pub position: Vec2<F>,
    pub momentum: Vec2<F>,
}

/// Time derivative of a [`State`]: velocity and force.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Derivative<F: Float> {
    /// Velocity (d position / dt).
    pub dx: Vec2<F>,
    /// Force (d momentum / dt).
    pub dp: Vec2<F>,
}

impl<F: Float> State<F> {
    pub fn new(position: Vec2<F>, momentum: Vec2<F>) -> Self {
        State { position, momentum }
    }

    /// State at rest at `position`.
    pub fn at_rest(position: Vec2<F>) -> Self {
        State { position, momentum: Vec2::zero() }
    }

    /// A copy advanced by `derivative * dt`.
    pub fn advanced(&self, derivative: &Derivative<F>, dt: F) -> Self {
        State {
            position: self.position + derivative.dx.scale(dt),
            momentum: self.momentum + derivative.dp.scale(dt),
        }
    }

    /// Advance in place by `derivative * dt`.
    pub fn advance(&mut self, derivative: &Derivative<F>, dt: F) {
        self.position += derivative.dx.scale(dt);
        self.momentum += derivative.dp.scale(dt);
    }

    /// Velocity for the given inertia.
    pub fn velocity(&self, inertia: F) -> Vec2<F> {
        self.momentum.scale(F::one() / inertia)
    }
}

impl<F: Float> Derivative<F> {
    pub fn new(dx: Vec2<F>, dp: Vec2<F>) -> Self {
        Derivative { dx, dp }
    }

    pub fn zero() -> Self {
        Derivative { dx: Vec2::zero(), dp: Vec2::zero() }
    }

    pub fn scale(self, s: F) -> Self {
        Derivative { dx: self.dx.scale(s), dp: self.dp.scale(s) }
    }
}

impl<F: Float> Add for Derivative<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Derivative { dx: self.dx + rhs.dx, dp: self.dp + rhs.dp }
    }
}

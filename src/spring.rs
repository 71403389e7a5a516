//! Damped springs connecting a particle to an anchor or another particle.

use crate::float::Float;
use crate::grid::GridId;
use crate::particle::ParticleId;
use crate::vec::Vec2;

/// Default ratio between a spring's maximum and rest distance.
pub const DEFAULT_MAX_DISTANCE_FACTOR: f32 = 1.8;

/// Handle shared by both halves of a two-sided spring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpringId(pub(crate) usize);

impl SpringId {
    /// Raw allocation index.
    pub fn index(self) -> usize { self.0 }
}

/// What the far end of a spring is tied to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpringTarget<F: Float> {
    /// A fixed world position.
    Anchor(Vec2<F>),
    /// Another particle, read through its frame-start snapshot.
    Particle(ParticleId),
}

/// Stiffness, damping and distance limits for a new spring.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringParams<F: Float> {
    pub stiffness: F,
    pub damping: F,
    /// Zero means "pull straight onto the target", with no slack.
    pub rest_distance: F,
    /// `None` disables the inextensibility constraint.
    pub max_distance: Option<F>,
}

impl<F: Float> SpringParams<F> {
    /// Params with `max_distance = rest_distance * 1.8`.
    pub fn new(stiffness: F, damping: F, rest_distance: F) -> Self {
        SpringParams {
            stiffness,
            damping,
            rest_distance,
            max_distance: Some(rest_distance * F::from_f32(DEFAULT_MAX_DISTANCE_FACTOR)),
        }
    }

    /// Override the max distance with an absolute length.
    pub fn with_max_distance(mut self, max_distance: F) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Max distance as a multiple of the rest distance.
    pub fn with_max_distance_factor(mut self, factor: F) -> Self {
        self.max_distance = Some(self.rest_distance * factor);
        self
    }

    /// Let the spring stretch without limit.
    pub fn without_max_distance(mut self) -> Self {
        self.max_distance = None;
        self
    }
}

/// One half of a spring, owned by the particle it pushes.
///
/// Particle-to-particle springs are stored on both endpoints under the same
/// [`SpringId`], each half pointing at the other particle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spring<F: Float> {
    pub id: SpringId,
    pub target: SpringTarget<F>,
    pub stiffness: F,
    pub damping: F,
    pub rest_distance: F,
    pub max_distance: Option<F>,
    /// Grid whose pulse modifier scales the rest and max distance.
    pub pulse: Option<GridId>,
    /// Created by `affix_point`, and removed again by `unaffix_point`.
    pub affixed: bool,
}

impl<F: Float> Spring<F> {
    /// Half-spring with no pulse grid.
    pub fn new(id: SpringId, target: SpringTarget<F>, params: &SpringParams<F>) -> Self {
        Spring {
            id,
            target,
            stiffness: params.stiffness,
            damping: params.damping,
            rest_distance: params.rest_distance,
            max_distance: params.max_distance,
            pulse: None,
            affixed: false,
        }
    }

    /// Scale distances by `grid`'s pulse modifier.
    pub fn with_pulse(mut self, grid: GridId) -> Self {
        self.pulse = Some(grid);
        self
    }

    /// Rest distance under the given pulse.
    pub fn effective_rest_distance(&self, pulse: F) -> F {
        self.rest_distance * pulse
    }

    /// Max distance under the given pulse, if any.
    pub fn effective_max_distance(&self, pulse: F) -> Option<F> {
        self.max_distance.map(|m| m * pulse)
    }

    /// Tied to a fixed position rather than a particle.
    pub fn is_anchor(&self) -> bool {
        matches!(self.target, SpringTarget::Anchor(_))
    }

    /// Whether the far end is `particle`.
    pub fn targets(&self, particle: ParticleId) -> bool {
        self.target == SpringTarget::Particle(particle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_max_distance_is_scaled_rest() {
        let p = SpringParams::new(10.0f64, 0.5, 20.0);
        assert_eq!(p.max_distance, Some(36.0));
        assert_eq!(p.without_max_distance().max_distance, None);
        assert_eq!(p.with_max_distance_factor(2.0).max_distance, Some(40.0));
    }

    #[test]
    fn pulse_scales_distances() {
        let s = Spring::new(
            SpringId(0),
            SpringTarget::Anchor(Vec2::zero()),
            &SpringParams::new(1.0f64, 0.0, 10.0),
        );
        assert_eq!(s.effective_rest_distance(1.5), 15.0);
        assert_eq!(s.effective_max_distance(0.5), Some(9.0));
        assert!(s.is_anchor());
    }
}

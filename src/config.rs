//! Configuration for the simulation world.

use crate::float::Float;
use crate::spring::DEFAULT_MAX_DISTANCE_FACTOR;

/// Engine-wide tuning: relaxation, contact response and bond springs.
///
/// # Builder Pattern
/// ```
/// use squishy::config::WorldConfig;
///
/// let config: WorldConfig<f32> = WorldConfig::new()
///     .with_relaxation_passes(8)
///     .with_contact(2000.0, 0.2)
///     .with_boundary(10000.0, 0.9);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig<F: Float> {
    /// Max-distance relaxation sweeps per frame. Default: 5.
    pub relaxation_passes: usize,
    /// Penalty stiffness for particle overlaps. Default: 1000.
    pub contact_stiffness: F,
    /// Damping along the normal for particle overlaps. Default: 0.1.
    pub contact_damping: F,
    /// Penalty stiffness for leaving the play area. Default: 10000.
    pub boundary_stiffness: F,
    /// Damping for leaving the play area. Default: 0.9.
    pub boundary_damping: F,
    /// Mesh springs get `max_distance = rest * factor`. Default: 1.8.
    pub max_distance_factor: F,
    /// Spring used by `affix_point`. Default: 40 / 0.5.
    pub affix_stiffness: F,
    pub affix_damping: F,
    /// Spring used by `attach_points`. Default: 40 / 0.5.
    pub attachment_stiffness: F,
    pub attachment_damping: F,
}

impl<F: Float> WorldConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        WorldConfig {
            relaxation_passes: 5,
            contact_stiffness: F::from_f32(1000.0),
            contact_damping: F::from_f32(0.1),
            boundary_stiffness: F::from_f32(10000.0),
            boundary_damping: F::from_f32(0.9),
            max_distance_factor: F::from_f32(DEFAULT_MAX_DISTANCE_FACTOR),
            affix_stiffness: F::from_f32(40.0),
            affix_damping: F::from_f32(0.5),
            attachment_stiffness: F::from_f32(40.0),
            attachment_damping: F::from_f32(0.5),
        }
    }

    /// Set the number of relaxation passes.
    pub fn with_relaxation_passes(mut self, passes: usize) -> Self {
        self.relaxation_passes = passes;
        self
    }

    /// Set stiffness and damping of particle-particle contacts.
    pub fn with_contact(mut self, stiffness: F, damping: F) -> Self {
        self.contact_stiffness = stiffness;
        self.contact_damping = damping;
        self
    }

    /// Set stiffness and damping of play-area contacts.
    pub fn with_boundary(mut self, stiffness: F, damping: F) -> Self {
        self.boundary_stiffness = stiffness;
        self.boundary_damping = damping;
        self
    }

    pub fn with_max_distance_factor(mut self, factor: F) -> Self {
        self.max_distance_factor = factor;
        self
    }

    pub fn with_affix_spring(mut self, stiffness: F, damping: F) -> Self {
        self.affix_stiffness = stiffness;
        self.affix_damping = damping;
        self
    }

    pub fn with_attachment_spring(mut self, stiffness: F, damping: F) -> Self {
        self.attachment_stiffness = stiffness;
        self.attachment_damping = damping;
        self
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

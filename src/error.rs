//! Error types for physics operations.

use core::fmt;

/// Errors that can occur during physics operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Collision definition does not match the grid it is applied to.
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
    /// A direction was requested from a (near) zero-length vector.
    DegenerateGeometry,
    /// Particle handle is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// Grid handle is out of bounds.
    GridOutOfBounds { index: usize, count: usize },
    /// Inertia must be positive and finite.
    InvalidInertia,
    /// A particle cannot be bonded to itself.
    SelfAttachment,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::ShapeMismatch { expected_rows, expected_cols, rows, cols } => write!(
                f,
                "collision definition is {}x{} (rows x cols), grid needs {}x{}",
                rows, cols, expected_rows, expected_cols
            ),
            PhysicsError::DegenerateGeometry => write!(f, "zero-length vector has no direction"),
            PhysicsError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::GridOutOfBounds { index, count } => {
                write!(f, "grid index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::InvalidInertia => write!(f, "inertia must be positive and finite"),
            PhysicsError::SelfAttachment => write!(f, "cannot attach a particle to itself"),
        }
    }
}

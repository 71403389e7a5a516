//! Frame-scoped penalty contacts.

use crate::float::Float;
use crate::vec::Vec2;

/// A one-frame penalty force from an overlap or a boundary violation.
///
/// Momenta are the frame-start snapshots of both sides, so the damping term
/// does not depend on which particle of a pair is integrated first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact<F: Float> {
    /// Unit vector pointing the way this particle gets pushed.
    pub normal: Vec2<F>,
    pub depth: F,
    pub stiffness: F,
    pub damping: F,
    pub old_momentum: Vec2<F>,
    /// Zero for boundary contacts.
    pub other_old_momentum: Vec2<F>,
}

impl<F: Float> Contact<F> {
    pub fn new(
        normal: Vec2<F>,
        depth: F,
        stiffness: F,
        damping: F,
        old_momentum: Vec2<F>,
        other_old_momentum: Vec2<F>,
    ) -> Self {
        Contact { normal, depth, stiffness, damping, old_momentum, other_old_momentum }
    }

    /// The matching contact for the other particle of the pair.
    pub fn mirrored(&self) -> Self {
        Contact {
            normal: -self.normal,
            depth: self.depth,
            stiffness: self.stiffness,
            damping: self.damping,
            old_momentum: self.other_old_momentum,
            other_old_momentum: self.old_momentum,
        }
    }

    /// Relative momentum along the contact normal.
    pub fn approach(&self) -> F {
        (self.old_momentum - self.other_old_momentum).dot(self.normal)
    }
}

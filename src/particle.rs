//! Point masses driven by springs, contacts and a constant external force.

use crate::contact::Contact;
use crate::float::Float;
use crate::grid::GridId;
use crate::spring::{Spring, SpringId};
use crate::state::State;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Index of a particle inside its [`World`](crate::world::World).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub(crate) usize);

impl ParticleId {
    /// Position in the world's particle list.
    pub fn index(self) -> usize { self.0 }
}

/// The single runtime bond a particle may hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub partner: ParticleId,
    pub spring: SpringId,
}

/// A point mass integrated with RK4.
///
/// `state_last` is the snapshot taken at the start of each frame. Other
/// particles only ever read this snapshot, never the in-flight `state`.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub inertia: F,
    pub state: State<F>,
    pub state_last: State<F>,
    /// Base radius, scaled by the owning grid's pulse modifier.
    pub radius: F,
    pub grid: Option<GridId>,
    pub springs: AllocVec<Spring<F>>,
    pub contacts: AllocVec<Contact<F>>,
    pub collides: bool,
    pub collision_group: u32,
    pub attachment: Option<Attachment>,
    pub external_force: Vec2<F>,
}

impl<F: Float> Particle<F> {
    /// Particle at rest, colliding, in group 0.
    pub fn new(position: Vec2<F>, inertia: F, radius: F) -> Self {
        let state = State::at_rest(position);
        Particle {
            inertia,
            state,
            state_last: state,
            radius,
            grid: None,
            springs: AllocVec::new(),
            contacts: AllocVec::new(),
            collides: true,
            collision_group: 0,
            attachment: None,
            external_force: Vec2::zero(),
        }
    }

    /// Current position.
    pub fn position(&self) -> Vec2<F> {
        self.state.position
    }

    /// Current velocity, momentum over inertia.
    pub fn velocity(&self) -> Vec2<F> {
        self.state.velocity(self.inertia)
    }

    /// Copy `state` into `state_last`.
    pub fn snapshot(&mut self) {
        self.state_last = self.state;
    }

    /// Both collide and share a collision group.
    pub fn can_collide_with(&self, other: &Particle<F>) -> bool {
        self.collides && other.collides && self.collision_group == other.collision_group
    }

    pub(crate) fn remove_spring(&mut self, id: SpringId) {
        self.springs.retain(|s| s.id != id);
    }
}

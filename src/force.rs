//! Force model: springs, contacts and the constant external force.

use crate::contact::Contact;
use crate::float::Float;
use crate::grid::{Grid, GridId};
use crate::particle::Particle;
use crate::spring::{Spring, SpringTarget};
use crate::state::State;
use crate::vec::{Vec2, DEGENERATE_LENGTH_SQ};

/// Read-only view of the world used while evaluating forces.
///
/// Other particles are only reachable through `state_last`, so every
/// evaluation within a frame sees the same neighbour positions.
pub struct ForceContext<'a, F: Float> {
    particles: &'a [Particle<F>],
    grids: &'a [Grid<F>],
}

impl<'a, F: Float> ForceContext<'a, F> {
    pub fn new(particles: &'a [Particle<F>], grids: &'a [Grid<F>]) -> Self {
        ForceContext { particles, grids }
    }

    /// Where a spring target sits at the start of the frame.
    pub fn target_position(&self, target: &SpringTarget<F>) -> Vec2<F> {
        match *target {
            SpringTarget::Anchor(pos) => pos,
            SpringTarget::Particle(id) => self.particles[id.index()].state_last.position,
        }
    }

    pub fn pulse(&self, grid: Option<GridId>) -> F {
        pulse_of(self.grids, grid)
    }
}

/// Pulse modifier of `grid`, or one when the spring belongs to no grid.
pub fn pulse_of<F: Float>(grids: &[Grid<F>], grid: Option<GridId>) -> F {
    grid.and_then(|id| grids.get(id.index()))
        .map(|g| g.parameters.pulse_modifier)
        .unwrap_or_else(F::one)
}

/// Anything that contributes a force to a particle at a candidate state.
pub trait ForceGenerator<F: Float> {
    fn force(&self, state: &State<F>, ctx: &ForceContext<'_, F>) -> Vec2<F>;
}

impl<F: Float> ForceGenerator<F> for Spring<F> {
    /// `k * (|x| - d) * x/|x| - c * p` with `x` pointing at the target.
    /// For a zero rest distance this reduces to `k * x - c * p`.
    fn force(&self, state: &State<F>, ctx: &ForceContext<'_, F>) -> Vec2<F> {
        let delta = ctx.target_position(&self.target) - state.position;
        let drag = state.momentum.scale(self.damping);
        let rest = self.effective_rest_distance(ctx.pulse(self.pulse));

        if rest.is_near_zero(F::from_f32(1e-10)) {
            return delta.scale(self.stiffness) - drag;
        }

        let len_sq = delta.length_sq();
        if len_sq < F::from_f32(DEGENERATE_LENGTH_SQ) {
            // no direction to push along
            return -drag;
        }
        let len = len_sq.sqrt();
        delta.scale(self.stiffness * (len - rest) / len) - drag
    }
}

impl<F: Float> ForceGenerator<F> for Contact<F> {
    fn force(&self, _state: &State<F>, _ctx: &ForceContext<'_, F>) -> Vec2<F> {
        self.normal.scale(self.stiffness * self.depth)
            - self.normal.scale(self.damping * self.approach())
    }
}

/// Net force on `particle` if it were at `state`.
///
/// Sums spring forces, then contact forces, then the external force. Named
/// after the momentum derivative it feeds into the integrator.
pub fn acceleration<F: Float>(
    particle: &Particle<F>,
    state: &State<F>,
    ctx: &ForceContext<'_, F>,
) -> Vec2<F> {
    let mut total = Vec2::zero();
    for spring in &particle.springs {
        total += spring.force(state, ctx);
    }
    for contact in &particle.contacts {
        total += contact.force(state, ctx);
    }
    total + particle.external_force
}

//! Inextensibility constraints applied after integration.
//!
//! Springs with a `max_distance` are projected back to that length with a
//! fixed number of Gauss-Seidel style sweeps. Compression is never corrected,
//! and a few passes do not guarantee convergence on stiff networks.

use crate::float::Float;
use crate::force::pulse_of;
use crate::grid::Grid;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::SpringTarget;

/// Keeps one spring from stretching past `max_distance`.
pub struct MaxDistanceConstraint<F: Float> {
    pub particle: usize,
    pub target: SpringTarget<F>,
    pub max_distance: F,
}

impl<F: Float> MaxDistanceConstraint<F> {
    pub fn new(particle: usize, target: SpringTarget<F>, max_distance: F) -> Self {
        MaxDistanceConstraint { particle, target, max_distance }
    }

    /// Returns true if positions were corrected.
    pub fn solve(&self, particles: &mut [Particle<F>]) -> bool {
        let pos = particles[self.particle].state.position;
        let target_pos = match self.target {
            SpringTarget::Anchor(anchor) => anchor,
            SpringTarget::Particle(id) => particles[id.index()].state.position,
        };

        let delta = pos - target_pos;
        let dist_sq = delta.length_sq();
        if dist_sq <= self.max_distance * self.max_distance {
            return false;
        }

        let dist = dist_sq.sqrt();
        let overshoot = dist - self.max_distance;
        let dir = delta.scale(F::one() / dist);
        let correction = dir.scale(overshoot * F::half());

        let owner = &mut particles[self.particle];
        owner.state.position -= correction.scale(F::one() / owner.inertia);
        if let SpringTarget::Particle(id) = self.target {
            let other = &mut particles[id.index()];
            other.state.position += correction.scale(F::one() / other.inertia);
        }
        true
    }
}

/// Run `passes` sweeps over every spring with a max distance, in spring-list
/// order. Returns how many corrections were applied.
pub fn relax<F: Float, O: StepObserver>(
    particles: &mut [Particle<F>],
    grids: &[Grid<F>],
    passes: usize,
    observer: &mut O,
) -> usize {
    let mut corrections = 0;
    for pass in 0..passes {
        for i in 0..particles.len() {
            for s in 0..particles[i].springs.len() {
                let spring = particles[i].springs[s];
                let Some(max) = spring.effective_max_distance(pulse_of(grids, spring.pulse)) else {
                    continue;
                };
                if MaxDistanceConstraint::new(i, spring.target, max).solve(particles) {
                    corrections += 1;
                }
            }
        }
        observer.on_relaxation_pass(pass);
    }
    corrections
}

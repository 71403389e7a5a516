//! Classical fourth-order Runge-Kutta step for a single particle.
//!
//! Solves `x' = p / inertia, p' = F(x, p)` with a fixed step and no error
//! estimate. Neighbouring particles are frozen at their frame-start snapshot,
//! so each particle is integrated independently of the order of the others.

use crate::float::Float;
use crate::force::{acceleration, ForceContext};
use crate::particle::Particle;
use crate::state::{Derivative, State};

/// Derivative at `initial` advanced by `derivative * dt`.
fn evaluate<F: Float>(
    particle: &Particle<F>,
    initial: &State<F>,
    dt: F,
    derivative: &Derivative<F>,
    ctx: &ForceContext<'_, F>,
) -> Derivative<F> {
    let state = initial.advanced(derivative, dt);
    Derivative::new(
        state.velocity(particle.inertia),
        acceleration(particle, &state, ctx),
    )
}

/// Advance `state` by `dt` under `particle`'s force model.
///
/// `state` is normally a copy of `particle.state`; the particle itself is only
/// read. `dt` is not clamped.
pub fn integrate<F: Float>(
    particle: &Particle<F>,
    state: &mut State<F>,
    dt: F,
    ctx: &ForceContext<'_, F>,
) {
    let half_dt = dt * F::half();

    // d1 at t, d2 and d3 at t + dt/2, d4 at t + dt
    let d1 = evaluate(particle, state, F::zero(), &Derivative::zero(), ctx);
    let d2 = evaluate(particle, state, half_dt, &d1, ctx);
    let d3 = evaluate(particle, state, half_dt, &d2, ctx);
    let d4 = evaluate(particle, state, dt, &d3, ctx);

    // (d1 + 2 d2 + 2 d3 + d4) / 6
    let weighted = (d1 + (d2 + d3).scale(F::two()) + d4)
        .scale(F::one() / F::from_f32(6.0));

    state.advance(&weighted, dt);
}

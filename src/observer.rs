//! Hooks into the stages of a world update.

/// Receives a callback at each stage of [`World::update_observed`](crate::world::World::update_observed).
///
/// Every method defaults to doing nothing, so implementors only override the
/// stages they care about.
pub trait StepObserver {
    /// Contacts created this frame, boundary contacts included.
    fn on_collisions(&mut self, _contacts: usize) {}

    /// Every particle has taken its RK4 step.
    fn on_integrate(&mut self) {}

    /// One max-distance sweep finished. `pass` counts from zero.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// Positions have been published to the grids.
    fn on_step_complete(&mut self) {}
}

/// Observer for callers that don't need one.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

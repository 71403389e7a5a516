//! The simulation world: owns every particle, spring and grid.

use crate::collision::{detect_contacts, PlayArea};
use crate::config::WorldConfig;
use crate::constraint::relax;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::force::{pulse_of, ForceContext};
use crate::grid::{Grid, GridId, GridParameters, MeshConfig, Point};
use crate::integrator::integrate;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::{Attachment, Particle, ParticleId};
use crate::spring::{Spring, SpringId, SpringParams, SpringTarget};
use crate::state::State;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Frame-stepped particle-spring world.
///
/// Not reentrant: topology changes must not overlap an `update` call, which
/// the `&mut self` receivers already enforce.
pub struct World<F: Float> {
    particles: AllocVec<Particle<F>>,
    grids: AllocVec<Grid<F>>,
    config: WorldConfig<F>,
    play_area: Option<PlayArea<F>>,
    next_spring: usize,
}

impl<F: Float> World<F> {
    /// Empty world with no play area.
    pub fn new(config: WorldConfig<F>) -> Self {
        World {
            particles: AllocVec::new(),
            grids: AllocVec::new(),
            config,
            play_area: None,
            next_spring: 0,
        }
    }

    /// Tuning the world was created with.
    pub fn config(&self) -> &WorldConfig<F> { &self.config }

    fn check_particle(&self, id: ParticleId) -> Result<(), PhysicsError> {
        if id.index() < self.particles.len() {
            Ok(())
        } else {
            Err(PhysicsError::ParticleOutOfBounds { index: id.index(), count: self.particles.len() })
        }
    }

    fn check_grid(&self, id: GridId) -> Result<(), PhysicsError> {
        if id.index() < self.grids.len() {
            Ok(())
        } else {
            Err(PhysicsError::GridOutOfBounds { index: id.index(), count: self.grids.len() })
        }
    }

    fn check_inertia(inertia: F) -> Result<(), PhysicsError> {
        if inertia > F::zero() && inertia.is_finite() {
            Ok(())
        } else {
            Err(PhysicsError::InvalidInertia)
        }
    }

    fn alloc_spring(&mut self) -> SpringId {
        let id = SpringId(self.next_spring);
        self.next_spring += 1;
        id
    }

    /// Two halves of one spring, one on each endpoint.
    fn link(&mut self, a: ParticleId, b: ParticleId, params: &SpringParams<F>, pulse: Option<GridId>) -> SpringId {
        let id = self.alloc_spring();
        for (owner, target) in [(a, b), (b, a)] {
            let mut half = Spring::new(id, SpringTarget::Particle(target), params);
            if let Some(grid) = pulse {
                half = half.with_pulse(grid);
            }
            self.particles[owner.index()].springs.push(half);
        }
        id
    }

    /// Add a free particle outside any grid.
    pub fn add_particle(&mut self, position: Vec2<F>, inertia: F, radius: F) -> Result<ParticleId, PhysicsError> {
        Self::check_inertia(inertia)?;
        let id = ParticleId(self.particles.len());
        self.particles.push(Particle::new(position, inertia, radius));
        Ok(id)
    }

    /// Build a grid of particles joined by structural, shear and optional
    /// second-order springs.
    ///
    /// Fails with [`PhysicsError::ShapeMismatch`] if the collision definition
    /// does not fit the grid; the world is left untouched in that case.
    pub fn generate_mesh(&mut self, mesh: &MeshConfig<F>) -> Result<GridId, PhysicsError> {
        Self::check_inertia(mesh.inertia)?;
        let layout = mesh.layout()?;

        let grid_id = GridId(self.grids.len());
        let base = self.particles.len();
        let radius = mesh.particle_radius();

        let mut points = AllocVec::with_capacity(layout.positions.len());
        for (i, pos) in layout.positions.iter().enumerate() {
            let mut particle = Particle::new(*pos, mesh.inertia, radius);
            particle.grid = Some(grid_id);
            particle.collides = layout.collides[i];
            particle.collision_group = mesh.collision_group;
            self.particles.push(particle);
            points.push(Point { x: pos.x, y: pos.y, base_radius: radius, particle: ParticleId(base + i) });
        }

        for edge in &layout.edges {
            let params = SpringParams::new(mesh.stiffness, mesh.damping, edge.rest_distance)
                .with_max_distance_factor(self.config.max_distance_factor);
            self.link(ParticleId(base + edge.a), ParticleId(base + edge.b), &params, Some(grid_id));
        }

        tracing::debug!(
            grid = grid_id.index(),
            width = mesh.width,
            height = mesh.height,
            particles = points.len(),
            springs = layout.edges.len(),
            vein_slots = layout.vein_slots.len(),
            "generated mesh"
        );

        self.grids.push(Grid {
            width: mesh.width,
            height: mesh.height,
            positions: points,
            parameters: GridParameters::default(),
            collision_group: mesh.collision_group,
            vein_slots: layout.vein_slots,
        });
        Ok(grid_id)
    }

    /// Spring between two particles, stored on both.
    pub fn connect(&mut self, a: ParticleId, b: ParticleId, params: SpringParams<F>) -> Result<SpringId, PhysicsError> {
        self.check_particle(a)?;
        self.check_particle(b)?;
        if a == b {
            return Err(PhysicsError::SelfAttachment);
        }
        Ok(self.link(a, b, &params, None))
    }

    /// Spring from a particle to a fixed world position.
    pub fn add_anchor_spring(&mut self, particle: ParticleId, anchor: Vec2<F>, params: SpringParams<F>) -> Result<SpringId, PhysicsError> {
        self.check_particle(particle)?;
        let id = self.alloc_spring();
        self.particles[particle.index()]
            .springs
            .push(Spring::new(id, SpringTarget::Anchor(anchor), &params));
        Ok(id)
    }

    /// Pin a particle to `position` with an inextensible zero-length spring.
    pub fn affix_point(&mut self, particle: ParticleId, position: Vec2<F>) -> Result<SpringId, PhysicsError> {
        self.check_particle(particle)?;
        let params = SpringParams::new(self.config.affix_stiffness, self.config.affix_damping, F::zero());
        let id = self.alloc_spring();
        let mut spring = Spring::new(id, SpringTarget::Anchor(position), &params);
        spring.affixed = true;
        self.particles[particle.index()].springs.push(spring);
        tracing::debug!(particle = particle.index(), x = position.x.to_f64(), y = position.y.to_f64(), "affixed point");
        Ok(id)
    }

    /// Remove the springs `affix_point` put on a particle. Anchor springs
    /// added with `add_anchor_spring` stay. Returns how many went.
    pub fn unaffix_point(&mut self, particle: ParticleId) -> Result<usize, PhysicsError> {
        self.check_particle(particle)?;
        let springs = &mut self.particles[particle.index()].springs;
        let before = springs.len();
        springs.retain(|s| !s.affixed);
        let removed = before - springs.len();
        tracing::debug!(particle = particle.index(), removed, "unaffixed point");
        Ok(removed)
    }

    /// Bond two particles, possibly from different grids.
    ///
    /// Rest distance is their current separation. Existing bonds on either
    /// side are detached first.
    pub fn attach_points(&mut self, a: ParticleId, b: ParticleId) -> Result<SpringId, PhysicsError> {
        self.check_particle(a)?;
        self.check_particle(b)?;
        if a == b {
            return Err(PhysicsError::SelfAttachment);
        }
        self.detach_point(a)?;
        self.detach_point(b)?;

        let rest = self.particles[a.index()]
            .position()
            .distance(self.particles[b.index()].position());
        let params = SpringParams::new(self.config.attachment_stiffness, self.config.attachment_damping, rest)
            .with_max_distance_factor(self.config.max_distance_factor);
        let spring = self.link(a, b, &params, None);

        self.particles[a.index()].attachment = Some(Attachment { partner: b, spring });
        self.particles[b.index()].attachment = Some(Attachment { partner: a, spring });
        tracing::debug!(a = a.index(), b = b.index(), rest = rest.to_f64(), "attached points");
        Ok(spring)
    }

    /// Break the bond of `particle`, on both sides. No-op when unbonded.
    pub fn detach_point(&mut self, particle: ParticleId) -> Result<(), PhysicsError> {
        self.check_particle(particle)?;
        let Some(bond) = self.particles[particle.index()].attachment.take() else {
            return Ok(());
        };
        self.particles[particle.index()].remove_spring(bond.spring);

        let partner = &mut self.particles[bond.partner.index()];
        partner.remove_spring(bond.spring);
        if partner.attachment.map(|a| a.spring) == Some(bond.spring) {
            partner.attachment = None;
        }
        tracing::debug!(a = particle.index(), b = bond.partner.index(), "detached points");
        Ok(())
    }

    /// Largest `length / max_distance` over the springs of whichever side of
    /// the bond has fewer springs. Zero when the particle is unbonded.
    pub fn attachment_stress(&self, particle: ParticleId) -> Result<F, PhysicsError> {
        self.check_particle(particle)?;
        let own = &self.particles[particle.index()];
        let Some(bond) = own.attachment else {
            return Ok(F::zero());
        };
        let partner = &self.particles[bond.partner.index()];
        let side = if partner.springs.len() < own.springs.len() { partner } else { own };
        Ok(self.spring_stress(side))
    }

    fn spring_stress(&self, particle: &Particle<F>) -> F {
        let mut stress = F::zero();
        for spring in &particle.springs {
            let Some(max) = spring.effective_max_distance(pulse_of(&self.grids, spring.pulse)) else {
                continue;
            };
            if max.is_near_zero(F::from_f32(1e-10)) {
                continue;
            }
            let target = match spring.target {
                SpringTarget::Anchor(anchor) => anchor,
                SpringTarget::Particle(id) => self.particles[id.index()].position(),
            };
            stress = stress.max(particle.position().distance(target) / max);
        }
        stress
    }

    /// Detach the bond if its stress exceeds `threshold`. Returns true if torn.
    pub fn tear_if_overstressed(&mut self, particle: ParticleId, threshold: F) -> Result<bool, PhysicsError> {
        if self.attachment_stress(particle)? > threshold {
            self.detach_point(particle)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Closest particle within `max_distance` of `position`.
    pub fn nearest_particle(&self, position: Vec2<F>, max_distance: F) -> Option<ParticleId> {
        let mut nearest = None;
        let mut nearest_dist_sq = max_distance * max_distance;
        for (i, p) in self.particles.iter().enumerate() {
            let d = p.position().distance_sq(position);
            if d <= nearest_dist_sq {
                nearest_dist_sq = d;
                nearest = Some(ParticleId(i));
            }
        }
        nearest
    }

    /// Constant force applied every frame until changed.
    pub fn set_external_force(&mut self, particle: ParticleId, force: Vec2<F>) -> Result<(), PhysicsError> {
        self.check_particle(particle)?;
        self.particles[particle.index()].external_force = force;
        Ok(())
    }

    /// Scale a grid's spring lengths and point radii.
    pub fn set_pulse_modifier(&mut self, grid: GridId, pulse_modifier: F) -> Result<(), PhysicsError> {
        self.check_grid(grid)?;
        self.grids[grid.index()].parameters.pulse_modifier = pulse_modifier;
        Ok(())
    }

    /// Confine particles to a circle, or lift the confinement with `None`.
    pub fn set_play_area(&mut self, play_area: Option<PlayArea<F>>) {
        self.play_area = play_area;
    }

    /// Current play area, if any.
    pub fn play_area(&self) -> Option<&PlayArea<F>> { self.play_area.as_ref() }
    /// Grid by handle.
    pub fn grid(&self, id: GridId) -> Option<&Grid<F>> { self.grids.get(id.index()) }
    /// Every grid, in creation order.
    pub fn grids(&self) -> &[Grid<F>] { &self.grids }
    /// Number of grids.
    pub fn grid_count(&self) -> usize { self.grids.len() }
    /// Particle by handle.
    pub fn particle(&self, id: ParticleId) -> Option<&Particle<F>> { self.particles.get(id.index()) }
    /// Mutable particle by handle.
    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle<F>> { self.particles.get_mut(id.index()) }
    /// Every particle, grid particles included.
    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    /// Number of particles.
    pub fn particle_count(&self) -> usize { self.particles.len() }

    /// Advance the world by `dt`.
    pub fn update(&mut self, dt: F) {
        self.update_observed(dt, &mut NoOpStepObserver);
    }

    /// Advance the world by `dt`, reporting each stage to `observer`.
    ///
    /// 1. snapshot `state_last`
    /// 2. detect contacts against the snapshot
    /// 3. RK4 every particle, neighbours frozen at the snapshot
    /// 4. relax max-distance springs
    /// 5. copy positions into the grids
    pub fn update_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        for p in self.particles.iter_mut() {
            p.snapshot();
        }

        let contacts = detect_contacts(&mut self.particles, &self.grids, self.play_area.as_ref(), &self.config);
        observer.on_collisions(contacts);

        let next: AllocVec<State<F>> = {
            let ctx = ForceContext::new(&self.particles, &self.grids);
            self.particles
                .iter()
                .map(|p| {
                    let mut state = p.state;
                    integrate(p, &mut state, dt, &ctx);
                    state
                })
                .collect()
        };
        for (p, state) in self.particles.iter_mut().zip(next) {
            p.state = state;
            p.contacts.clear();
        }
        observer.on_integrate();

        let corrections = relax(&mut self.particles, &self.grids, self.config.relaxation_passes, observer);
        self.publish_positions();

        tracing::trace!(dt = dt.to_f64(), contacts, corrections, "world step");
        observer.on_step_complete();
    }

    fn publish_positions(&mut self) {
        for grid in self.grids.iter_mut() {
            for point in grid.positions.iter_mut() {
                let pos = self.particles[point.particle.index()].state.position;
                point.x = pos.x;
                point.y = pos.y;
            }
        }
    }
}

impl<F: Float> Default for World<F> {
    fn default() -> Self {
        Self::new(WorldConfig::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_handles_are_rejected() {
        let mut world = World::<f64>::default();
        let bogus = ParticleId(3);
        assert_eq!(
            world.detach_point(bogus),
            Err(PhysicsError::ParticleOutOfBounds { index: 3, count: 0 })
        );
        assert_eq!(
            world.set_pulse_modifier(GridId(0), 1.0),
            Err(PhysicsError::GridOutOfBounds { index: 0, count: 0 })
        );
    }

    #[test]
    fn invalid_inertia_is_rejected() {
        let mut world = World::<f64>::default();
        assert_eq!(world.add_particle(Vec2::zero(), 0.0, 1.0), Err(PhysicsError::InvalidInertia));
        assert_eq!(world.add_particle(Vec2::zero(), f64::NAN, 1.0), Err(PhysicsError::InvalidInertia));
        let mesh = MeshConfig::new(1, 1).with_inertia(-1.0);
        assert_eq!(world.generate_mesh(&mesh), Err(PhysicsError::InvalidInertia));
    }

    #[test]
    fn shape_mismatch_leaves_world_empty() {
        let mut world = World::<f64>::default();
        let mesh = MeshConfig::new(2, 2).with_collision_def(&["xx", "xx", "xx"]);
        assert!(matches!(world.generate_mesh(&mesh), Err(PhysicsError::ShapeMismatch { .. })));
        assert_eq!(world.particle_count(), 0);
        assert_eq!(world.grid_count(), 0);
    }

    #[test]
    fn mesh_springs_are_two_sided() {
        let mut world = World::<f64>::default();
        world.generate_mesh(&MeshConfig::new(1, 0)).unwrap();
        let a = world.particle(ParticleId(0)).unwrap();
        let b = world.particle(ParticleId(1)).unwrap();
        assert_eq!(a.springs.len(), 1);
        assert_eq!(a.springs[0].id, b.springs[0].id);
        assert!(a.springs[0].targets(ParticleId(1)));
        assert!(b.springs[0].targets(ParticleId(0)));
        let max = a.springs[0].max_distance.unwrap();
        assert!((max - 90.0).abs() < 1e-4);
    }

    #[test]
    fn self_attachment_is_rejected() {
        let mut world = World::<f64>::default();
        let p = world.add_particle(Vec2::zero(), 1.0, 1.0).unwrap();
        assert_eq!(world.attach_points(p, p), Err(PhysicsError::SelfAttachment));
    }

    #[test]
    fn unaffix_keeps_user_anchor_springs() {
        let mut world = World::<f64>::default();
        let p = world.add_particle(Vec2::zero(), 1.0, 1.0).unwrap();
        let user = world
            .add_anchor_spring(p, Vec2::new(5.0, 0.0), SpringParams::new(10.0, 0.5, 2.0))
            .unwrap();
        world.affix_point(p, Vec2::new(1.0, 1.0)).unwrap();
        world.affix_point(p, Vec2::new(2.0, 2.0)).unwrap();

        assert_eq!(world.unaffix_point(p), Ok(2));
        let springs = &world.particle(p).unwrap().springs;
        assert_eq!(springs.len(), 1);
        assert_eq!(springs[0].id, user);
        assert!(springs[0].is_anchor() && !springs[0].affixed);
        assert_eq!(world.unaffix_point(p), Ok(0));
    }

    #[test]
    fn unaffix_leaves_mesh_springs() {
        let mut world = World::<f64>::default();
        world.generate_mesh(&MeshConfig::new(1, 0)).unwrap();
        let p = ParticleId(0);
        world.affix_point(p, Vec2::new(5.0, 5.0)).unwrap();
        assert_eq!(world.particle(p).unwrap().springs.len(), 2);
        assert_eq!(world.unaffix_point(p), Ok(1));
        assert_eq!(world.particle(p).unwrap().springs.len(), 1);
    }
}

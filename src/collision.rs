//! Overlap and boundary detection producing frame-scoped contacts.
//!
//! Pairs are tested brute force, O(n^2) per frame.

use crate::config::WorldConfig;
use crate::contact::Contact;
use crate::float::Float;
use crate::force::pulse_of;
use crate::grid::Grid;
use crate::particle::Particle;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Circular region particles are pushed back into.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayArea<F: Float> {
    pub center: Vec2<F>,
    pub radius: F,
}

impl<F: Float> PlayArea<F> {
    /// Negative radii are clamped to zero.
    pub fn new(center: Vec2<F>, radius: F) -> Self {
        PlayArea { center, radius: radius.max(F::zero()) }
    }

    /// Inside or on the boundary circle.
    pub fn contains(&self, position: Vec2<F>) -> bool {
        position.distance_sq(self.center) <= self.radius * self.radius
    }

    /// Inward contact for a particle outside the area.
    fn boundary_contact(&self, particle: &Particle<F>, config: &WorldConfig<F>) -> Option<Contact<F>> {
        if self.contains(particle.state_last.position) {
            return None;
        }
        let offset = self.center - particle.state_last.position;
        let dist = offset.length();
        Some(Contact::new(
            offset.scale(F::one() / dist),
            dist - self.radius,
            config.boundary_stiffness,
            config.boundary_damping,
            particle.state_last.momentum,
            Vec2::zero(),
        ))
    }
}

/// Append this frame's contacts to every particle. Returns how many were made.
///
/// Reads positions and momenta from `state_last`, so call it after the
/// frame snapshot. A colliding pair gets one contact each, with opposite
/// normals and equal depth.
pub fn detect_contacts<F: Float>(
    particles: &mut [Particle<F>],
    grids: &[Grid<F>],
    play_area: Option<&PlayArea<F>>,
    config: &WorldConfig<F>,
) -> usize {
    let mut created = 0;

    if let Some(area) = play_area {
        for p in particles.iter_mut() {
            if let Some(contact) = area.boundary_contact(p, config) {
                p.contacts.push(contact);
                created += 1;
            }
        }
    }

    let radii: AllocVec<F> = particles
        .iter()
        .map(|p| p.radius * pulse_of(grids, p.grid))
        .collect();

    for i in 0..particles.len() {
        let (head, tail) = particles.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.collides {
            continue;
        }
        for (k, b) in tail.iter_mut().enumerate() {
            if !a.can_collide_with(b) {
                continue;
            }
            let reach = radii[i] + radii[i + 1 + k];
            let delta = a.state_last.position - b.state_last.position;
            let dist_sq = delta.length_sq();
            if dist_sq >= reach * reach {
                continue;
            }

            let normal = match delta.try_normalized() {
                Ok(n) => n,
                Err(_) => {
                    tracing::trace!(a = i, b = i + 1 + k, "coincident particles, using x axis as contact normal");
                    Vec2::new(F::one(), F::zero())
                }
            };
            let contact = Contact::new(
                normal,
                reach - dist_sq.sqrt(),
                config.contact_stiffness,
                config.contact_damping,
                a.state_last.momentum,
                b.state_last.momentum,
            );
            b.contacts.push(contact.mirrored());
            a.contacts.push(contact);
            created += 2;
        }
    }

    created
}

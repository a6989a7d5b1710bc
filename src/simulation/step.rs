//! One simulation tick over a set of active particles

use super::collision::{ordered_active, sweep_ordered, Boundary};
use super::integrator::Integrator;
use super::states::Particle;
use crate::math::NVec3;

/// What happened during one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub active: usize, // particles integrated
    pub contacts: usize, // pair collisions resolved
}

/// Advance the `active` particles by `dt`.
///
/// `active` may arrive in any order; it is sorted, deduplicated and stripped
/// of out-of-range indices first.
///
/// 1. integrate each active particle
/// 2. resolve every unordered active pair, in index order
/// 3. confine each active particle to `boundary`
///
/// Inactive particles are not touched. Returns the number of pair contacts.
pub fn advance<I: Integrator + ?Sized>(
    particles: &mut [Particle],
    active: &[usize],
    integrator: &I,
    dt: f64,
    gravity: NVec3,
    boundary: &Boundary,
) -> usize {
    let active = ordered_active(active, particles.len());

    for &i in &active {
        integrator.step(&mut particles[i], dt, gravity);
    }

    let contacts = sweep_ordered(particles, &active);

    for &i in &active {
        boundary.resolve(&mut particles[i]);
    }

    contacts
}

/// [`advance`] over every particle
pub fn advance_all<I: Integrator + ?Sized>(
    particles: &mut [Particle],
    integrator: &I,
    dt: f64,
    gravity: NVec3,
    boundary: &Boundary,
) -> usize {
    let active: Vec<usize> = (0..particles.len()).collect();
    advance(particles, &active, integrator, dt, gravity, boundary)
}

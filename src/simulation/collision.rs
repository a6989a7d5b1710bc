//! Collision detection and response
//!
//! Three resolvers, none of which can fail:
//! - `resolve_box_boundary`: axis-aligned box centred on the origin
//! - `resolve_sphere_boundary`: sphere centred on the origin
//! - `resolve_pair_collision`: two overlapping particles
//!
//! and `sweep_pairs`, the brute-force O(n^2) pass over every unordered pair.
//! Degenerate normals (zero-length delta or position) fall back to
//! [`fallback_normal`] so the state always stays finite.

use serde::Deserialize;
use tracing::debug;

use super::states::Particle;
use crate::math::{direction, fallback_normal, NVec3};

/// Region particles are confined to
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Boundary {
    /// Unbounded
    None,
    /// Box `[-h, h]` on each axis
    Box { half_extents: [f64; 3] },
    /// Sphere of `radius` around the origin
    Sphere { radius: f64 },
}

impl Boundary {
    pub fn resolve(&self, p: &mut Particle) {
        match self {
            Boundary::None => {}
            Boundary::Box { half_extents } => {
                resolve_box_boundary(p, &NVec3::from(*half_extents))
            }
            Boundary::Sphere { radius } => resolve_sphere_boundary(p, *radius),
        }
    }

    /// Whether a particle of `radius` has room to sit inside.
    ///
    /// A box needs `radius <= h` on every axis, a sphere needs `radius < R`.
    /// Anything larger cannot be confined: the resolvers would flip it to
    /// the far wall instead.
    pub fn admits(&self, radius: f64) -> bool {
        match self {
            Boundary::None => true,
            Boundary::Box { half_extents } => half_extents.iter().all(|&h| radius <= h),
            Boundary::Sphere { radius: r_boundary } => radius < *r_boundary,
        }
    }
}

/// Clamp `p` inside the box and reflect the velocity on every violated face.
///
/// Axes are handled independently so a corner hit corrects all of them in
/// one call. Perfectly elastic: no damping.
pub fn resolve_box_boundary(p: &mut Particle, half_extents: &NVec3) {
    let r = p.radius();

    for axis in 0..3 {
        let h = half_extents[axis];

        if p.x[axis] + r > h {
            p.x[axis] = h - r;
            p.v[axis] = -p.v[axis];
        }

        if p.x[axis] - r < -h {
            p.x[axis] = -h + r;
            p.v[axis] = -p.v[axis];
        }
    }
}

/// Reflect `p` off the inside of a sphere of `boundary_radius`.
///
/// On contact the velocity is mirrored about the outward normal, damped, and
/// the particle is projected back onto the interior shell so it cannot
/// tunnel out on the same tick.
pub fn resolve_sphere_boundary(p: &mut Particle, boundary_radius: f64) {
    let distance = p.x.norm();

    if distance + p.radius() < boundary_radius {
        return;
    }

    let normal = direction(&p.x).unwrap_or_else(|| {
        debug!("particle at sphere centre, using fallback normal");
        fallback_normal()
    });

    // v' = v - 2 (v.n) n
    p.v -= 2.0 * p.v.dot(&normal) * normal;
    p.v *= p.damping();
    p.x = normal * (boundary_radius - p.radius());
}

/// Resolve overlap between `a` and `b`.
///
/// Velocities are swapped, each side receiving the other's velocity scaled
/// by its own damping. Mass plays no part. Positions are then pushed apart
/// symmetrically along the centre line until they just touch. Returns
/// whether the pair was in contact.
pub fn resolve_pair_collision(a: &mut Particle, b: &mut Particle) -> bool {
    let delta = b.x - a.x;
    let distance = delta.norm();
    let min_distance = a.radius() + b.radius();

    if distance >= min_distance {
        return false;
    }

    let va = a.v;
    a.v = b.v * a.damping();
    b.v = va * b.damping();

    let normal = direction(&delta).unwrap_or_else(|| {
        debug!("coincident particles, using fallback normal");
        fallback_normal()
    });
    let half_overlap = 0.5 * (min_distance - distance);

    a.x -= normal * half_overlap;
    b.x += normal * half_overlap;

    true
}

/// Two distinct mutable particles out of one slice
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (left, right) = particles.split_at_mut(j);
    (&mut left[i], &mut right[0])
}

/// `active` as strictly ascending, in-bounds indices.
///
/// Out-of-range entries are dropped and duplicates collapse to one, so any
/// caller-supplied list is safe to sweep.
pub fn ordered_active(active: &[usize], len: usize) -> Vec<usize> {
    let mut ordered: Vec<usize> = active.iter().copied().filter(|&i| i < len).collect();
    ordered.sort_unstable();
    ordered.dedup();
    ordered
}

/// Resolve every unordered pair among `active`.
///
/// Pairs are visited in ascending index order and mutated immediately, so
/// later pairs observe earlier resolutions within the same sweep. The order
/// of `active` does not matter. Returns the number of contacts resolved.
pub fn sweep_pairs(particles: &mut [Particle], active: &[usize]) -> usize {
    let active = ordered_active(active, particles.len());
    sweep_ordered(particles, &active)
}

/// [`sweep_pairs`] over a list already passed through [`ordered_active`]
pub(crate) fn sweep_ordered(particles: &mut [Particle], active: &[usize]) -> usize {
    let mut contacts = 0;

    for (k, &i) in active.iter().enumerate() {
        for &j in &active[k + 1..] {
            let (a, b) = pair_mut(particles, i, j);
            if resolve_pair_collision(a, b) {
                contacts += 1;
            }
        }
    }

    contacts
}

//! Core state types for the particle sandbox.
//!
//! - `Particle`: one rigid sphere (no spin), position/velocity in `NVec3`
//! - `SimulationWorld`: the ordered particle list, the parallel spawn-time
//!   list and the current simulation time `t`
//!
//! Index `i` of `particles` and index `i` of `spawn_times` describe the same
//! particle. Order is insertion order and is significant: the pair sweep
//! walks it and later pairs see the result of earlier ones.

use crate::error::{ensure_positive, SimError};
use crate::math::NVec3;
use crate::simulation::collision::Boundary;
use crate::simulation::integrator::Integrator;
use crate::simulation::spawn::spawn_gate;
use crate::simulation::step::{advance, TickReport};

/// Velocity multiplier after a collision when none is given
pub const DEFAULT_DAMPING: f64 = 0.96;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub a: NVec3, // acceleration used by the last integration step
    pending: NVec3, // external force / mass accumulated since the last step
    m: f64, // mass
    radius: f64, // collision radius
    damping: f64, // velocity scale applied after collisions, in (0, 1]
}

impl Particle {
    /// New particle with zero acceleration; fails fast on a non-positive
    /// mass or radius.
    ///
    /// [`VelocityVerlet`](crate::VelocityVerlet) reads `a` as last step's
    /// acceleration, so a particle left at zero only picks up half of
    /// gravity's velocity change on its first step. Seed it with
    /// [`with_acceleration`](Self::with_acceleration)`(gravity)` when
    /// integrating with Verlet; scenarios always do.
    pub fn new(x: NVec3, v: NVec3, m: f64, radius: f64) -> Result<Self, SimError> {
        Ok(Self {
            x,
            v,
            a: NVec3::zeros(),
            pending: NVec3::zeros(),
            m: ensure_positive("mass", m)?,
            radius: ensure_positive("radius", radius)?,
            damping: DEFAULT_DAMPING,
        })
    }

    pub fn with_damping(mut self, damping: f64) -> Result<Self, SimError> {
        if !(damping > 0.0 && damping <= 1.0) {
            return Err(SimError::invalid("damping", damping, "must lie in (0, 1]"));
        }
        self.damping = damping;
        Ok(self)
    }

    /// Seed the acceleration Verlet treats as `a_old` on its first step
    pub fn with_acceleration(mut self, a: NVec3) -> Self {
        self.a = a;
        self
    }

    /// Accumulate `force / m` for the next integration step only
    pub fn apply_force(&mut self, force: &NVec3) {
        self.pending += force / self.m;
    }

    /// Take the accumulated external acceleration, leaving zero behind
    pub(crate) fn take_pending(&mut self) -> NVec3 {
        std::mem::replace(&mut self.pending, NVec3::zeros())
    }

    pub fn pending_acceleration(&self) -> NVec3 {
        self.pending
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

/// Stable handle to a particle: its index in the world
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub usize);

#[derive(Debug, Clone, Default)]
pub struct SimulationWorld {
    particles: Vec<Particle>, // insertion ordered
    spawn_times: Vec<f64>, // spawn_times[i] belongs to particles[i]
    pub t: f64, // elapsed time
}

impl SimulationWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a particle that becomes active once `t >= spawn_time`
    pub fn spawn(&mut self, particle: Particle, spawn_time: f64) -> ParticleId {
        self.particles.push(particle);
        self.spawn_times.push(spawn_time);
        ParticleId(self.particles.len() - 1)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn spawn_times(&self) -> &[f64] {
        &self.spawn_times
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.0)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Indices eligible at the current time
    pub fn active(&self) -> Vec<usize> {
        spawn_gate(self.t, &self.spawn_times)
    }

    /// One frame: advance the clock by `dt`, gate on spawn time, then
    /// integrate, sweep pairs and confine every active particle.
    pub fn tick<I: Integrator + ?Sized>(
        &mut self,
        integrator: &I,
        dt: f64,
        gravity: NVec3,
        boundary: &Boundary,
    ) -> TickReport {
        self.t += dt;
        let active = self.active();
        let contacts = advance(&mut self.particles, &active, integrator, dt, gravity, boundary);
        TickReport {
            active: active.len(),
            contacts,
        }
    }

    /// Total kinetic energy of the active particles
    pub fn kinetic_energy(&self) -> f64 {
        self.active()
            .into_iter()
            .map(|i| self.particles[i].kinetic_energy())
            .sum()
    }

    /// Largest speed among the active particles
    pub fn max_speed(&self) -> f64 {
        self.active()
            .into_iter()
            .map(|i| self.particles[i].v.norm())
            .fold(0.0, f64::max)
    }
}

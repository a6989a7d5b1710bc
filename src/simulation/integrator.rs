//! Per-particle time integrators
//!
//! Both policies share the [`Integrator`] trait so a deployment picks one and
//! the tick code stays generic. Each step starts from baseline gravity; any
//! force applied since the last step is added once and then dropped.

use super::states::Particle;
use crate::math::NVec3;

/// Advances one particle by `dt` under constant `gravity` plus its pending
/// external acceleration
pub trait Integrator {
    fn step(&self, p: &mut Particle, dt: f64, gravity: NVec3);
}

/// First order: velocity first, then position with the new velocity
#[derive(Debug, Default, Clone, Copy)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, p: &mut Particle, dt: f64, gravity: NVec3) {
        // a = g + F/m, not retained past this step
        p.a = gravity + p.take_pending();

        p.v += p.a * dt;
        p.x += p.v * dt;
    }
}

/// Second order velocity-Verlet.
/// Uses the acceleration left on the particle by the previous step as
/// `a_old` and averages it with the freshly evaluated `a_new`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VelocityVerlet;

impl Integrator for VelocityVerlet {
    fn step(&self, p: &mut Particle, dt: f64, gravity: NVec3) {
        let a_old = p.a;

        // x_n+1 = x_n + v_n dt + 1/2 a_n dt^2
        p.x += p.v * dt + a_old * (0.5 * dt * dt);

        // a_n+1 from gravity baseline plus forces applied this tick
        let a_new = gravity + p.take_pending();

        // v_n+1 = v_n + 1/2 (a_n + a_n+1) dt
        p.v += (a_old + a_new) * (0.5 * dt);
        p.a = a_new;
    }
}


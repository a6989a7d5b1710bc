//! Build fully-initialized sandbox scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - world state (`SimulationWorld` with every particle and its spawn time)
//! - the free-look camera (`CameraState`)
//!
//! The viewer wraps a `Scenario` in a resource; the headless runner drives it
//! directly.

use tracing::info;

use crate::camera::CameraState;
use crate::configuration::config::{BodyConfig, EmitterConfig, IntegratorConfig, ScenarioConfig};
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, SimError};
use crate::math::NVec3;
use crate::simulation::collision::Boundary;
use crate::simulation::engine::Engine;
use crate::simulation::integrator::{SemiImplicitEuler, VelocityVerlet};
use crate::simulation::params::{Parameters, MAX_STEPS};
use crate::simulation::spawn::staggered;
use crate::simulation::states::{Particle, SimulationWorld};
use crate::simulation::step::TickReport;

/// Runtime bundle built from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub world: SimulationWorld,
    pub camera: CameraState,
    pub look_sensitivity: f64, // degrees per pixel
}

/// Summary of a headless run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub t: f64,
    pub active: usize,
    pub contacts: usize, // total over the run
    pub kinetic_energy: f64,
    pub max_speed: f64,
}

/// Parse a 3-component vector from a YAML list
fn vec3(name: &'static str, c: &[f64]) -> Result<NVec3, SimError> {
    match c {
        [x, y, z] if c.iter().all(|v| v.is_finite()) => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::invalid(name, c.len() as f64, "expected 3 finite components")),
    }
}

fn validate_boundary(boundary: &Boundary) -> Result<(), SimError> {
    match boundary {
        Boundary::None => Ok(()),
        Boundary::Box { half_extents } => {
            for h in half_extents {
                ensure_positive("boundary.half_extents", *h)?;
            }
            Ok(())
        }
        Boundary::Sphere { radius } => ensure_positive("boundary.radius", *radius).map(|_| ()),
    }
}

/// Launch velocity from a speed and spherical angles (degrees)
pub fn launch_velocity(magnitude: f64, phi_deg: f64, theta_deg: f64) -> NVec3 {
    let phi = phi_deg.to_radians();
    let theta = theta_deg.to_radians();
    magnitude
        * NVec3::new(
            phi.cos() * theta.cos(),
            phi.sin() * theta.sin(),
            theta.sin(),
        )
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: ensure_positive("t_end", p_cfg.t_end)?,
            h0: ensure_positive("h0", p_cfg.h0)?,
            max_dt: ensure_positive("max_dt", p_cfg.max_dt)?,
            gravity: vec3("gravity", &p_cfg.gravity)?,
            damping: p_cfg.damping,
        };
        let steps = parameters.t_end / parameters.h0;
        if steps > MAX_STEPS {
            return Err(SimError::invalid("t_end / h0", steps, "too many headless steps"));
        }

        // Engine (runtime) from EngineConfig
        validate_boundary(&cfg.engine.boundary)?;
        let engine = Engine {
            integrator: cfg.engine.integrator,
            boundary: cfg.engine.boundary,
        };

        // Particles: emitter stream first, then explicit bodies, in order
        let mut world = SimulationWorld::new();
        if let Some(em) = &cfg.emitter {
            spawn_emitter(&mut world, em, &parameters)?;
        }
        for bc in &cfg.bodies {
            spawn_body(&mut world, bc, &parameters)?;
        }
        for p in world.particles() {
            if !engine.boundary.admits(p.radius()) {
                return Err(SimError::invalid("radius", p.radius(), "particle does not fit inside the boundary"));
            }
        }

        let camera = CameraState::new(
            vec3("camera.position", &cfg.camera.position)?,
            ensure_positive("camera.speed", cfg.camera.speed)?,
        );
        let look_sensitivity = ensure_positive("camera.sensitivity", cfg.camera.sensitivity)?;

        info!(
            particles = world.len(),
            integrator = ?engine.integrator,
            boundary = ?engine.boundary,
            "scenario built"
        );

        Ok(Self {
            engine,
            parameters,
            world,
            camera,
            look_sensitivity,
        })
    }

    /// Advance one frame of `frame_dt` seconds (clamped to `max_dt`)
    pub fn step(&mut self, frame_dt: f64) -> TickReport {
        let dt = self.parameters.clamp_dt(frame_dt);
        let gravity = self.parameters.gravity;
        let boundary = &self.engine.boundary;

        match self.engine.integrator {
            IntegratorConfig::Euler => self.world.tick(&SemiImplicitEuler, dt, gravity, boundary),
            IntegratorConfig::Verlet => self.world.tick(&VelocityVerlet, dt, gravity, boundary),
        }
    }

    /// Run `steps` fixed `h0` steps, or up to `t_end` when `steps` is `None`
    pub fn run_headless(&mut self, steps: Option<usize>) -> RunSummary {
        let steps = steps.unwrap_or_else(|| self.parameters.steps_to_end());
        let h0 = self.parameters.h0;
        let log_every = (steps / 10).max(1);

        let mut contacts = 0;
        let mut last = TickReport::default();
        for n in 1..=steps {
            last = self.step(h0);
            contacts += last.contacts;

            if n % log_every == 0 {
                info!(
                    step = n,
                    t = self.world.t,
                    active = last.active,
                    energy = self.world.kinetic_energy(),
                    "progress"
                );
            }
        }

        RunSummary {
            steps,
            t: self.world.t,
            active: last.active,
            contacts,
            kinetic_energy: self.world.kinetic_energy(),
            max_speed: self.world.max_speed(),
        }
    }
}

fn spawn_emitter(world: &mut SimulationWorld, em: &EmitterConfig, p: &Parameters) -> Result<(), SimError> {
    let x = vec3("emitter.position", &em.position)?;
    let v = launch_velocity(
        ensure_finite("emitter.magnitude", em.magnitude)?,
        ensure_finite("emitter.phi_deg", em.phi_deg)?,
        ensure_finite("emitter.theta_deg", em.theta_deg)?,
    );
    let delay = ensure_non_negative("emitter.spawn_delay", em.spawn_delay)?;

    for t_spawn in staggered(em.count, 0.0, delay) {
        let particle = Particle::new(x, v, em.mass, em.radius)?
            .with_damping(p.damping)?
            .with_acceleration(p.gravity);
        world.spawn(particle, t_spawn);
    }
    Ok(())
}

fn spawn_body(world: &mut SimulationWorld, bc: &BodyConfig, p: &Parameters) -> Result<(), SimError> {
    let particle = Particle::new(vec3("bodies[].x", &bc.x)?, vec3("bodies[].v", &bc.v)?, bc.m, bc.radius)?
        .with_damping(bc.damping.unwrap_or(p.damping))?
        .with_acceleration(p.gravity);
    world.spawn(particle, ensure_finite("bodies[].spawn_time", bc.spawn_time)?);
    Ok(())
}

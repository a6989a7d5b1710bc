pub mod error;
pub mod math;
pub mod camera;
pub mod simulation;
pub mod configuration;
#[cfg(feature = "viewer")]
pub mod visualization;
pub mod benchmark;

pub use error::SimError;
pub use math::{NVec3, Quat};
pub use camera::{Basis, CameraState};
pub use simulation::states::{Particle, ParticleId, SimulationWorld};
pub use simulation::integrator::{Integrator, SemiImplicitEuler, VelocityVerlet};
pub use simulation::collision::{Boundary, resolve_box_boundary, resolve_sphere_boundary, resolve_pair_collision, sweep_pairs, ordered_active};
pub use simulation::spawn::spawn_gate;
pub use simulation::step::{advance, advance_all, TickReport};
pub use simulation::scenario::{Scenario, RunSummary};

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, CameraConfig, EmitterConfig, BodyConfig, ScenarioConfig};

#[cfg(feature = "viewer")]
pub use visualization::sandbox_vis3d::run_3d;

pub use benchmark::benchmark::{bench_pair_sweep, bench_integrators, bench_integrator_error};

//! Configuration types for loading sandbox scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator and confining boundary
//! - [`ParametersConfig`] – step sizes and physical constants
//! - [`CameraConfig`]     – free-look camera start state
//! - [`EmitterConfig`]    – optional stream of identical particles
//! - [`BodyConfig`]       – individually placed particles
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A sphere-confined fountain matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: "verlet"    # or "euler"
//!   boundary:
//!     kind: sphere          # or box / none
//!     radius: 400.0
//!
//! parameters:
//!   t_end: 30.0             # headless run length
//!   h0: 0.016               # fixed step size
//!   max_dt: 0.05            # frame delta clamp
//!   gravity: [0.0, -98.1, 0.0]
//!   damping: 0.96
//!
//! camera:
//!   position: [400.0, 300.0, 900.0]
//!   speed: 300.0
//!   sensitivity: 0.05       # degrees per pixel of mouse motion
//!
//! emitter:
//!   count: 100
//!   position: [0.0, 200.0, 0.0]
//!   magnitude: 400.0
//!   phi_deg: -90.0
//!   theta_deg: 1.0
//!   mass: 300.0
//!   radius: 10.0
//!   spawn_delay: 0.5
//!
//! bodies:
//!   - x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!     m: 1.0
//!     radius: 20.0
//! ```
//!
//! The scenario builder validates this and maps it into the runtime
//! [`crate::Scenario`].

use serde::Deserialize;

use crate::simulation::collision::Boundary;

/// Which integrator the engine uses
/// `integrator: "euler"` or `integrator: "verlet"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorConfig {
    #[serde(rename = "euler")] // Semi-implicit Euler, first order, one acceleration per step
    Euler,

    #[serde(rename = "verlet")] // Velocity-Verlet, second order, averages old and new acceleration
    Verlet,
}

/// High-level engine configuration
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig, // Time integrator used for advancing particles
    #[serde(default = "no_boundary")]
    pub boundary: Boundary, // Region particles are confined to
}

fn no_boundary() -> Boundary {
    Boundary::None
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end for headless runs
    pub h0: f64, // fixed step size
    #[serde(default = "default_max_dt")]
    pub max_dt: f64, // largest frame delta passed to the integrator
    pub gravity: Vec<f64>, // constant acceleration, 3 components
    #[serde(default = "default_damping")]
    pub damping: f64, // collision damping for particles that don't set their own
}

fn default_max_dt() -> f64 {
    0.05
}

fn default_damping() -> f64 {
    crate::simulation::states::DEFAULT_DAMPING
}

/// Free-look camera start state
#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
    pub position: Vec<f64>, // Initial eye position
    pub speed: f64, // Translation speed in units per second
    pub sensitivity: f64, // Degrees of pitch/yaw per pixel of mouse motion
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: vec![0.0, 0.0, 900.0],
            speed: 300.0,
            sensitivity: 0.05,
        }
    }
}

/// A stream of identical particles released one after another from a
/// single point
#[derive(Deserialize, Debug, Clone)]
pub struct EmitterConfig {
    pub count: usize, // Number of particles
    pub position: Vec<f64>, // Shared spawn position
    pub magnitude: f64, // Launch speed
    pub phi_deg: f64, // Azimuthal launch angle
    pub theta_deg: f64, // Elevation launch angle
    pub mass: f64,
    pub radius: f64,
    pub spawn_delay: f64, // Seconds between consecutive releases
}

/// Configuration for a single particle's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial position
    pub v: Vec<f64>, // Initial velocity
    pub m: f64, // Mass, > 0
    pub radius: f64, // Collision radius, > 0
    #[serde(default)]
    pub spawn_time: f64, // Time at which the particle joins the simulation
    pub damping: Option<f64>, // Overrides parameters.damping
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // Integrator and boundary
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    #[serde(default)]
    pub camera: CameraConfig, // Viewer camera
    pub emitter: Option<EmitterConfig>, // Particle stream, spawned before `bodies`
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // Individually placed particles
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}

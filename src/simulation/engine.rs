//! High-level runtime engine settings
//!
//! Selects the integrator and the confining boundary
//! used when building and running a `Scenario`

use crate::configuration::config::IntegratorConfig;
use crate::simulation::collision::Boundary;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorConfig, // euler or verlet
    pub boundary: Boundary, // none, box or sphere
}

use std::time::Instant;

use crate::math::NVec3;
use crate::simulation::collision::{sweep_pairs, Boundary};
use crate::simulation::integrator::{Integrator, SemiImplicitEuler, VelocityVerlet};
use crate::simulation::states::Particle;
use crate::simulation::step::advance_all;

const GRAVITY: NVec3 = NVec3::new(0.0, -98.1, 0.0);

/// Helper to build `n` particles on a deterministic scatter, no rand needed
fn make_particles(n: usize) -> Vec<Particle> {
    (0..n)
        .filter_map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 300.0,
                (i_f * 0.13).cos() * 300.0,
                (i_f * 0.07).sin() * 300.0,
            );
            let v = NVec3::new((i_f * 0.11).cos(), 0.0, (i_f * 0.23).sin()) * 50.0;
            Particle::new(x, v, 1.0, 5.0).ok()
        })
        .map(|p| p.with_acceleration(GRAVITY))
        .collect()
}

/// Time the brute-force pair sweep for growing `n`
pub fn bench_pair_sweep() {
    let ns = [100, 200, 400, 800, 1600, 3200];

    for n in ns {
        let template = make_particles(n);
        let active: Vec<usize> = (0..n).collect();

        // Warm up
        let mut particles = template.clone();
        sweep_pairs(&mut particles, &active);

        let mut particles = template.clone();
        let t0 = Instant::now();
        let contacts = sweep_pairs(&mut particles, &active);
        let dt_sweep = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, sweep = {:8.6} s, contacts = {contacts}", dt_sweep);
    }
}

fn time_steps<I: Integrator>(integrator: &I, template: &[Particle], steps: usize) -> f64 {
    let mut particles = template.to_vec();
    let boundary = Boundary::Sphere { radius: 400.0 };

    let t0 = Instant::now();
    for _ in 0..steps {
        advance_all(&mut particles, integrator, 0.016, GRAVITY, &boundary);
    }
    t0.elapsed().as_secs_f64() / steps as f64
}

/// Full tick cost (integrate + sweep + boundary) for both integrators
pub fn bench_integrators() {
    let ns = [100, 200, 400, 800, 1600];
    let steps = 5;

    for n in ns {
        let template = make_particles(n);

        let euler = time_steps(&SemiImplicitEuler, &template, steps);
        let verlet = time_steps(&VelocityVerlet, &template, steps);

        println!("N = {:5}, euler step = {:8.6} s,   verlet step = {:8.6} s", n, euler, verlet);
    }
}

/// Distance from the analytic free-fall height after `steps` steps of `dt`
fn free_fall_error(integrator: &dyn Integrator, dt: f64, steps: usize) -> f64 {
    let t = steps as f64 * dt;
    let exact = 0.5 * GRAVITY.y * t * t;

    let mut p = match Particle::new(NVec3::zeros(), NVec3::zeros(), 1.0, 1.0) {
        Ok(p) => p.with_acceleration(GRAVITY),
        Err(_) => return f64::NAN,
    };
    for _ in 0..steps {
        integrator.step(&mut p, dt, GRAVITY);
    }
    (p.x.y - exact).abs()
}

/// Free-fall position error against the analytic 1/2 g t^2 after one
/// second, for a range of step sizes.
/// Paste output directly into a spreadsheet to graph
pub fn bench_integrator_error() {
    println!("dt,euler_err,verlet_err");

    for dt in [0.001, 0.002, 0.005, 0.01, 0.02, 0.05] {
        let steps = (1.0_f64 / dt).round() as usize;
        let euler = free_fall_error(&SemiImplicitEuler, dt, steps);
        let verlet = free_fall_error(&VelocityVerlet, dt, steps);

        println!("{},{:.6},{:.6}", dt, euler, verlet);
    }
}

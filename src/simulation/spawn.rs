//! Time-based spawn gate

/// Indices whose spawn time has been reached, ascending.
///
/// Particle `i` is eligible once `elapsed >= spawn_times[i]`; everything
/// else is left out of the tick entirely.
pub fn spawn_gate(elapsed: f64, spawn_times: &[f64]) -> Vec<usize> {
    spawn_times
        .iter()
        .enumerate()
        .filter(|&(_, &t_spawn)| elapsed >= t_spawn)
        .map(|(i, _)| i)
        .collect()
}

/// Spawn times for `count` particles released every `delay` seconds from `start`
pub fn staggered(count: usize, start: f64, delay: f64) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * delay).collect()
}

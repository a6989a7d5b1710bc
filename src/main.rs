use psim::{Scenario, ScenarioConfig};
use psim::{bench_integrator_error, bench_integrators, bench_pair_sweep};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Particle sandbox with a quaternion free-look camera")]
struct Args {
    /// Scenario file, looked up under `scenarios/`
    #[arg(short, default_value = "sphere_fountain.yaml")]
    file_name: String,

    /// Run without a window using the fixed step `h0`
    #[arg(long)]
    headless: bool,

    /// Number of headless steps (defaults to t_end / h0)
    #[arg(long)]
    steps: Option<usize>,

    /// Run the timing benchmarks and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_pair_sweep();
        bench_integrators();
        bench_integrator_error();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless {
        let summary = scenario.run_headless(args.steps);
        info!(
            steps = summary.steps,
            t = summary.t,
            active = summary.active,
            contacts = summary.contacts,
            energy = summary.kinetic_energy,
            max_speed = summary.max_speed,
            "headless run finished"
        );
        return Ok(());
    }

    run_viewer(scenario)
}

#[cfg(feature = "viewer")]
fn run_viewer(scenario: Scenario) -> Result<()> {
    psim::run_3d(scenario);
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn run_viewer(_scenario: Scenario) -> Result<()> {
    anyhow::bail!("built without the `viewer` feature; pass --headless")
}

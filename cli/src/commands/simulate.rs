use collapse_core::api::{AppConfig, CliError};
use collapse_plugins::factory;

use super::cli::{Args, SimulateArgs};
use super::run;

pub async fn simulate_cmd(global: &Args, args: SimulateArgs, mut cfg: AppConfig) -> Result<(), CliError> {
    apply_args(&mut cfg, &args);
    let kind = factory::simulate_kind(&cfg);
    run::run_strategy(global, &cfg, kind, args.path.as_deref()).await
}

/// Command-line flags win over file and environment settings.
fn apply_args(cfg: &mut AppConfig, args: &SimulateArgs) {
    let sim = &mut cfg.simulate;
    if let Some(shots) = args.shots {
        sim.shots = shots;
    }
    if let Some(runner) = &args.qir_runner {
        sim.qir_runner = Some(runner.clone());
    }
    sim.qir |= args.qir;
    sim.skip_build |= args.skip_build;
    sim.no_orchestration |= args.no_orchestration;
}

use collapse_core::api::{AppConfig, CliError, StrategyKind};

use super::cli::{Args, AzureArgs};
use super::run;

pub async fn azure_cmd(global: &Args, args: AzureArgs, mut cfg: AppConfig) -> Result<(), CliError> {
    cfg.azure.target_id = Some(args.target_id);
    if let Some(shots) = args.shots {
        cfg.azure.shots = shots;
    }
    cfg.azure.skip_build |= args.skip_build;

    run::run_strategy(global, &cfg, StrategyKind::Azure, Some(args.path.as_path())).await
}

use std::sync::Arc;
use std::time::Duration;

use collapse_core::api as core_api;

use crate::runner::ProcessInvoker;
use crate::strategy::{AzureStrategy, DotnetStrategy, QirStrategy};

pub fn build_strategy(
    kind: core_api::StrategyKind,
    cfg: &core_api::AppConfig,
) -> Box<dyn core_api::ExecutionStrategy> {
    match kind {
        core_api::StrategyKind::Dotnet => Box::new(DotnetStrategy::new(cfg.simulate.clone())),
        core_api::StrategyKind::Qir => Box::new(QirStrategy::new(cfg.simulate.clone())),
        core_api::StrategyKind::Azure => Box::new(AzureStrategy::new(cfg.azure.clone())),
    }
}

/// Strategy for `collapse simulate`: QIR when requested, .NET otherwise.
pub fn simulate_kind(cfg: &core_api::AppConfig) -> core_api::StrategyKind {
    if cfg.simulate.qir {
        core_api::StrategyKind::Qir
    } else {
        core_api::StrategyKind::Dotnet
    }
}

pub fn build_invoker(cfg: &core_api::RunnerConfig) -> Arc<dyn core_api::ExecutionInvoker> {
    let mut invoker = ProcessInvoker::new().with_envs(cfg.env.clone());
    if let Some(secs) = cfg.timeout_secs {
        invoker = invoker.with_timeout(Duration::from_secs(secs));
    }
    Arc::new(invoker)
}

pub fn build_orchestrator(cfg: &core_api::AppConfig) -> core_api::ShotOrchestrator {
    let opts = core_api::OrchestratorOptions {
        max_attempts: cfg.runner.max_attempts,
        ..Default::default()
    };
    core_api::ShotOrchestrator::new(build_invoker(&cfg.runner)).with_options(opts)
}

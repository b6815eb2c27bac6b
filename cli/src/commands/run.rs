//! Build, orchestrate and render: the flow shared by every subcommand.

use std::path::Path;

use collapse_core::api::{
    AppConfig, CliError, Dispatch, ExecutionStrategy, OrchestrationError, ShotOrchestrator,
    SortOrder, StrategyKind, Tally,
};
use collapse_plugins::factory;

use super::cli::{Args, OutputFormat};
use crate::progress::{self, ShotProgress};
use crate::render::{self, RenderOptions};

pub async fn run_strategy(
    global: &Args,
    cfg: &AppConfig,
    kind: StrategyKind,
    target: Option<&Path>,
) -> Result<(), CliError> {
    let strategy = factory::build_strategy(kind, cfg);
    let orchestrator = factory::build_orchestrator(cfg);
    tracing::info!(strategy = %kind, target = ?target, "starting");

    build_step(&orchestrator, strategy.as_ref(), target).await?;
    let mut tally = execute(&orchestrator, strategy.as_ref(), target).await?;
    tally.sort(SortOrder::from(global.sort));

    emit(global, &tally)
}

async fn build_step(
    orchestrator: &ShotOrchestrator,
    strategy: &dyn ExecutionStrategy,
    target: Option<&Path>,
) -> Result<(), CliError> {
    let plan = strategy
        .plan_build(target)
        .map_err(OrchestrationError::from)?;
    let Some(plan) = plan else {
        eprintln!("✔ Build skipped");
        return Ok(());
    };

    let title = plan.title.clone().unwrap_or_else(|| "Building".to_string());
    let spinner = progress::spinner(format!("{title}..."));
    let built = orchestrator.build(&plan).await;
    spinner.finish_and_clear();
    built?;
    eprintln!("✔ Built successfully");
    Ok(())
}

async fn execute(
    orchestrator: &ShotOrchestrator,
    strategy: &dyn ExecutionStrategy,
    target: Option<&Path>,
) -> Result<Tally, CliError> {
    let tally = match strategy.dispatch() {
        Dispatch::Local { .. } => {
            let bar = ShotProgress::new("Running shots");
            let result = orchestrator.run(strategy, target, &bar).await;
            bar.finish();
            result?
        }
        Dispatch::Delegated(_) => {
            let spinner = progress::spinner(format!("Running shots on {}...", strategy.name()));
            let result = orchestrator
                .run(strategy, target, &collapse_core::api::NullProgress)
                .await;
            spinner.finish_and_clear();
            result?
        }
    };
    eprintln!("✔ Finished running shots");
    Ok(tally)
}

fn emit(global: &Args, tally: &Tally) -> Result<(), CliError> {
    let color = global.save.is_none() && render::color_enabled(global.no_color);
    let rendered = match global.output {
        OutputFormat::Text => render::render_text(
            tally,
            RenderOptions {
                width: global.width,
                color,
            },
        ),
        OutputFormat::Json => render::render_json(tally)? + "\n",
    };

    match &global.save {
        Some(path) => {
            std::fs::write(path, rendered)?;
            eprintln!("Results saved to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

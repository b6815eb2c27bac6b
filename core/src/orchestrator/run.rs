use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{ExecutionError, OrchestrationError, PlanningError};
use crate::invoker::ExecutionInvoker;
use crate::outcome::{sanitize_output, OutputMode};
use crate::response::{extract_histogram, DuplicateLabels};
use crate::strategy::{DelegatedFormat, Dispatch, ExecutionPlan, ExecutionStrategy};
use crate::tally::{Tally, TallyAggregator, TallyKind};

use super::progress::{ProgressSink, ProgressTracker};
use super::retry::invoke_with_retry;

/// Upper bound on external processes running at the same time.
pub const BATCH_SIZE: usize = 5;

#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Attempts per invocation when the process exits unsuccessfully. `1` disables retries.
    pub max_attempts: u32,
    pub duplicates: DuplicateLabels,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            duplicates: DuplicateLabels::Overwrite,
        }
    }
}

pub struct ShotOrchestrator {
    invoker: Arc<dyn ExecutionInvoker>,
    opts: OrchestratorOptions,
}

impl ShotOrchestrator {
    pub fn new(invoker: Arc<dyn ExecutionInvoker>) -> Self {
        Self {
            invoker,
            opts: OrchestratorOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: OrchestratorOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Runs a build plan once. Output is only logged.
    pub async fn build(&self, plan: &ExecutionPlan) -> Result<(), OrchestrationError> {
        tracing::info!(command = %plan, "building");
        let output = self
            .invoker
            .invoke(plan)
            .await
            .map_err(|source| OrchestrationError::Build { source })?;
        tracing::debug!(stdout_len = output.stdout.len(), "build finished");
        Ok(())
    }

    /// Plans and executes one run, returning the final tally.
    ///
    /// Any planning failure is returned before a process is spawned. The first unrecoverable
    /// execution failure aborts the run: shots still in flight are cancelled, no further batch
    /// starts and the counts gathered so far are discarded.
    pub async fn run(
        &self,
        strategy: &dyn ExecutionStrategy,
        target: Option<&Path>,
        progress: &dyn ProgressSink,
    ) -> Result<Tally, OrchestrationError> {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("orchestrate", run_id = %run_id, strategy = strategy.name());
        self.run_inner(strategy, target, progress)
            .instrument(span)
            .await
    }

    async fn run_inner(
        &self,
        strategy: &dyn ExecutionStrategy,
        target: Option<&Path>,
        progress: &dyn ProgressSink,
    ) -> Result<Tally, OrchestrationError> {
        let dispatch = strategy.dispatch();
        if let Dispatch::Local { shots: 0 } = dispatch {
            return Err(PlanningError::InvalidShots(0).into());
        }

        let plan = strategy.plan_execution(target)?;
        tracing::info!(command = %plan, ?dispatch, "execution planned");

        let started = Instant::now();
        let result = match dispatch {
            Dispatch::Local { shots } => {
                self.run_local(Arc::new(plan), shots as usize, progress).await
            }
            Dispatch::Delegated(format) => self.run_delegated(&plan, format, progress).await,
        };

        match &result {
            Ok(tally) => tracing::info!(
                outcomes = tally.len(),
                total = tally.total(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "run completed"
            ),
            Err(e) => tracing::error!(stage = e.stage(), error.message = %e, "run aborted"),
        }
        result
    }

    async fn run_local(
        &self,
        plan: Arc<ExecutionPlan>,
        shots: usize,
        progress: &dyn ProgressSink,
    ) -> Result<Tally, OrchestrationError> {
        let aggregator = Arc::new(TallyAggregator::new(TallyKind::Counts));
        let mut tracker = ProgressTracker::new(progress, shots);
        let batches = shots.div_ceil(BATCH_SIZE);
        let mut completed = 0usize;

        for (batch, first) in (0..shots).step_by(BATCH_SIZE).enumerate() {
            let len = BATCH_SIZE.min(shots - first);
            let mut set = JoinSet::new();
            for shot in first..first + len {
                let invoker = Arc::clone(&self.invoker);
                let plan = Arc::clone(&plan);
                let aggregator = Arc::clone(&aggregator);
                let max_attempts = self.opts.max_attempts;
                set.spawn(async move {
                    run_shot(shot, invoker.as_ref(), &plan, &aggregator, max_attempts).await
                });
            }

            // Dropping `set` on an early return aborts whatever is still running.
            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok(Ok(())) => completed += 1,
                    Ok(Err(source)) => {
                        return Err(OrchestrationError::Execution { completed, source });
                    }
                    Err(e) => return Err(OrchestrationError::Join(e.to_string())),
                }
            }

            tracker.advance(len);
            tracing::debug!(batch = batch + 1, batches, completed, "batch finished");
        }
        tracker.finish();

        let aggregator = Arc::try_unwrap(aggregator).map_err(|_| {
            OrchestrationError::Join("tally still shared after every shot joined".to_string())
        })?;
        Ok(aggregator.snapshot())
    }

    async fn run_delegated(
        &self,
        plan: &ExecutionPlan,
        format: DelegatedFormat,
        progress: &dyn ProgressSink,
    ) -> Result<Tally, OrchestrationError> {
        let mut tracker = ProgressTracker::new(progress, 1);
        let output = invoke_with_retry(self.invoker.as_ref(), plan, self.opts.max_attempts)
            .await
            .map_err(|source| OrchestrationError::Execution {
                completed: 0,
                source,
            })?;

        let tally = match format {
            DelegatedFormat::Histogram => {
                let aggregator = TallyAggregator::new(TallyKind::Weights);
                for (label, weight) in extract_histogram(&output.stdout, self.opts.duplicates) {
                    aggregator.record_weighted(&label, weight);
                }
                aggregator.snapshot()
            }
            DelegatedFormat::Annotated => {
                let aggregator = TallyAggregator::new(TallyKind::Counts);
                match sanitize_output(&output.stdout, OutputMode::Annotated) {
                    Ok(labels) => labels.iter().for_each(|l| aggregator.record(l)),
                    Err(e) => {
                        tracing::warn!(error.kind = "outcome.parse", error.message = %e, "runner reported no shots")
                    }
                }
                aggregator.snapshot()
            }
        };

        tracker.advance(1);
        tracker.finish();
        Ok(tally)
    }
}

async fn run_shot(
    shot: usize,
    invoker: &dyn ExecutionInvoker,
    plan: &ExecutionPlan,
    tally: &TallyAggregator,
    max_attempts: u32,
) -> Result<(), ExecutionError> {
    let output = invoke_with_retry(invoker, plan, max_attempts).await?;
    match sanitize_output(&output.stdout, OutputMode::LastLine) {
        Ok(labels) => {
            for label in &labels {
                tally.record(label);
            }
            tracing::debug!(shot, ?labels, "shot finished");
        }
        Err(e) => {
            tracing::warn!(shot, error.kind = "outcome.parse", error.message = %e, "shot produced no outcome")
        }
    }
    Ok(())
}

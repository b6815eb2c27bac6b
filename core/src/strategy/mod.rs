//! Execution strategies decide what to run; the orchestrator decides how often.

mod plan;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlanningError;

pub use plan::{DelegatedFormat, Dispatch, ExecutionPlan};

/// The closed set of strategies the tool knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Dotnet,
    Qir,
    Azure,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyKind::Dotnet => "dotnet",
            StrategyKind::Qir => "qir",
            StrategyKind::Azure => "azure",
        };
        f.write_str(s)
    }
}

pub trait ExecutionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn name(&self) -> &str;

    /// Command that builds the target before it can run, or `None` when nothing needs building.
    fn plan_build(&self, target: Option<&Path>) -> Result<Option<ExecutionPlan>, PlanningError>;

    /// Command that runs the target once. Must fail before anything is spawned when the target
    /// cannot be executed.
    fn plan_execution(&self, target: Option<&Path>) -> Result<ExecutionPlan, PlanningError>;

    fn dispatch(&self) -> Dispatch;
}

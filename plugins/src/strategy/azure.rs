use std::path::{Path, PathBuf};

use collapse_core::api as core_api;

use super::discovery;

/// Submits the project to an Azure Quantum target through the `az` CLI. The service runs every
/// shot and answers with a histogram of probabilities.
pub struct AzureStrategy {
    settings: core_api::AzureConfig,
}

impl AzureStrategy {
    pub fn new(settings: core_api::AzureConfig) -> Self {
        Self { settings }
    }
}

impl core_api::ExecutionStrategy for AzureStrategy {
    fn kind(&self) -> core_api::StrategyKind {
        core_api::StrategyKind::Azure
    }

    fn name(&self) -> &str {
        "azure"
    }

    fn plan_build(
        &self,
        _target: Option<&Path>,
    ) -> Result<Option<core_api::ExecutionPlan>, core_api::PlanningError> {
        Ok(None)
    }

    fn plan_execution(
        &self,
        target: Option<&Path>,
    ) -> Result<core_api::ExecutionPlan, core_api::PlanningError> {
        let target_id = self
            .settings
            .target_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(core_api::PlanningError::MissingConfig {
                key: "azure.target_id",
            })?;
        if self.settings.shots == 0 {
            return Err(core_api::PlanningError::InvalidShots(0));
        }

        let project = target
            .map(discovery::expand)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut args = vec![
            "quantum".to_string(),
            "execute".to_string(),
            "--project".to_string(),
            discovery::display(&project),
            "--target-id".to_string(),
            target_id.to_string(),
            "--shots".to_string(),
            self.settings.shots.to_string(),
            "--output".to_string(),
            "json".to_string(),
        ];
        if self.settings.skip_build {
            args.push("--no-build".to_string());
        }

        Ok(core_api::ExecutionPlan::new("az", args))
    }

    fn dispatch(&self) -> core_api::Dispatch {
        core_api::Dispatch::Delegated(core_api::DelegatedFormat::Histogram)
    }
}

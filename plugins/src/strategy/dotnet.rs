use std::path::{Path, PathBuf};

use collapse_core::api as core_api;

use super::discovery;

/// Runs a compiled Q# project through the .NET simulator, one process per shot.
pub struct DotnetStrategy {
    settings: core_api::SimulateConfig,
}

impl DotnetStrategy {
    pub fn new(settings: core_api::SimulateConfig) -> Self {
        Self { settings }
    }

    fn target_path(target: Option<&Path>) -> PathBuf {
        target.map(discovery::expand).unwrap_or_else(|| PathBuf::from("."))
    }

    /// Prefers a built assembly next to the project, falling back to `dotnet run`.
    fn executable_args(path: &Path) -> Result<Vec<String>, core_api::PlanningError> {
        if discovery::has_extension(path, "dll") {
            return Ok(vec![discovery::display(path)]);
        }

        if let Some(project) = discovery::project_name(path)? {
            let assembly = format!("{project}.dll");
            let built = discovery::first_existing(
                ["Release", "Debug"]
                    .iter()
                    .map(|cfg| path.join("bin").join(cfg).join("net6.0").join(&assembly)),
            );
            if let Some(dll) = built {
                tracing::debug!(dll = %dll.display(), "using prebuilt assembly");
                return Ok(vec![discovery::display(&dll)]);
            }
        }

        Ok(vec![
            "run".to_string(),
            "--project".to_string(),
            discovery::display(path),
            "-c".to_string(),
            "Release".to_string(),
        ])
    }
}

impl core_api::ExecutionStrategy for DotnetStrategy {
    fn kind(&self) -> core_api::StrategyKind {
        core_api::StrategyKind::Dotnet
    }

    fn name(&self) -> &str {
        "dotnet"
    }

    fn plan_build(
        &self,
        target: Option<&Path>,
    ) -> Result<Option<core_api::ExecutionPlan>, core_api::PlanningError> {
        let path = Self::target_path(target);
        if self.settings.skip_build || discovery::has_extension(&path, "dll") {
            return Ok(None);
        }

        let plan = core_api::ExecutionPlan::new(
            "dotnet",
            [
                "build".to_string(),
                discovery::display(&path),
                "-c".to_string(),
                "Release".to_string(),
                "/p:QirGeneration=false".to_string(),
                "/p:CSharpGeneration=true".to_string(),
            ],
        )
        .with_title("Building C#");
        Ok(Some(plan))
    }

    fn plan_execution(
        &self,
        target: Option<&Path>,
    ) -> Result<core_api::ExecutionPlan, core_api::PlanningError> {
        let path = Self::target_path(target);
        let args = Self::executable_args(&path)?;
        Ok(core_api::ExecutionPlan::new("dotnet", args))
    }

    fn dispatch(&self) -> core_api::Dispatch {
        core_api::Dispatch::Local {
            shots: self.settings.shots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collapse_core::api::ExecutionStrategy;
    use pretty_assertions::assert_eq;

    fn strategy() -> DotnetStrategy {
        DotnetStrategy::new(core_api::SimulateConfig::default())
    }

    #[test]
    fn folder_without_build_output_uses_dotnet_run() {
        let plan = strategy().plan_execution(Some(Path::new("."))).unwrap();
        assert_eq!(plan.program, "dotnet");
        assert_eq!(plan.args_line(), "run --project . -c Release");
    }

    #[test]
    fn dll_target_runs_directly() {
        let plan = strategy().plan_execution(Some(Path::new("./foo.dll"))).unwrap();
        assert_eq!(plan.args_line(), "./foo.dll");
    }

    #[test]
    fn missing_target_defaults_to_current_directory() {
        let plan = strategy().plan_build(None).unwrap().unwrap();
        assert_eq!(plan.args[1], ".");
    }

    #[test]
    fn prefers_release_assembly_next_to_project() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Bell.csproj"), "<Project />").unwrap();
        for cfg in ["Release", "Debug"] {
            let out = dir.path().join("bin").join(cfg).join("net6.0");
            std::fs::create_dir_all(&out).unwrap();
            std::fs::write(out.join("Bell.dll"), "").unwrap();
        }

        let plan = strategy().plan_execution(Some(dir.path())).unwrap();
        assert_eq!(plan.args.len(), 1);
        assert!(plan.args[0].ends_with("Release/net6.0/Bell.dll"), "{}", plan.args[0]);
    }

    #[test]
    fn falls_back_to_debug_assembly() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Bell.csproj"), "<Project />").unwrap();
        let out = dir.path().join("bin").join("Debug").join("net6.0");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("Bell.dll"), "").unwrap();

        let plan = strategy().plan_execution(Some(dir.path())).unwrap();
        assert!(plan.args[0].ends_with("Debug/net6.0/Bell.dll"), "{}", plan.args[0]);
    }

    #[test]
    fn build_command_targets_csharp() {
        let plan = strategy().plan_build(Some(Path::new("."))).unwrap().unwrap();
        assert_eq!(plan.title.as_deref(), Some("Building C#"));
        assert_eq!(
            plan.to_string(),
            "dotnet build . -c Release /p:QirGeneration=false /p:CSharpGeneration=true"
        );
    }

    #[test]
    fn build_is_skipped_for_assemblies_and_when_requested() {
        assert!(strategy().plan_build(Some(Path::new("foo.dll"))).unwrap().is_none());

        let skipping = DotnetStrategy::new(core_api::SimulateConfig {
            skip_build: true,
            ..Default::default()
        });
        assert!(skipping.plan_build(Some(Path::new("."))).unwrap().is_none());
    }

    #[test]
    fn dispatches_locally_with_configured_shots() {
        let s = DotnetStrategy::new(core_api::SimulateConfig {
            shots: 42,
            ..Default::default()
        });
        assert_eq!(s.dispatch(), core_api::Dispatch::Local { shots: 42 });
    }
}

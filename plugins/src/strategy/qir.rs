use std::path::{Path, PathBuf};

use collapse_core::api as core_api;

use super::discovery;

const DEFAULT_RUNNER: &str = "qir-runner";

/// Runs the QIR emitted for a Q# project through a QIR runner.
///
/// With `no_orchestration` the runner is invoked once with `--shots` and its annotated output is
/// tallied as a whole; otherwise it is invoked once per shot like any other local program.
pub struct QirStrategy {
    settings: core_api::SimulateConfig,
}

impl QirStrategy {
    pub fn new(settings: core_api::SimulateConfig) -> Self {
        Self { settings }
    }

    fn runner(&self) -> String {
        match self.settings.qir_runner.as_deref().map(str::trim) {
            Some(bin) if !bin.is_empty() => discovery::display(&discovery::expand(Path::new(bin))),
            _ => DEFAULT_RUNNER.to_string(),
        }
    }

    fn locate_ir(path: &Path) -> Result<PathBuf, core_api::PlanningError> {
        if discovery::has_extension(path, "ll") {
            return Ok(path.to_path_buf());
        }

        if let Some(project) = discovery::project_name(path)? {
            let ir = path.join("qir").join(format!("{project}.ll"));
            if ir.is_file() {
                return Ok(ir);
            }
        }

        Err(core_api::PlanningError::ExecutableNotFound {
            path: discovery::display(path),
        })
    }
}

impl core_api::ExecutionStrategy for QirStrategy {
    fn kind(&self) -> core_api::StrategyKind {
        core_api::StrategyKind::Qir
    }

    fn name(&self) -> &str {
        "qir"
    }

    fn plan_build(
        &self,
        target: Option<&Path>,
    ) -> Result<Option<core_api::ExecutionPlan>, core_api::PlanningError> {
        let path = target
            .map(discovery::expand)
            .ok_or(core_api::PlanningError::NoTarget)?;
        if self.settings.skip_build || discovery::has_extension(&path, "ll") {
            return Ok(None);
        }

        let plan = core_api::ExecutionPlan::new(
            "dotnet",
            [
                "build".to_string(),
                discovery::display(&path),
                "/p:QirGeneration=true".to_string(),
                "/p:CSharpGeneration=false".to_string(),
            ],
        )
        .with_title("Building QIR");
        Ok(Some(plan))
    }

    fn plan_execution(
        &self,
        target: Option<&Path>,
    ) -> Result<core_api::ExecutionPlan, core_api::PlanningError> {
        let path = target
            .map(discovery::expand)
            .ok_or(core_api::PlanningError::NoTarget)?;
        let ir = Self::locate_ir(&path)?;

        let mut args = vec!["--file".to_string(), discovery::display(&ir)];
        if self.settings.no_orchestration {
            if self.settings.shots == 0 {
                return Err(core_api::PlanningError::InvalidShots(0));
            }
            args.push("--shots".to_string());
            args.push(self.settings.shots.to_string());
        }

        Ok(core_api::ExecutionPlan::new(self.runner(), args))
    }

    fn dispatch(&self) -> core_api::Dispatch {
        if self.settings.no_orchestration {
            core_api::Dispatch::Delegated(core_api::DelegatedFormat::Annotated)
        } else {
            core_api::Dispatch::Local {
                shots: self.settings.shots,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collapse_core::api::ExecutionStrategy;
    use pretty_assertions::assert_eq;

    fn strategy(settings: core_api::SimulateConfig) -> QirStrategy {
        QirStrategy::new(core_api::SimulateConfig { qir: true, ..settings })
    }

    #[test]
    fn unknown_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = strategy(Default::default())
            .plan_execution(Some(dir.path()))
            .unwrap_err();
        assert!(matches!(err, core_api::PlanningError::ExecutableNotFound { .. }));
    }

    #[test]
    fn missing_target_is_rejected() {
        let err = strategy(Default::default()).plan_execution(None).unwrap_err();
        assert!(matches!(err, core_api::PlanningError::NoTarget));
    }

    #[test]
    fn missing_target_is_rejected_before_building() {
        let err = strategy(Default::default()).plan_build(None).unwrap_err();
        assert!(matches!(err, core_api::PlanningError::NoTarget));
    }

    #[test]
    fn default_runner_reads_ir_file() {
        let plan = strategy(Default::default())
            .plan_execution(Some(Path::new("foo.ll")))
            .unwrap();
        assert_eq!(plan.program, "qir-runner");
        assert_eq!(plan.args_line(), "--file foo.ll");
    }

    #[test]
    fn custom_runner_and_uppercase_extension() {
        let s = strategy(core_api::SimulateConfig {
            qir_runner: Some("/opt/qir/bin/runner".into()),
            ..Default::default()
        });
        let plan = s.plan_execution(Some(Path::new("foo.LL"))).unwrap();
        assert_eq!(plan.program, "/opt/qir/bin/runner");
        assert_eq!(plan.args_line(), "--file foo.LL");
    }

    #[test]
    fn blank_runner_falls_back_to_default() {
        let s = strategy(core_api::SimulateConfig {
            qir_runner: Some("  ".into()),
            ..Default::default()
        });
        assert_eq!(s.plan_execution(Some(Path::new("a.ll"))).unwrap().program, "qir-runner");
    }

    #[test]
    fn finds_ir_generated_for_project() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Grover.csproj"), "<Project />").unwrap();
        std::fs::create_dir_all(dir.path().join("qir")).unwrap();
        std::fs::write(dir.path().join("qir").join("Grover.ll"), "; ModuleID").unwrap();

        let plan = strategy(Default::default())
            .plan_execution(Some(dir.path()))
            .unwrap();
        assert!(plan.args[1].ends_with("qir/Grover.ll"), "{}", plan.args[1]);
    }

    #[test]
    fn delegated_mode_passes_shots_to_runner() {
        let s = strategy(core_api::SimulateConfig {
            shots: 250,
            no_orchestration: true,
            ..Default::default()
        });
        let plan = s.plan_execution(Some(Path::new("foo.ll"))).unwrap();
        assert_eq!(plan.args_line(), "--file foo.ll --shots 250");
        assert_eq!(
            s.dispatch(),
            core_api::Dispatch::Delegated(core_api::DelegatedFormat::Annotated)
        );
    }

    #[test]
    fn delegated_mode_rejects_zero_shots() {
        let s = strategy(core_api::SimulateConfig {
            shots: 0,
            no_orchestration: true,
            ..Default::default()
        });
        let err = s.plan_execution(Some(Path::new("foo.ll"))).unwrap_err();
        assert!(matches!(err, core_api::PlanningError::InvalidShots(0)));
    }

    #[test]
    fn build_command_targets_qir() {
        let s = strategy(Default::default());
        let plan = s.plan_build(Some(Path::new("."))).unwrap().unwrap();
        assert_eq!(plan.title.as_deref(), Some("Building QIR"));
        assert_eq!(
            plan.to_string(),
            "dotnet build . /p:QirGeneration=true /p:CSharpGeneration=false"
        );
        assert!(s.plan_build(Some(Path::new("x.ll"))).unwrap().is_none());
    }
}

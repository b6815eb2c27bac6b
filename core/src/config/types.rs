use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub simulate: SimulateConfig,

    #[serde(default)]
    pub azure: AzureConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulate.shots == 0 {
            return Err(ConfigError::Validation("simulate.shots must be at least 1".into()));
        }
        if self.azure.shots == 0 {
            return Err(ConfigError::Validation("azure.shots must be at least 1".into()));
        }
        if self.runner.max_attempts == 0 {
            return Err(ConfigError::Validation("runner.max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

/// Local simulation through `dotnet` or a QIR runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateConfig {
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Run the program's QIR through a QIR runner instead of the .NET simulator.
    #[serde(default)]
    pub qir: bool,

    /// QIR runner binary; `qir-runner` from PATH when unset.
    #[serde(default)]
    pub qir_runner: Option<String>,

    #[serde(default)]
    pub skip_build: bool,

    /// Let the QIR runner perform all shots in one process instead of running it once per shot.
    #[serde(default)]
    pub no_orchestration: bool,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            qir: false,
            qir_runner: None,
            skip_build: false,
            no_orchestration: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AzureConfig {
    #[serde(default)]
    pub target_id: Option<String>,

    #[serde(default = "default_shots")]
    pub shots: u32,

    #[serde(default)]
    pub skip_build: bool,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            target_id: None,
            shots: default_shots(),
            skip_build: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Kill an invocation that runs longer than this. No limit when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Extra environment variables for every spawned process.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            max_attempts: default_max_attempts(),
            env: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write logs to `<directory>/collapse.log` instead of stderr.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_shots() -> u32 {
    10
}

fn default_max_attempts() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

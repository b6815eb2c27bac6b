mod cli_error;
mod config_error;
mod exec_error;
mod orchestration_error;
mod parse_error;
mod plan_error;

pub use cli_error::CliError;
pub use config_error::ConfigError;
pub use exec_error::ExecutionError;
pub use orchestration_error::OrchestrationError;
pub use parse_error::ParseError;
pub use plan_error::PlanningError;

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use collapse_core::api::SortOrder;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Order in which outcomes were first seen.
    Source,
    Label,
    /// Most frequent first.
    Count,
}

impl From<SortKey> for SortOrder {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Source => SortOrder::Source,
            SortKey::Label => SortOrder::Label,
            SortKey::Count => SortOrder::Value,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "collapse", version, about = "Run a quantum program many times and chart the outcomes")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    /// Write the results to FILE instead of stdout.
    #[arg(long, value_name = "FILE", global = true)]
    pub save: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = SortKey::Source, global = true)]
    pub sort: SortKey,

    /// Chart width in columns.
    #[arg(long, default_value_t = 60, global = true)]
    pub width: usize,

    #[arg(long, default_value_t = false, global = true)]
    pub no_color: bool,

    /// Config file to use instead of ./collapse.toml or the user config.
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Simulate locally with the .NET simulator or a QIR runner.
    Simulate(SimulateArgs),
    /// Submit to an Azure Quantum target.
    Azure(AzureArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SimulateArgs {
    /// Project folder, .dll or .ll file. Defaults to the current directory.
    pub path: Option<PathBuf>,

    #[arg(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub shots: Option<u32>,

    /// Run the generated QIR instead of the .NET simulator.
    #[arg(long, default_value_t = false)]
    pub qir: bool,

    #[arg(long, value_name = "BIN")]
    pub qir_runner: Option<String>,

    #[arg(long, default_value_t = false)]
    pub skip_build: bool,

    /// Let the QIR runner perform all shots in a single process.
    #[arg(long, default_value_t = false)]
    pub no_orchestration: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AzureArgs {
    pub path: PathBuf,

    pub target_id: String,

    #[arg(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub shots: Option<u32>,

    #[arg(long, default_value_t = false)]
    pub skip_build: bool,
}

//! Command line interface definition

use clap::Parser;
use cbt_types::ColorChoice;
use std::path::PathBuf;

/// cbt - CMake/Make build orchestrator
#[derive(Parser)]
#[command(name = "cbt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CMake/Make build orchestrator")]
#[command(long_about = None)]
pub struct Cli {
    /// Build the debug profile
    #[arg(long)]
    pub debug: bool,

    /// Build the release profile
    #[arg(long)]
    pub release: bool,

    /// Project root containing CMakeLists.txt (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub project_dir: Option<PathBuf>,

    /// Parallel jobs for make (0 = auto-detect)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Arguments shared by every invocation
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

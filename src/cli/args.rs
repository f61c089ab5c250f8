use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "avwatch", version, author = "avwatch")]
pub struct Cli {
    /// File listing target hosts, one per line (required)
    #[arg(short = 'H', long = "hosts")]
    pub hosts: PathBuf,

    /// Output directory for rendered reports (overrides config)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Maximum number of hosts probed in parallel (overrides config)
    #[arg(short = 'c', long = "concurrency")]
    pub concurrency: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Email the overview report using the configured [mail] settings
    #[arg(long = "email", action = ArgAction::SetTrue)]
    pub email: bool,

    /// Verbose human output
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Debug logs (implies verbose)
    #[arg(short = 'd', long = "debug", action = ArgAction::SetTrue)]
    pub debug: bool,
}

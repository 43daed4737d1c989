use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the `mlm` binary.
#[derive(Debug, Parser)]
#[command(name = "mlm", version, about = "Interactive manager for media file metadata collections")]
pub struct Cli {
    /// JSON files to load before the first prompt (after any configured autoload files)
    pub files: Vec<String>,

    /// Config file (TOML, YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose mode (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,
}

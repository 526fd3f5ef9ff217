use std::path::PathBuf;

use clap::Parser;

/// Browse prompt templates, fill in their variables and copy the result
#[derive(Parser, Debug)]
#[command(
    name = "plib",
    version,
    after_help = "Logs are written to: ~/.local/share/plib/logs/plib.log"
)]
pub(crate) struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Prompt catalog CSV (overrides config)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,

    /// Concept examples CSV (overrides config)
    #[arg(long)]
    pub(crate) concepts: Option<PathBuf>,

    /// Start in the concept builder
    #[arg(short, long)]
    pub(crate) builder: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

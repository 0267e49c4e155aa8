use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ros-netconf")]
#[command(about = "Translate NETCONF/OpenConfig system RPCs into RouterOS commands")]
pub struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Print the RouterOS commands for every rpc in a document.
    Translate(TranslateArgs),
    /// Print the get rpc that reads back what an edit-config writes.
    Filter(FilterArgs),
    /// Translate and run a document against a device.
    Apply(ApplyArgs),
}

#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Input document, `-` for stdin.
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct FilterArgs {
    /// Edit document, `-` for stdin.
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ApplyArgs {
    pub file: PathBuf,
    /// Settings file (defaults to ./ros-netconf.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Device API address, `host:port`.
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    /// Read back the first edit-config and fail on any mismatch.
    #[arg(long)]
    pub verify: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use confdiff_format::Format;

#[derive(Parser)]
#[command(
    name = "confdiff",
    about = "Structural diff for configuration files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read defaults from a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two configuration files, or two directories of them
    Diff(DiffArgs),
    /// Split a multi-document YAML manifest into one file per object
    Split(SplitArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    /// Format of the left file (default: from extension; ignored for directories)
    #[arg(long)]
    pub left_format: Option<Format>,
    /// Format of the right file (default: from extension; ignored for directories)
    #[arg(long)]
    pub right_format: Option<Format>,
    /// Refuse documents nested deeper than this
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Refuse documents with more nodes than this
    #[arg(long)]
    pub max_nodes: Option<usize>,
    /// Exit with status 1 when differences are found
    #[arg(long)]
    pub exit_code: bool,
}

#[derive(Args)]
pub struct SplitArgs {
    /// Path to the concatenated YAML manifest
    #[arg(short, long)]
    pub file: PathBuf,
    /// Directory to write files to (default: current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Project name prefixed to every file name
    #[arg(short, long)]
    pub name: Option<String>,
}

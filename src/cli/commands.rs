use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tildo",
    about = concat!("tildo v", env!("CARGO_PKG_VERSION"), " - a to-do list in one text file"),
    version,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// List file to open in the terminal UI (skips the filename prompt)
    pub file: Option<PathBuf>,

    /// Read settings from this file instead of ./tildo.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the tasks in a list file
    List(ListArgs),
    /// Append a task ("text" or "text~deadline")
    Add(AddArgs),
    /// Toggle a task between done and undone
    Done(OrdinalArgs),
    /// Remove a task
    Rm(OrdinalArgs),
    /// Swap two tasks
    Mv(MvArgs),
    /// Show the recovery log kept next to a list file
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// List file
    pub file: PathBuf,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// List file
    pub file: PathBuf,
    /// Task entry, optionally with a deadline after `~`
    pub entry: String,
}

#[derive(Args)]
pub struct OrdinalArgs {
    /// List file
    pub file: PathBuf,
    /// Task number as shown by `list` (1-based)
    pub n: usize,
}

#[derive(Args)]
pub struct MvArgs {
    /// List file
    pub file: PathBuf,
    /// First task number (1-based)
    pub a: usize,
    /// Second task number (1-based)
    pub b: usize,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// List file whose log to show
    pub file: PathBuf,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print the path to the recovery log and exit
    #[arg(long)]
    pub path: bool,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

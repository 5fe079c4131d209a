use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "decen",
    version = env!("CARGO_PKG_VERSION"),
    about,
    long_about = None,
    propagate_version = true,
    subcommand_negates_reqs = true,
    args_conflicts_with_subcommands = true
)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    #[command(flatten)]
    pub mirror: MirrorArg,

    /// More log output; repeat for more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the digest an input resolves to
    #[command(alias = "d", name = "digest")]
    Digest(DigestArg),
}

#[derive(Clone, Debug, Args)]
pub struct DigestArg {
    /// Identifier text or an existing 64-character hex digest
    pub input: String,
}

#[derive(Clone, Debug, Args)]
pub struct MirrorArg {
    /// Identifier text or an existing 64-character hex digest
    #[arg(required = true)]
    pub input: Option<String>,

    /// Configuration file [default: decen.toml]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ranked server list, one URL per line
    #[arg(short, long, value_name = "FILE")]
    pub servers: Option<PathBuf>,

    /// Where rewritten documents are cached
    #[arg(long, value_name = "DIR")]
    pub cache_root: Option<PathBuf>,

    /// Where mirrored assets are stored
    #[arg(long, value_name = "DIR")]
    pub store_root: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

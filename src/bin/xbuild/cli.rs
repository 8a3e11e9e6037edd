//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;
use xbuild::ops::Invocation;
use xbuild::util::config::MANIFEST_NAME;

/// xbuild - build the C targets declared in an Xbuild.toml
#[derive(Parser)]
#[command(name = "xbuild")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Path to the manifest; the build runs in its directory
    #[arg(short = 'f', long, env = "XBUILD_MANIFEST", default_value = MANIFEST_NAME)]
    pub manifest: PathBuf,

    /// Print commands instead of running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub invocation: Invocation,
}

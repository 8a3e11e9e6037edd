//! xbuild CLI - build C targets declared in a manifest

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use xbuild::ops::dispatch;
use xbuild::util::config::Manifest;
use xbuild::{DryRunExecutor, Executor, ShellExecutor};

mod cli;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("xbuild=debug")
    } else {
        EnvFilter::new("xbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let manifest = Manifest::load(&cli.manifest)?;

    // Manifest paths are relative to the manifest's directory
    if let Some(dir) = cli.manifest.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to enter {}", dir.display()))?;
    }

    let mut registry = manifest.into_registry()?;

    let mut shell = ShellExecutor;
    let mut dry_run = DryRunExecutor;
    let exec: &mut dyn Executor = if cli.dry_run {
        &mut dry_run
    } else {
        &mut shell
    };

    dispatch::execute(&mut registry, "xbuild", &cli.invocation, exec)?;
    Ok(())
}

//! Command-line dispatch for driver programs.
//!
//! A driver defines its targets, puts them in a [`TargetRegistry`], and
//! hands its arguments to [`run`]:
//!
//! ```no_run
//! use xbuild::{BuildKind, ShellExecutor, Target, TargetRegistry};
//!
//! let mut app = Target::new("app", BuildKind::Executable);
//! app.add_sources(["main.c", "util.c"]);
//!
//! let mut registry = TargetRegistry::new();
//! registry.add(app).unwrap();
//! xbuild::ops::dispatch::run(&mut registry, std::env::args(), &mut ShellExecutor).unwrap();
//! ```

use clap::{Args, Parser};

use crate::core::registry::TargetRegistry;
use crate::ops::xbuild_build::{build, build_all, BuildMode};
use crate::ops::xbuild_clean::clean_all;
use crate::util::errors::{BuildError, BuildResult};
use crate::util::process::Executor;

/// Build verbs understood by every driver.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Print this help message
    #[arg(short, long)]
    pub help: bool,

    /// Build all targets
    #[arg(short, long)]
    pub all: bool,

    /// Clean all targets
    #[arg(short, long)]
    pub clean: bool,

    /// Build the targets that need to be built
    #[arg(short = 't', long)]
    pub auto: bool,

    /// Targets to build
    pub targets: Vec<String>,
}

/// Standalone parser for drivers that take nothing but an [`Invocation`].
#[derive(Parser, Debug)]
#[command(disable_help_flag = true)]
struct DriverCli {
    #[command(flatten)]
    invocation: Invocation,
}

/// What an [`Invocation`] asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Usage,
    BuildAll,
    Clean,
    Build { targets: Vec<String>, mode: BuildMode },
}

impl Invocation {
    /// Resolve flags to a single action: help, then all, then clean, then
    /// named targets. Nothing requested means usage.
    pub fn action(&self) -> Action {
        if self.help {
            Action::Usage
        } else if self.all {
            Action::BuildAll
        } else if self.clean {
            Action::Clean
        } else if self.targets.is_empty() {
            Action::Usage
        } else {
            let mode = if self.auto {
                BuildMode::Auto
            } else {
                BuildMode::Full
            };
            Action::Build {
                targets: self.targets.clone(),
                mode,
            }
        }
    }
}

/// Carry out an invocation against `registry`.
///
/// Usage goes to stdout. An unknown target name prints usage and fails with
/// [`BuildError::UnknownTarget`] before anything is built.
pub fn execute(
    registry: &mut TargetRegistry,
    program: &str,
    invocation: &Invocation,
    exec: &mut dyn Executor,
) -> BuildResult<()> {
    match invocation.action() {
        Action::Usage => {
            print!("{}", registry.usage(program));
            Ok(())
        }
        Action::BuildAll => {
            registry.ensure_layout()?;
            build_all(registry, exec).map(|_| ())
        }
        Action::Clean => clean_all(registry, exec).map(|_| ()),
        Action::Build { targets, mode } => {
            if let Some(unknown) = targets.iter().find(|t| !registry.contains(t)) {
                println!("Unknown target: {}", unknown);
                print!("{}", registry.usage(program));
                return Err(BuildError::UnknownTarget {
                    name: unknown.clone(),
                });
            }
            registry.ensure_layout()?;
            build(registry, &targets, mode, exec).map(|_| ())
        }
    }
}

/// Parse process arguments (program name first) and dispatch them.
pub fn run<I, T>(registry: &mut TargetRegistry, args: I, exec: &mut dyn Executor) -> BuildResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let program = args.first().cloned().unwrap_or_else(|| "xbuild".to_string());

    let cli = match DriverCli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            print!("{}", registry.usage(&program));
            return Err(BuildError::InvalidArguments {
                message: e.to_string(),
            });
        }
    };

    execute(registry, &program, &cli.invocation, exec)
}

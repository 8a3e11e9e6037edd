//! xbuild - describe native C build targets in Rust and build them.
//!
//! A [`Target`] collects sources, flags and libraries, compiles each source
//! into an object file, and links or archives the objects into an
//! executable, static library, or shared library. Incremental builds compare
//! source and object modification times and recompile only what changed.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for xbuild unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use crate::builder::Staleness;
pub use crate::core::{BuildKind, Target, TargetRegistry};
pub use util::errors::{BuildError, BuildResult};
pub use util::process::{Command, CommandQueue, DryRunExecutor, Executor, ShellExecutor};
pub use util::string_list::StringList;

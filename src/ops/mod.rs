//! High-level operations.
//!
//! This module contains the implementation of the driver verbs.

pub mod dispatch;
pub mod xbuild_build;
pub mod xbuild_clean;

pub use dispatch::{execute, run, Action, Invocation};
pub use xbuild_build::{build, build_all, build_target, Artifact, BuildMode};
pub use xbuild_clean::{clean_all, clean_target, CleanReport};

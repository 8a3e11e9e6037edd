//! Core data structures for xbuild.
//!
//! - Targets and their build kinds
//! - The registry a driver dispatches against

pub mod registry;
pub mod target;

pub use registry::TargetRegistry;
pub use target::{BuildKind, Target};

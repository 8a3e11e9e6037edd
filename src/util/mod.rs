//! Shared utilities

pub mod config;
pub mod errors;
pub mod fs;
pub mod process;
pub mod string_list;

pub use config::Manifest;
pub use errors::{BuildError, BuildResult};
pub use string_list::StringList;

//! C build pipeline.
//!
//! Compiling, linking and archiving live in [`native`]; modification-time
//! checks for incremental builds live in [`staleness`].

pub mod native;
pub mod staleness;

pub use native::ARCHIVER;
pub use staleness::Staleness;

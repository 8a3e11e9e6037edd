//! Modification-time staleness checks for incremental builds.
//!
//! A source is stale when it was modified after its object file. A missing
//! object is older than any real timestamp, so its source is always stale.

use std::path::Path;

use crate::core::target::Target;
use crate::util::errors::{BuildError, BuildResult};
use crate::util::fs::modified_time;
use crate::util::process::Executor;

/// Outcome of checking one source against its object file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// The source does not belong to the target
    NotInTarget,
    /// The object is missing or older than the source
    Stale,
    /// The object is at least as new as the source
    Fresh,
}

/// Compare `source` against its object file in `target`.
///
/// A source that cannot be stat'ed is an error rather than "up to date".
pub fn check_source(target: &Target, source: &str) -> BuildResult<Staleness> {
    if !target.sources.contains(source) {
        return Ok(Staleness::NotInTarget);
    }

    let Some(source_time) = modified_time(Path::new(source)) else {
        return Err(BuildError::MissingSource {
            path: source.into(),
        });
    };

    let object = target.object_path(source);
    let state = match modified_time(Path::new(&object)) {
        Some(object_time) if source_time <= object_time => Staleness::Fresh,
        _ => Staleness::Stale,
    };

    tracing::debug!("{} is {:?} ({})", source, state, object);
    Ok(state)
}

impl Target {
    /// Check whether `source` needs recompiling.
    pub fn staleness(&self, source: &str) -> BuildResult<Staleness> {
        check_source(self, source)
    }

    /// Recompile `source` if it is stale. Returns whether it was compiled.
    ///
    /// Sources outside the target are ignored.
    pub fn rebuild_if_stale(&mut self, source: &str, exec: &mut dyn Executor) -> BuildResult<bool> {
        match check_source(self, source)? {
            Staleness::Stale => {
                self.compile_one(source, exec)?;
                Ok(true)
            }
            Staleness::Fresh | Staleness::NotInTarget => Ok(false),
        }
    }

    /// Recompile stale sources, recording every source's object.
    ///
    /// Up-to-date objects are still recorded so a following link step sees
    /// every object in source order. Returns the number of sources compiled.
    pub fn compile_stale(&mut self, exec: &mut dyn Executor) -> BuildResult<usize> {
        self.objects.clear();
        let sources = self.sources.clone();

        let mut compiled = 0;
        for source in &sources {
            if self.rebuild_if_stale(source, exec)? {
                compiled += 1;
            } else {
                self.objects.push(self.object_path(source));
            }
        }

        tracing::info!(
            "`{}`: {} of {} source(s) recompiled",
            self.name,
            compiled,
            sources.len()
        );
        Ok(compiled)
    }

    /// Recompile stale sources, then run [`Target::build`] unconditionally.
    pub fn auto_build(&mut self, exec: &mut dyn Executor) -> BuildResult<Option<String>> {
        self.compile_stale(exec)?;
        self.build(exec)
    }
}

//! Implementation of cleaning build outputs.

use std::path::{Path, PathBuf};

use crate::core::registry::TargetRegistry;
use crate::core::target::Target;
use crate::util::errors::BuildResult;
use crate::util::process::Executor;

/// Files removed by a clean, or listed by a dry-run clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
}

/// Every file a clean of `target` should remove.
///
/// Covers objects recorded by this process and the object each source would
/// produce, so a fresh process still cleans earlier builds.
fn outputs_of(target: &Target) -> Vec<String> {
    let mut files: Vec<String> = target.objects().iter().cloned().collect();
    for source in target.sources() {
        let object = target.object_path(source);
        if !files.contains(&object) {
            files.push(object);
        }
    }
    if let Some(output) = target.output_file() {
        files.push(output.to_string());
    }
    files
}

/// Remove the objects and artifact of one target. Missing files are skipped.
///
/// Removal goes through `exec`, so a dry run only lists the files.
pub fn clean_target(
    target: &Target,
    exec: &mut dyn Executor,
    report: &mut CleanReport,
) -> BuildResult<()> {
    for file in outputs_of(target) {
        let path = Path::new(&file);
        if exec.remove_file(path)? {
            tracing::debug!("removed {}", path.display());
            report.removed.push(path.to_path_buf());
        }
    }
    Ok(())
}

/// Remove the objects and artifacts of every target.
pub fn clean_all(registry: &TargetRegistry, exec: &mut dyn Executor) -> BuildResult<CleanReport> {
    let mut report = CleanReport::default();
    for target in registry {
        clean_target(target, exec, &mut report)?;
    }
    tracing::info!("Removed {} file(s)", report.removed.len());
    Ok(report)
}

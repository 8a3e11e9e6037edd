//! Implementation of building one, several, or all targets.

use std::time::Instant;

use crate::core::registry::TargetRegistry;
use crate::core::target::Target;
use crate::util::errors::{BuildError, BuildResult};
use crate::util::process::Executor;

/// How sources are brought up to date before linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Compile every source
    #[default]
    Full,
    /// Compile only sources newer than their objects
    Auto,
}

/// Result of building a single target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Target name
    pub target: String,
    /// Artifact path, when a link step ran
    pub path: Option<String>,
    /// Number of sources compiled
    pub compiled: usize,
}

/// Bring one target's objects up to date, then run its commands and link.
pub fn build_target(
    target: &mut Target,
    mode: BuildMode,
    exec: &mut dyn Executor,
) -> BuildResult<Artifact> {
    tracing::info!("Building `{}` ({})", target.name(), target.kind());
    target.ensure_layout()?;

    let (compiled, path) = match mode {
        BuildMode::Full => {
            target.compile_all(exec)?;
            (target.sources().len(), target.build(exec)?)
        }
        BuildMode::Auto => {
            let compiled = target.compile_stale(exec)?;
            (compiled, target.build(exec)?)
        }
    };

    Ok(Artifact {
        target: target.name().to_string(),
        path,
        compiled,
    })
}

/// Build the named targets in the order given.
///
/// Every name is checked before anything is built.
pub fn build(
    registry: &mut TargetRegistry,
    names: &[String],
    mode: BuildMode,
    exec: &mut dyn Executor,
) -> BuildResult<Vec<Artifact>> {
    if let Some(unknown) = names.iter().find(|n| !registry.contains(n)) {
        return Err(BuildError::UnknownTarget {
            name: unknown.clone(),
        });
    }

    let start = Instant::now();
    let mut artifacts = Vec::with_capacity(names.len());
    for name in names {
        let target = registry.require_mut(name)?;
        artifacts.push(build_target(target, mode, exec)?);
    }

    tracing::info!(
        "Finished {} target(s) in {:.2}s",
        artifacts.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(artifacts)
}

/// Fully build every target in registration order.
pub fn build_all(
    registry: &mut TargetRegistry,
    exec: &mut dyn Executor,
) -> BuildResult<Vec<Artifact>> {
    let names: Vec<String> = registry.names().into_iter().map(String::from).collect();
    build(registry, &names, BuildMode::Full, exec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::BuildKind;
    use crate::test_support::MockExecutor;
    use crate::util::process::Command;
    use tempfile::TempDir;

    fn registry_in(tmp: &TempDir) -> TargetRegistry {
        let dir = tmp.path().join("dist").to_string_lossy().into_owned();

        let mut lib = Target::with_output_dir("util", BuildKind::StaticLibrary, dir.clone());
        lib.add_source("util.c");

        let mut app = Target::with_output_dir("app", BuildKind::Executable, dir.clone());
        app.add_sources(["main.c", "cli.c"]);
        app.link_against(&lib).unwrap();

        let mut docs = Target::with_output_dir("docs", BuildKind::Custom, dir);
        docs.add_command(Command::from_tokens(["echo", "docs"]));

        let mut registry = TargetRegistry::new();
        registry.add(lib).unwrap();
        registry.add(app).unwrap();
        registry.add(docs).unwrap();
        registry
    }

    #[test]
    fn test_build_all_in_registration_order() {
        let tmp = TempDir::new().unwrap();
        let mut registry = registry_in(&tmp);
        let mut exec = MockExecutor::new();

        let artifacts = build_all(&mut registry, &mut exec).unwrap();
        let names: Vec<_> = artifacts.iter().map(|a| a.target.as_str()).collect();
        assert_eq!(names, ["util", "app", "docs"]);

        assert!(exec.calls()[1].starts_with("ar rcs "));
        assert!(exec.calls()[4].starts_with("cc -o "));
        assert!(exec.calls()[4].ends_with(&format!(
            "-lutil -L{}/util",
            tmp.path().join("dist").display()
        )));
        assert_eq!(exec.calls()[5], "echo docs");
        assert_eq!(exec.calls().len(), 6);

        assert_eq!(artifacts[1].compiled, 2);
        assert!(artifacts[1].path.as_deref().unwrap().ends_with("/app/app"));
        assert_eq!(artifacts[2].path, None);
    }

    #[test]
    fn test_build_rejects_unknown_before_building() {
        let tmp = TempDir::new().unwrap();
        let mut registry = registry_in(&tmp);
        let mut exec = MockExecutor::new();

        let names = vec!["util".to_string(), "nope".to_string()];
        let err = build(&mut registry, &names, BuildMode::Full, &mut exec).unwrap_err();
        assert!(matches!(err, BuildError::UnknownTarget { ref name } if name == "nope"));
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn test_auto_build_mode_compiles_missing_objects() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("util.c");
        std::fs::write(&source, "int util(void) { return 1; }").unwrap();

        let dir = tmp.path().join("dist").to_string_lossy().into_owned();
        let mut lib = Target::with_output_dir("util", BuildKind::StaticLibrary, dir);
        lib.add_source(source.to_string_lossy());
        let mut exec = MockExecutor::new();

        let artifact = build_target(&mut lib, BuildMode::Auto, &mut exec).unwrap();
        assert_eq!(artifact.compiled, 1);
        assert!(artifact.path.unwrap().ends_with("/util/libutil.a"));
    }
}

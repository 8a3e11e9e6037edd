//! Target definitions - what gets built.
//!
//! A Target is one buildable unit: an executable, a static library, a shared
//! library, or a custom target that only runs its own commands.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::errors::{BuildError, BuildResult};
use crate::util::fs::{ensure_dir, glob_files};
use crate::util::process::{Command, CommandQueue};
use crate::util::string_list::StringList;

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Compiler used when none is configured.
pub const DEFAULT_COMPILER: &str = "cc";

/// The kind of artifact a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildKind {
    /// Executable binary
    #[serde(alias = "exe", alias = "bin")]
    Executable,

    /// Static archive (`lib<name>.a`)
    #[serde(alias = "static", alias = "staticlib")]
    StaticLibrary,

    /// Shared object (`lib<name>.so`)
    #[serde(alias = "shared", alias = "sharedlib", alias = "dylib")]
    SharedLibrary,

    /// No artifact and no link step; only the target's own commands run
    #[serde(alias = "other")]
    Custom,
}

impl BuildKind {
    /// Artifact file name for a target called `name`, if this kind has one.
    pub fn output_filename(&self, name: &str) -> Option<String> {
        match self {
            BuildKind::Executable => Some(name.to_string()),
            BuildKind::StaticLibrary => Some(format!("lib{}.a", name)),
            BuildKind::SharedLibrary => Some(format!("lib{}.so", name)),
            BuildKind::Custom => None,
        }
    }

    /// Whether other targets may link against this one.
    pub fn is_linkable(&self) -> bool {
        !matches!(self, BuildKind::Executable)
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildKind::Executable => "executable",
            BuildKind::StaticLibrary => "static library",
            BuildKind::SharedLibrary => "shared library",
            BuildKind::Custom => "custom",
        };
        f.write_str(s)
    }
}

/// A build target with its configuration and build state.
#[derive(Debug, Clone)]
pub struct Target {
    pub(crate) name: String,
    pub(crate) kind: BuildKind,
    pub(crate) compiler: String,
    pub(crate) output_dir: String,
    pub(crate) output_file: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) flags: StringList,
    pub(crate) libs: StringList,
    pub(crate) sources: StringList,
    pub(crate) objects: StringList,
    pub(crate) extra_commands: CommandQueue,
}

impl Target {
    /// Create a target writing into [`DEFAULT_OUTPUT_DIR`].
    ///
    /// Construction touches nothing on disk; see [`Target::ensure_layout`].
    pub fn new(name: impl Into<String>, kind: BuildKind) -> Self {
        Self::with_output_dir(name, kind, DEFAULT_OUTPUT_DIR)
    }

    /// Create a target writing into `output_dir`.
    pub fn with_output_dir(
        name: impl Into<String>,
        kind: BuildKind,
        output_dir: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let output_dir = output_dir.into();
        let output_file = kind
            .output_filename(&name)
            .map(|file| format!("{}/{}/{}", output_dir, name, file));

        Target {
            name,
            kind,
            compiler: DEFAULT_COMPILER.to_string(),
            output_dir,
            output_file,
            description: None,
            flags: StringList::new(),
            libs: StringList::new(),
            sources: StringList::new(),
            objects: StringList::new(),
            extra_commands: CommandQueue::new(),
        }
    }

    /// Create `<output_dir>` and `<output_dir>/<name>` if absent.
    pub fn ensure_layout(&self) -> BuildResult<()> {
        ensure_dir(Path::new(&self.output_dir))?;
        ensure_dir(&self.target_dir())
    }

    /// Directory holding this target's objects and artifact.
    pub fn target_dir(&self) -> std::path::PathBuf {
        Path::new(&self.output_dir).join(&self.name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BuildKind {
        self.kind
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    /// Final artifact path; `None` for custom targets without an override.
    pub fn output_file(&self) -> Option<&str> {
        self.output_file.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn flags(&self) -> &StringList {
        &self.flags
    }

    pub fn libs(&self) -> &StringList {
        &self.libs
    }

    pub fn sources(&self) -> &StringList {
        &self.sources
    }

    /// Object files produced so far, in compile order.
    pub fn objects(&self) -> &StringList {
        &self.objects
    }

    pub fn commands(&self) -> &CommandQueue {
        &self.extra_commands
    }

    pub fn set_output_file(&mut self, output_file: impl Into<String>) {
        self.output_file = Some(output_file.into());
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn set_compiler(&mut self, compiler: impl Into<String>) {
        self.compiler = compiler.into();
    }

    pub fn add_flag(&mut self, flag: impl Into<String>) {
        self.flags.push(flag);
    }

    pub fn add_lib(&mut self, lib: impl Into<String>) {
        self.libs.push(lib);
    }

    pub fn add_source(&mut self, source: impl Into<String>) {
        self.sources.push(source);
    }

    pub fn add_sources<I, S>(&mut self, sources: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.extend(sources);
    }

    /// Remove the first occurrence of `source`. Returns whether it was present.
    pub fn remove_source(&mut self, source: &str) -> bool {
        match self.sources.find(source) {
            Some(index) => self.sources.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Add every file matching a shell glob pattern as a source.
    ///
    /// Returns the number of sources added.
    pub fn add_sources_from_pattern(&mut self, pattern: &str) -> BuildResult<usize> {
        let matched = glob_files(pattern)?;
        if matched.is_empty() {
            tracing::warn!("pattern `{}` matched no files for `{}`", pattern, self.name);
        }
        let count = matched.len();
        self.sources
            .extend(matched.iter().map(|p| p.to_string_lossy().into_owned()));
        Ok(count)
    }

    /// Queue a command to run before the link step of every build.
    pub fn add_command(&mut self, cmd: Command) {
        self.extra_commands.push(cmd);
    }

    /// Link this target against another target's library.
    ///
    /// Only amends `libs` with `-l<name>` and `-L<dir>/<name>`. Nothing checks
    /// that `other` has been built; ordering builds is up to the caller.
    pub fn link_against(&mut self, other: &Target) -> BuildResult<()> {
        if !other.kind.is_linkable() {
            tracing::warn!(
                "cannot link `{}` against `{}`: executables are not linkable",
                self.name,
                other.name
            );
            return Err(BuildError::InvalidLink {
                target: self.name.clone(),
                dependency: other.name.clone(),
            });
        }

        self.libs.push(format!("-l{}", other.name));
        self.libs
            .push(format!("-L{}/{}", other.output_dir, other.name));
        Ok(())
    }
}

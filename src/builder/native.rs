//! Native compiler driver.
//!
//! Compiles a target's sources into object files and links or archives them
//! into the target's artifact. The argument vectors built here are what the
//! toolchain sees, token for token:
//!
//! - compile: `<cc> -c <source> -o <object> <flags...>`
//! - executable: `<cc> -o <output> <objects...> <libs...>`
//! - static library: `ar rcs <output> <objects...> <libs...>`
//! - shared library: `<cc> -shared -o <output> <objects...> <libs...>`

use std::path::Path;

use crate::core::target::{BuildKind, Target};
use crate::util::errors::BuildResult;
use crate::util::fs::ensure_parent_dirs;
use crate::util::process::{Command, Executor};

/// Archiver used for static libraries.
pub const ARCHIVER: &str = "ar";

impl Target {
    /// Object file path for `source`: `<output_dir>/<name>/<source>.o`.
    pub fn object_path(&self, source: &str) -> String {
        format!("{}/{}/{}.o", self.output_dir, self.name, source)
    }

    /// Command compiling `source` into `object`.
    pub fn compile_command(&self, source: &str, object: &str) -> Command {
        let mut cmd = Command::from_tokens([self.compiler.as_str(), "-c", source, "-o", object]);
        cmd.append_all(&self.flags);
        cmd
    }

    /// Command producing the artifact, or `None` when there is nothing to do.
    ///
    /// Executables and static libraries are skipped without objects; shared
    /// libraries always link. Custom targets never link.
    pub fn link_command(&self) -> Option<Command> {
        let output = self.output_file.as_deref()?;

        let mut cmd = match self.kind {
            BuildKind::Executable if !self.objects.is_empty() => {
                Command::from_tokens([self.compiler.as_str(), "-o", output])
            }
            BuildKind::StaticLibrary if !self.objects.is_empty() => {
                Command::from_tokens([ARCHIVER, "rcs", output])
            }
            BuildKind::SharedLibrary => {
                Command::from_tokens([self.compiler.as_str(), "-shared", "-o", output])
            }
            BuildKind::Executable | BuildKind::StaticLibrary | BuildKind::Custom => return None,
        };
        cmd.append_all(&self.objects);
        cmd.append_all(&self.libs);
        Some(cmd)
    }

    /// Compile one source and record its object.
    ///
    /// Every directory implied by the object path is created first, so a
    /// source at `src/net/io.c` lands at `<dir>/<name>/src/net/io.c.o`.
    pub fn compile_one(&mut self, source: &str, exec: &mut dyn Executor) -> BuildResult<String> {
        let object = self.object_path(source);
        ensure_parent_dirs(Path::new(&object))?;

        let cmd = self.compile_command(source, &object);
        exec.run(&cmd)?;

        self.objects.push(object.clone());
        Ok(object)
    }

    /// Compile every source in order.
    ///
    /// Starts from an empty object list, so repeated passes do not
    /// accumulate duplicate objects.
    pub fn compile_all(&mut self, exec: &mut dyn Executor) -> BuildResult<()> {
        self.objects.clear();
        let sources = self.sources.clone();
        tracing::debug!("compiling {} source(s) for `{}`", sources.len(), self.name);
        for source in &sources {
            self.compile_one(source, exec)?;
        }
        Ok(())
    }

    /// Link or archive the recorded objects into the artifact.
    ///
    /// Returns the artifact path when a link step ran.
    pub fn build_output(&self, exec: &mut dyn Executor) -> BuildResult<Option<String>> {
        let Some(cmd) = self.link_command() else {
            tracing::debug!("no link step for `{}`", self.name);
            return Ok(None);
        };

        self.ensure_layout()?;
        exec.run(&cmd)?;
        Ok(self.output_file.clone())
    }

    /// Run the target's own commands, then the link step.
    ///
    /// Does not compile; pair with [`Target::compile_all`] or
    /// [`Target::auto_build`].
    pub fn build(&self, exec: &mut dyn Executor) -> BuildResult<Option<String>> {
        self.extra_commands.run_all(exec)?;
        self.build_output(exec)
    }
}

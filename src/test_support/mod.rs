//! Test utilities and mocks for xbuild unit tests.
//!
//! Provides a recording [`MockExecutor`] so pipeline tests can assert the
//! exact command lines a target issues without a real toolchain.
//!
//! # Example
//!
//! ```rust,ignore
//! use xbuild::test_support::MockExecutor;
//!
//! #[test]
//! fn test_example() {
//!     let mut exec = MockExecutor::new().touch_outputs();
//!     target.compile_all(&mut exec).unwrap();
//!     assert_eq!(exec.calls()[0], "cc -c a.c -o dist/app/a.c.o");
//! }
//! ```

pub mod fixtures;

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::util::errors::{BuildError, BuildResult};
use crate::util::process::{Command, Executor};

pub use fixtures::*;

/// Pattern for matching rendered commands in [`MockExecutor`].
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

/// Executor that records commands instead of running them.
///
/// Commands matching a failure pattern fail with exit code 1. With
/// [`MockExecutor::touch_outputs`], the file a command would produce
/// (the token after `-o`, or the archive of `ar rcs`) is created so
/// later steps can see it on disk.
#[derive(Debug, Default)]
pub struct MockExecutor {
    calls: Vec<String>,
    failures: Vec<CommandPattern>,
    touch: bool,
}

impl MockExecutor {
    /// Create a new mock executor where every command succeeds.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Fail any command containing `substring`.
    pub fn fail_on(mut self, substring: &str) -> Self {
        self.failures
            .push(CommandPattern::Contains(substring.to_string()));
        self
    }

    /// Fail commands matching `pattern`.
    pub fn fail_matching(mut self, pattern: CommandPattern) -> Self {
        self.failures.push(pattern);
        self
    }

    /// Create the output file of each successful command.
    pub fn touch_outputs(mut self) -> Self {
        self.touch = true;
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Clear all recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn produced_file(cmd: &Command) -> Option<&str> {
        let tokens = cmd.tokens().as_slice();
        if tokens.first().map(String::as_str) == Some("ar") {
            return tokens.get(2).map(String::as_str);
        }
        let pos = tokens.iter().position(|t| t == "-o")?;
        tokens.get(pos + 1).map(String::as_str)
    }
}

impl Executor for MockExecutor {
    fn run(&mut self, cmd: &Command) -> BuildResult<()> {
        if cmd.is_empty() {
            return Err(BuildError::EmptyCommand);
        }
        let line = cmd.render();
        self.calls.push(line.clone());

        if self.failures.iter().any(|p| p.matches(&line)) {
            return Err(BuildError::CommandFailed {
                command: line,
                code: Some(1),
            });
        }

        if self.touch {
            if let Some(file) = Self::produced_file(cmd) {
                fs::write(file, b"").map_err(|e| BuildError::io(file, e))?;
            }
        }
        Ok(())
    }
}

/// Set the modification time of `path`.
pub fn set_mtime(path: &Path, time: SystemTime) {
    let file = fs::File::options()
        .write(true)
        .open(path)
        .unwrap_or_else(|e| panic!("failed to open {}: {}", path.display(), e));
    file.set_modified(time)
        .unwrap_or_else(|e| panic!("failed to set mtime on {}: {}", path.display(), e));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_records_calls_in_order() {
        let mut exec = MockExecutor::new();
        exec.run(&Command::from_tokens(["a"])).unwrap();
        exec.run(&Command::from_tokens(["b", "c"])).unwrap();
        assert_eq!(exec.calls(), ["a", "b c"]);

        exec.clear_calls();
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn test_failure_patterns() {
        let mut exec = MockExecutor::new()
            .fail_on("bad.c")
            .fail_matching(CommandPattern::StartsWith("ar ".to_string()));

        assert!(exec.run(&Command::from_tokens(["cc", "-c", "ok.c"])).is_ok());
        assert!(exec.run(&Command::from_tokens(["cc", "-c", "bad.c"])).is_err());
        assert!(exec.run(&Command::from_tokens(["ar", "rcs", "x.a"])).is_err());
        assert!(CommandPattern::Exact("ar".to_string()).matches("ar"));
    }

    #[test]
    fn test_touch_outputs() {
        let tmp = TempDir::new().unwrap();
        let obj = tmp.path().join("a.o").to_string_lossy().into_owned();
        let lib = tmp.path().join("liba.a").to_string_lossy().into_owned();
        let mut exec = MockExecutor::new().touch_outputs();

        exec.run(&Command::from_tokens(["cc", "-c", "a.c", "-o", obj.as_str()]))
            .unwrap();
        exec.run(&Command::from_tokens(["ar", "rcs", lib.as_str(), obj.as_str()]))
            .unwrap();
        assert!(Path::new(&obj).is_file());
        assert!(Path::new(&lib).is_file());
    }
}

//! External process invocation.
//!
//! A [`Command`] is an ordered list of tokens rendered into one shell line.
//! Build steps never spawn processes directly; they hand commands to an
//! [`Executor`] so the same pipeline can run for real, as a dry run, or
//! against a recording mock in tests.

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command as ProcessCommand, ExitStatus, Stdio};

use crate::util::errors::{BuildError, BuildResult};
use crate::util::fs::remove_file_if_exists;
use crate::util::string_list::StringList;

/// Shell used to run rendered command lines.
const SHELL: &str = "sh";

/// One external process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    tokens: StringList,
}

impl Command {
    /// Create an empty command.
    pub fn new() -> Self {
        Command {
            tokens: StringList::new(),
        }
    }

    /// Create a command from a sequence of tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Append a single token.
    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.tokens.push(token);
        self
    }

    /// Append several tokens in order.
    pub fn args<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens);
        self
    }

    /// Append a single token in place.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token);
    }

    /// Append every item of `list` in place.
    pub fn append_all(&mut self, list: &StringList) {
        self.tokens.extend(list.iter().cloned());
    }

    pub fn tokens(&self) -> &StringList {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Render the command as a single shell line.
    pub fn render(&self) -> String {
        self.tokens.to_string()
    }

    fn shell_command(&self) -> BuildResult<(String, ProcessCommand)> {
        if self.is_empty() {
            return Err(BuildError::EmptyCommand);
        }
        let line = self.render();
        let mut cmd = ProcessCommand::new(SHELL);
        cmd.arg("-c").arg(&line);
        Ok((line, cmd))
    }

    /// Run the command through the shell and wait for it.
    ///
    /// Standard streams are inherited. The exit status is returned as-is;
    /// use [`Command::execute_checked`] to turn failure into an error.
    pub fn execute(&self) -> BuildResult<ExitStatus> {
        let (line, mut cmd) = self.shell_command()?;
        cmd.status()
            .map_err(|source| BuildError::Spawn { command: line, source })
    }

    /// Run the command and require a successful exit.
    pub fn execute_checked(&self) -> BuildResult<()> {
        let status = self.execute()?;
        if !status.success() {
            return Err(BuildError::CommandFailed {
                command: self.render(),
                code: status.code(),
            });
        }
        Ok(())
    }

    /// Spawn the command with its standard output piped back to the caller.
    pub fn open_stream(&self) -> BuildResult<CommandStream> {
        let (line, mut cmd) = self.shell_command()?;
        let mut child = cmd
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| BuildError::Spawn {
                command: line.clone(),
                source,
            })?;
        let stdout = child.stdout.take().ok_or_else(|| BuildError::Spawn {
            command: line.clone(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "stdout was not captured"),
        })?;
        Ok(CommandStream {
            command: line,
            child,
            reader: BufReader::new(stdout),
        })
    }
}

/// Readable standard output of a spawned command.
#[derive(Debug)]
pub struct CommandStream {
    command: String,
    child: Child,
    reader: BufReader<ChildStdout>,
}

impl CommandStream {
    /// The rendered line this stream was opened from.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Wait for the process to exit, discarding any unread output.
    ///
    /// The pipe is drained before waiting so a child still writing is not
    /// killed by SIGPIPE.
    pub fn wait(mut self) -> BuildResult<ExitStatus> {
        let drained = io::copy(&mut self.reader, &mut io::sink());
        drop(self.reader);
        let status = self.child.wait().map_err(|source| BuildError::Spawn {
            command: self.command.clone(),
            source,
        })?;
        drained.map_err(|source| BuildError::Spawn {
            command: self.command,
            source,
        })?;
        Ok(status)
    }
}

impl Read for CommandStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for CommandStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

/// Commands executed strictly in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        CommandQueue {
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Run every command in order, stopping at the first failure.
    pub fn run_all(&self, exec: &mut dyn Executor) -> BuildResult<()> {
        for cmd in &self.commands {
            exec.run(cmd)?;
        }
        Ok(())
    }
}

/// Runs commands on behalf of the build pipeline.
pub trait Executor {
    /// Run one command to completion. A non-zero exit is an error.
    fn run(&mut self, cmd: &Command) -> BuildResult<()>;

    /// Remove a build output. Returns whether a file was removed.
    fn remove_file(&mut self, path: &Path) -> BuildResult<bool> {
        remove_file_if_exists(path)
    }
}

/// Executes commands through the system shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl Executor for ShellExecutor {
    fn run(&mut self, cmd: &Command) -> BuildResult<()> {
        tracing::info!("{}", cmd.render());
        cmd.execute_checked()
    }
}

/// Prints commands to stdout instead of running them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunExecutor;

impl Executor for DryRunExecutor {
    fn run(&mut self, cmd: &Command) -> BuildResult<()> {
        if cmd.is_empty() {
            return Err(BuildError::EmptyCommand);
        }
        println!("{}", cmd.render());
        Ok(())
    }

    /// Print the removal and leave the file in place.
    fn remove_file(&mut self, path: &Path) -> BuildResult<bool> {
        if !path.is_file() {
            return Ok(false);
        }
        println!("rm -f {}", path.display());
        Ok(true)
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Accept a `$CC` value when its program is on PATH.
///
/// Only the first word is resolved, so wrappers such as `ccache gcc` work.
/// The value is returned as given so it renders the way the user wrote it.
fn compiler_from_env(cc: &str) -> Option<String> {
    let cc = cc.trim();
    let program = cc.split_whitespace().next()?;
    find_executable(program).map(|_| cc.to_string())
}

/// Find a C compiler, preferring `$CC`.
pub fn find_c_compiler() -> Option<String> {
    if let Some(cc) = std::env::var("CC").ok().as_deref().and_then(compiler_from_env) {
        return Some(cc);
    }

    ["cc", "gcc", "clang"]
        .iter()
        .find(|compiler| find_executable(compiler).is_some())
        .map(|compiler| compiler.to_string())
}

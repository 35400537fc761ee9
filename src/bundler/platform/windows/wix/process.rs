//! External process execution for the WiX toolchain.
//!
//! All process spawning and PATH lookups go through [`ProcessRunner`] so the
//! driver can run against a fake toolchain in tests.

use crate::bundler::error::{Error, Result};
use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// A single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Working directory for the child process
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    /// Creates an invocation of `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Command line for log messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Everything written to stdout
    pub stdout: String,
    /// Everything written to stderr
    pub stderr: String,
}

impl ProcessOutput {
    /// Returns true when the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code, -1 when the process was terminated by a signal.
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(-1)
    }
}

/// Capability to locate and run external commands.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Resolve `program` on the system PATH.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run the invocation to completion, capturing stdout and stderr.
    ///
    /// A non-zero exit is not an error at this level; only failing to
    /// spawn or wait for the child is.
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// [`ProcessRunner`] backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        match which::which(program) {
            Ok(path) => {
                log::debug!("Found {} at: {}", program, path.display());
                Some(path)
            }
            Err(e) => {
                log::debug!("{} not found in PATH: {}", program, e);
                None
            }
        }
    }

    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        log::debug!("Running: {}", invocation.display());

        let mut command = tokio::process::Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|error| Error::CommandFailed {
            command: invocation.program.clone(),
            error,
        })?;

        let label = Path::new(&invocation.program)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| invocation.program.clone());

        // Drain both pipes while waiting so a chatty child never blocks on a full pipe
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout, stderr, status) = tokio::join!(
            drain(stdout, &label, "stdout"),
            drain(stderr, &label, "stderr"),
            child.wait()
        );

        let status = status.map_err(|error| Error::CommandFailed {
            command: invocation.program.clone(),
            error,
        })?;

        Ok(ProcessOutput {
            code: status.code(),
            stdout: stdout?,
            stderr: stderr?,
        })
    }
}

/// Reads a pipe to the end, logging each line as it arrives.
async fn drain<R>(reader: Option<R>, label: &str, stream: &str) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(String::new());
    };

    let mut reader = BufReader::new(reader);
    let mut captured = String::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line).await?;
        if n == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        log::debug!("[{label} {stream}] {}", text.trim_end());
        captured.push_str(&text);
    }

    Ok(captured)
}

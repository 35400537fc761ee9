//! Error types for bundler operations.
//!
//! Provides error handling with contextual error chaining,
//! filesystem-specific errors, and the toolchain failure variants
//! surfaced by MSI compilation.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages
//!
//! # Stable messages
//!
//! Callers pattern-match on the rendered messages of the toolchain variants,
//! so their shapes are fixed:
//!
//! | Variant | Message |
//! |---------|---------|
//! | [`Error::Precondition`] | the precondition text, e.g. `wxs file not found. Did you run create() yet?` |
//! | [`Error::ToolchainMissing`] | `Could not find light.exe or candle.exe` |
//! | [`Error::Compilation`] | `Could not create wixobj file. Code: 1 StdErr: ... StdOut: ...` |

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "reading application directory")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// File system error without an underlying I/O error.
    ///
    /// Used for structural problems: a root that is not a directory,
    /// a symbolic link cycle, a missing executable.
    #[error("{0}")]
    FileSystem(String),

    /// The WiX toolchain (candle and light) could not be found or probed.
    #[error("Could not find {linker}.exe or {compiler}.exe")]
    ToolchainMissing {
        /// First-stage compiler name (candle)
        compiler: String,
        /// Second-stage linker name (light)
        linker: String,
    },

    /// An operation was invoked out of order or with invalid configuration.
    #[error("{0}")]
    Precondition(String),

    /// A toolchain stage exited with a non-zero code.
    #[error("Could not create {artifact} file. Code: {code} StdErr: {stderr} StdOut: {stdout}")]
    Compilation {
        /// Artifact the stage was producing ("wixobj" or "msi")
        artifact: String,
        /// Process exit code (-1 when terminated by a signal)
        code: i32,
        /// Captured standard error
        stderr: String,
        /// Captured standard output
        stdout: String,
    },

    /// Child process execution error.
    ///
    /// Used when an external command cannot be spawned at all.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking the application directory.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Handlebars template rendering error.
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Handlebars template parsing error.
    #[error("{0}")]
    Template(#[from] handlebars::TemplateError),

    /// Regular expression error (toolchain version parsing).
    #[error("{0}")]
    RegexError(#[from] regex::Error),

    /// Unsupported CPU architecture.
    #[error("unsupported architecture: {0}")]
    ArchError(String),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Returns true for errors that describe a file-system problem.
    pub fn is_file_system(&self) -> bool {
        match self {
            Error::Fs { .. } | Error::FileSystem(_) | Error::WalkdirError(_) => true,
            Error::Context(_, inner) => inner.is_file_system(),
            _ => false,
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with bundler's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
///
/// ```no_run
/// # use kodegen_bundler_msi::bundler::{ErrorExt, Result};
/// # use std::path::Path;
/// fn create_output_dir(path: &Path) -> Result<()> {
///     std::fs::create_dir_all(path).fs_context("creating output directory", path)?;
///     Ok(())
/// }
/// ```
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "writing wxs file".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compilation_message_embeds_code_and_streams() {
        let err = Error::Compilation {
            artifact: "wixobj".into(),
            code: 1,
            stderr: "A bit of error".into(),
            stdout: "A bit of data".into(),
        };
        assert_eq!(
            err.to_string(),
            "Could not create wixobj file. Code: 1 StdErr: A bit of error StdOut: A bit of data"
        );
    }

    #[test]
    fn toolchain_missing_names_both_executables() {
        let err = Error::ToolchainMissing {
            compiler: "candle".into(),
            linker: "light".into(),
        };
        assert_eq!(err.to_string(), "Could not find light.exe or candle.exe");
    }

    #[test]
    fn context_preserves_file_system_kind() {
        let result: Result<()> = Err(Error::FileSystem("loop".into()));
        let err = result.context("building tree").unwrap_err();
        assert!(err.is_file_system());
        assert_eq!(err.to_string(), "building tree: loop");
    }
}

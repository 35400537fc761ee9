//! Error types for the command line front end.
//!
//! Wraps bundler errors and adds CLI argument problems, with recovery
//! suggestions for the failures users can fix themselves.

use crate::bundler;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Bundler errors
    #[error("{0}")]
    Bundler(#[from] bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            BundlerError::Bundler(bundler::Error::ToolchainMissing { .. }) => vec![
                "Install the WiX Toolset v3 (https://wixtoolset.org)".to_string(),
                "Make sure its bin directory is on PATH".to_string(),
            ],
            BundlerError::Cli(CliError::MissingArgument { argument }) => vec![format!(
                "Pass --{argument} or point --manifest at a Cargo.toml that provides it"
            )],
            _ => Vec::new(),
        }
    }
}

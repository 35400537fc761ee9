//! WiX MSI bundler library for application directories
//!
//! This library turns a directory holding an executable and its supporting
//! files into:
//! - a WiX v3 source document (`.wxs`)
//! - an `.msi` installer built with the WiX toolset (`candle` + `light`)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};

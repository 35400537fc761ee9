//! WiX toolset detection.
//!
//! Locates `candle` and `light` on the system PATH and asks each for its
//! version. Nothing is cached; every call probes again.

use super::process::{Invocation, ProcessRunner};
use crate::bundler::error::{Error, Result};
use regex::Regex;
use std::path::PathBuf;

/// WiX compiler: `.wxs` -> `.wixobj`
pub const CANDLE: &str = "candle";

/// WiX linker: `.wixobj` -> `.msi`
pub const LIGHT: &str = "light";

/// Result of probing one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolProbe {
    /// Tool name as looked up on PATH
    pub name: &'static str,
    /// Resolved executable, if found
    pub path: Option<PathBuf>,
    /// Version reported by the tool, if it ran and printed one
    pub version: Option<String>,
}

impl ToolProbe {
    /// A tool is usable once it was found and reported a version.
    pub fn available(&self) -> bool {
        self.path.is_some() && self.version.is_some()
    }
}

/// Availability of both toolchain stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainStatus {
    /// Probe of the compiler
    pub candle: ToolProbe,
    /// Probe of the linker
    pub light: ToolProbe,
}

impl ToolchainStatus {
    /// True when both `candle` and `light` are usable.
    pub fn is_installed(&self) -> bool {
        self.candle.available() && self.light.available()
    }

    /// Version of the toolset, taken from `candle`.
    pub fn version(&self) -> Option<&str> {
        self.candle.version.as_deref()
    }

    /// Fails with [`Error::ToolchainMissing`] unless both tools are usable.
    pub fn ensure_installed(&self) -> Result<()> {
        if self.is_installed() {
            Ok(())
        } else {
            Err(Error::ToolchainMissing {
                compiler: CANDLE.to_string(),
                linker: LIGHT.to_string(),
            })
        }
    }
}

/// Probe both toolchain executables.
pub async fn probe_toolchain(runner: &dyn ProcessRunner) -> ToolchainStatus {
    let status = ToolchainStatus {
        candle: probe(runner, CANDLE).await,
        light: probe(runner, LIGHT).await,
    };

    if status.is_installed() {
        log::info!(
            "✓ WiX toolset available: {}",
            status.version().unwrap_or("unknown version")
        );
    } else {
        log::debug!("WiX toolset incomplete: {:?}", status);
    }

    status
}

async fn probe(runner: &dyn ProcessRunner, name: &'static str) -> ToolProbe {
    let Some(path) = runner.locate(name) else {
        log::debug!("{name} not found in PATH");
        return ToolProbe {
            name,
            path: None,
            version: None,
        };
    };

    let invocation = Invocation::new(path.to_string_lossy(), ["-?"]);
    let version = match runner.run(&invocation).await {
        // The help screen exits non-zero on some releases, so only the banner counts
        Ok(output) => match parse_version(&format!("{}\n{}", output.stdout, output.stderr)) {
            Ok(Some(version)) => Some(version),
            Ok(None) => {
                log::warn!(
                    "{} found at {} but printed no version (exit code: {})",
                    name,
                    path.display(),
                    output.exit_code()
                );
                None
            }
            Err(e) => {
                log::warn!("could not parse {name} version: {e}");
                None
            }
        },
        Err(e) => {
            log::warn!(
                "{} found at {} but failed to execute: {}. Check file permissions.",
                name,
                path.display(),
                e
            );
            None
        }
    };

    ToolProbe {
        name,
        path: Some(path),
        version,
    }
}

/// Extract `X.Y[.Z[.W]]` from a WiX banner such as
/// `Windows Installer XML Toolset Compiler version 3.11.2.4516`.
pub fn parse_version(text: &str) -> Result<Option<String>> {
    let re = Regex::new(r"(?i)version\s+(\d+(?:\.\d+)+)")?;
    Ok(re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string()))
}

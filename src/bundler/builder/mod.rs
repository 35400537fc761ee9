//! MSI creation orchestration.
//!
//! This module provides the [`MsiCreator`] orchestrator that coordinates
//! directory scanning, document rendering and the WiX toolchain.
//!
//! # Overview
//!
//! The creator:
//! 1. Reads configuration from [`Settings`](crate::bundler::Settings)
//! 2. Validates it and scans the application directory
//! 3. Writes the `.wxs` document (`create()`)
//! 4. Runs candle and light on request (`compile()`)
//! 5. Reports the installer checksum
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the installer
//! - [`orchestrator`] - Main [`MsiCreator`] struct and its operations

mod checksum;
mod orchestrator;

pub use orchestrator::{CompiledArtifacts, CompiledMsi, MsiCreator};

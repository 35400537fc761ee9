//! Configuration structures for MSI bundling operations.
//!
//! This module provides the configuration types for turning an application
//! directory into a WiX installer: package metadata, WiX-specific toggles,
//! target architecture, and a builder for constructing settings.

mod arch;
mod builder;
mod core;
mod package;
mod windows;

// Re-export all public types
pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use package::PackageSettings;
pub use windows::{InstallScope, WixSettings};

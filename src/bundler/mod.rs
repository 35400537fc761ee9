//! WiX MSI bundler for application directories.
//!
//! This module turns a directory holding an executable and its supporting
//! files into a WiX v3 source document, then drives the WiX toolset
//! (`candle` and `light`) to build an `.msi` installer from it.
//!
//! # Integration
//!
//! ```no_run
//! use kodegen_bundler_msi::bundler::{MsiCreator, PackageSettings, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_msi::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .app_directory("dist/acme")
//!     .exe("acme.exe")
//!     .output_directory("target/msi")
//!     .package_settings(PackageSettings {
//!         product_name: "Acme".into(),
//!         version: "1.0.0".into(),
//!         manufacturer: "Acme Technologies".into(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let mut creator = MsiCreator::new(settings);
//! creator.create().await?;
//! creator.compile().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! | Step | Required Tools |
//! |------|----------------|
//! | `create()` | none |
//! | `compile()` | WiX Toolset 3.x (`candle`, `light`) on PATH |

#![warn(missing_docs)]

mod builder;
pub mod error;
pub(crate) mod platform;
mod settings;

// Public re-exports
pub use builder::{CompiledArtifacts, CompiledMsi, MsiCreator};
pub use error::{Context, Error, ErrorExt, Result};
pub use platform::windows::wix;
pub use settings::{
    // Architecture detection
    Arch,
    InstallScope,
    PackageSettings,
    // Main configuration types
    Settings,
    SettingsBuilder,
    WixSettings,
};

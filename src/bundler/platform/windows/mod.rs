//! Windows bundling support for MSI installers.
//!
//! # Supported Formats
//!
//! - **MSI Installer (.msi)**: via [`wix`] module using the WiX v3 toolset
//!
//! # Build Requirements
//!
//! | Format | Required Tools | Download |
//! |--------|----------------|----------|
//! | .msi (WiX) | WiX Toolset 3.x (`candle`, `light`) | <https://wixtoolset.org> |
//!
//! # Output Location
//!
//! All artifacts land in the configured output directory:
//! - `Acme.wxs` - rendered source document
//! - `Acme.wixobj` - compiled object
//! - `Acme.msi` - linked installer

pub mod wix;

//! Platform-specific bundling implementations.
//!
//! The WiX toolset itself only runs on Windows, but document generation and
//! the driver are plain Rust, so the module builds on every host and the
//! toolchain is located at run time.

pub mod windows;

//! Windows MSI installer creation with the WiX v3 toolset.
//!
//! Scans an application directory, renders a `.wxs` source document for it
//! and drives `candle`/`light` to turn that document into an `.msi`.
//!
//! # Module Organization
//!
//! - `ids` - Stable identifier and component GUID allocation
//! - `tree` - Application directory scanning
//! - `template` - WXS document template
//! - `document` - WXS rendering from the scanned tree
//! - `process` - External process execution seam
//! - `toolset` - candle/light detection
//! - `build` - Two-stage compile state machine
//! - `utils` - Helper functions (architecture mapping, version formatting, etc.)

pub mod build;
pub mod document;
pub mod ids;
pub mod process;
mod template;
pub mod toolset;
pub mod tree;
pub mod utils;

pub use build::{CompileRequest, CompileState, WixDriver};
pub use ids::{IdAllocator, IdKind};
pub use process::{Invocation, ProcessOutput, ProcessRunner, SystemProcessRunner};
pub use toolset::{ToolProbe, ToolchainStatus};
pub use tree::{DirectoryNode, FileEntry};

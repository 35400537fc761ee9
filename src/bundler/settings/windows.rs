//! Windows platform-specific settings.

/// Installation scope of the MSI package.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InstallScope {
    /// Per-machine installation (requires admin rights).
    ///
    /// Installs to `%PROGRAMFILES%`.
    #[default]
    PerMachine,

    /// Per-user installation.
    PerUser,
}

/// WiX MSI installer configuration.
///
/// WiX creates Windows Installer (.msi) packages from a `.wxs` source.
///
/// # Configuration
///
/// The CLI maps `--ui`, `--language` and `--upgrade-code` onto these fields:
///
/// ```text
/// kodegen_bundler_msi ... --ui --language 1031 --upgrade-code 6C1F2C8D-1E1A-4B58-9E1B-0C2A4E7F9A10
/// ```
#[derive(Clone, Debug)]
pub struct WixSettings {
    /// Include the stock minimal WiX UI (`WixUI_Minimal`).
    ///
    /// Links with `-ext WixUIExtension` when enabled.
    ///
    /// Default: false (no UI, basic progress only)
    pub ui: bool,

    /// Installer language as a Windows LCID.
    ///
    /// Default: 1033 (en-US)
    pub language: u16,

    /// Upgrade code GUID.
    ///
    /// Default: None (derived deterministically from manufacturer and product name)
    pub upgrade_code: Option<String>,

    /// Start menu folder holding the application shortcut.
    ///
    /// Default: None (uses the product name)
    pub shortcut_folder: Option<String>,

    /// Installation scope.
    ///
    /// Default: [`InstallScope::PerMachine`]
    pub install_scope: InstallScope,
}

impl Default for WixSettings {
    fn default() -> Self {
        Self {
            ui: false,
            language: 1033,
            upgrade_code: None,
            shortcut_folder: None,
            install_scope: InstallScope::default(),
        }
    }
}

//! Core Settings struct and implementations.

use super::{Arch, PackageSettings, WixSettings};
use std::path::{Path, PathBuf};

/// Main settings for MSI bundling operations.
///
/// Central configuration for one creation run, constructed via [`SettingsBuilder`].
/// Immutable once built; the orchestrator only ever reads it.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_msi::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .app_directory("dist/acme")
///     .exe("acme")
///     .output_directory("target/msi")
///     .package_settings(PackageSettings {
///         product_name: "Acme".into(),
///         version: "1.0.0".into(),
///         description: "ACME is the best company ever".into(),
///         manufacturer: "Acme Technologies".into(),
///         ..Default::default()
///     })
///     .build()?;
///
/// assert!(settings.wxs_path().ends_with("Acme.wxs"));
/// # Ok(())
/// # }
/// ```
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// WiX installer toggles.
    wix: WixSettings,

    /// Root of the application tree to package.
    app_directory: PathBuf,

    /// Executable file name, always ending in `.exe`.
    exe: String,

    /// Directory receiving the `.wxs`, `.wixobj` and `.msi` files.
    output_directory: PathBuf,

    /// Target architecture.
    arch: Arch,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the version string as configured.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the package description.
    pub fn description(&self) -> &str {
        &self.package.description
    }

    /// Returns the manufacturer.
    pub fn manufacturer(&self) -> &str {
        &self.package.manufacturer
    }

    /// Returns the package homepage URL.
    pub fn homepage(&self) -> Option<&str> {
        self.package.homepage.as_deref()
    }

    /// Returns the application directory.
    pub fn app_directory(&self) -> &Path {
        &self.app_directory
    }

    /// Returns the executable file name, including the `.exe` extension.
    pub fn exe_name(&self) -> &str {
        &self.exe
    }

    /// Returns the output directory.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the target architecture.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Returns the WiX settings.
    pub fn wix(&self) -> &WixSettings {
        &self.wix
    }

    /// Start menu folder name for the shortcut.
    pub fn shortcut_folder(&self) -> &str {
        self.wix
            .shortcut_folder
            .as_deref()
            .unwrap_or(&self.package.product_name)
    }

    /// Path of the rendered WiX source document.
    pub fn wxs_path(&self) -> PathBuf {
        self.artifact_path("wxs")
    }

    /// Path of the intermediate object file produced by candle.
    pub fn wixobj_path(&self) -> PathBuf {
        self.artifact_path("wixobj")
    }

    /// Path of the final installer produced by light.
    pub fn msi_path(&self) -> PathBuf {
        self.artifact_path("msi")
    }

    fn artifact_path(&self, extension: &str) -> PathBuf {
        self.output_directory
            .join(format!("{}.{}", self.package.product_name, extension))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        wix: WixSettings,
        app_directory: PathBuf,
        exe: String,
        output_directory: PathBuf,
        arch: Arch,
    ) -> Self {
        Self {
            package,
            wix,
            app_directory,
            exe,
            output_directory,
            arch,
        }
    }
}

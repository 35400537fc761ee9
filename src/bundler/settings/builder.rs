//! Builder for constructing Settings.

use super::{Arch, PackageSettings, Settings, WixSettings};
use crate::bundler::error::{Context, ErrorExt};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Paths are made absolute at build time so the rendered document never
/// depends on the working directory of the toolchain processes.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::{Arch, PackageSettings, SettingsBuilder, WixSettings};
///
/// # fn example() -> kodegen_bundler_msi::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .app_directory("dist/acme")
///     .exe("acme.exe")
///     .output_directory("target/msi")
///     .package_settings(PackageSettings {
///         product_name: "Acme".into(),
///         version: "1.0.0".into(),
///         manufacturer: "Acme Technologies".into(),
///         ..Default::default()
///     })
///     .wix_settings(WixSettings { ui: true, ..Default::default() })
///     .arch(Arch::X86)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    app_directory: Option<PathBuf>,
    exe: Option<String>,
    output_directory: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    wix_settings: WixSettings,
    arch: Option<Arch>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the application directory to package.
    ///
    /// # Required
    pub fn app_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.app_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the executable name, with or without the `.exe` extension.
    ///
    /// # Required
    pub fn exe<S: Into<String>>(mut self, exe: S) -> Self {
        self.exe = Some(exe.into());
        self
    }

    /// Sets the output directory. Created on `create()` if absent.
    ///
    /// # Required
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package metadata.
    ///
    /// # Required
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets WiX toggles.
    ///
    /// Default: [`WixSettings::default`]
    pub fn wix_settings(mut self, settings: WixSettings) -> Self {
        self.wix_settings = settings;
        self
    }

    /// Sets the target architecture.
    ///
    /// Default: detected from the host architecture
    pub fn arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or a path cannot be
    /// made absolute. Semantic validation (version format, directory
    /// existence) happens when the orchestrator runs `create()`.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let app_directory = self.app_directory.context("app_directory is required")?;
        let output_directory = self
            .output_directory
            .context("output_directory is required")?;
        let exe = self.exe.context("exe is required")?;

        let app_directory = app_directory
            .absolutize()
            .fs_context("resolving application directory", &app_directory)?
            .into_owned();
        let output_directory = output_directory
            .absolutize()
            .fs_context("resolving output directory", &output_directory)?
            .into_owned();

        let exe = exe.trim().to_string();
        let exe = if exe.to_ascii_lowercase().ends_with(".exe") || exe.is_empty() {
            exe
        } else {
            format!("{exe}.exe")
        };

        let arch = self
            .arch
            .unwrap_or_else(|| Arch::from_target(std::env::consts::ARCH));

        Ok(Settings::new(
            self.package_settings
                .context("package_settings is required")?,
            self.wix_settings,
            app_directory,
            exe,
            output_directory,
            arch,
        ))
    }
}

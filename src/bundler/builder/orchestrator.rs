//! MSI creation orchestration.
//!
//! This module provides the [`MsiCreator`] orchestrator that turns an
//! application directory into a `.wxs` document and, on request, into an
//! `.msi` installer.

use super::checksum::calculate_sha256;
use crate::bundler::{
    Result, Settings,
    error::{Error, ErrorExt},
    platform::windows::wix::{
        CompileRequest, IdAllocator, ProcessRunner, SystemProcessRunner, ToolchainStatus,
        WixDriver, document, toolset, tree, utils,
    },
};
use std::{path::PathBuf, sync::Arc};

/// Artifacts produced so far by one [`MsiCreator`].
///
/// Fields fill in as `create()` and `compile()` succeed; nothing is ever
/// cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledArtifacts {
    /// Rendered WiX source document
    pub wxs_file: Option<PathBuf>,
    /// Object file written by candle
    pub wixobj_file: Option<PathBuf>,
    /// Installer written by light
    pub msi_file: Option<PathBuf>,
    /// SHA-256 of the installer
    pub checksum: Option<String>,
}

/// Result of a successful [`MsiCreator::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMsi {
    /// Object file written by candle
    pub wixobj_file: PathBuf,
    /// Installer written by light
    pub msi_file: PathBuf,
    /// Hex-encoded SHA-256 of the installer
    pub checksum: String,
}

/// MSI creation orchestrator.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::{MsiCreator, PackageSettings, SettingsBuilder};
///
/// # async fn example() -> kodegen_bundler_msi::bundler::Result<()> {
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
/// let mut creator = MsiCreator::new(settings);
/// let wxs = creator.create().await?;
/// println!("Wrote {}", wxs.display());
///
/// let msi = creator.compile().await?;
/// println!("Created {} ({})", msi.msi_file.display(), msi.checksum);
/// # Ok(())
/// # }
/// ```
pub struct MsiCreator {
    settings: Settings,
    runner: Arc<dyn ProcessRunner>,
    artifacts: CompiledArtifacts,
}

impl std::fmt::Debug for MsiCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MsiCreator")
            .field("settings", &self.settings)
            .field("runner", &"<ProcessRunner>")
            .field("artifacts", &self.artifacts)
            .finish()
    }
}

impl MsiCreator {
    /// Creates an orchestrator that runs the real toolchain.
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(settings, Arc::new(SystemProcessRunner))
    }

    /// Creates an orchestrator that spawns processes through `runner`.
    pub fn with_runner(settings: Settings, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            settings,
            runner,
            artifacts: CompiledArtifacts::default(),
        }
    }

    /// Returns a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the artifacts produced so far.
    pub fn artifacts(&self) -> &CompiledArtifacts {
        &self.artifacts
    }

    /// Scans the application directory and writes `<output>/<name>.wxs`.
    ///
    /// Every call rescans the directory, so the document always reflects
    /// the tree as it is now.
    ///
    /// # Errors
    ///
    /// - [`Error::Precondition`] for invalid configuration
    /// - a file-system error when the application directory is missing or
    ///   unreadable, contains a link cycle, lacks the executable, or the
    ///   document cannot be written
    pub async fn create(&mut self) -> Result<PathBuf> {
        log::info!("Creating wxs for {}", self.settings.product_name());

        self.validate()?;
        let version = utils::format_version_for_msi(self.settings.version_string())?;

        let settings = self.settings.clone();
        let (document, file_count) = tokio::task::spawn_blocking(move || -> Result<_> {
            let mut ids = IdAllocator::new(settings.manufacturer(), settings.product_name());
            // Artifacts from earlier runs must never be packaged when the
            // output directory sits inside the application directory
            let exclude = [
                settings.output_directory().to_path_buf(),
                settings.wxs_path(),
                settings.wixobj_path(),
                settings.msi_path(),
            ];
            let tree = tree::build_excluding(settings.app_directory(), &exclude, &mut ids)?;

            let file_count = tree.file_count();
            if file_count > 0 && tree.file(settings.exe_name()).is_none() {
                return Err(Error::FileSystem(format!(
                    "executable {} not found in {}",
                    settings.exe_name(),
                    settings.app_directory().display()
                )));
            }
            if file_count == 0 {
                log::warn!(
                    "{} contains no files; the installer will only carry the shortcut",
                    settings.app_directory().display()
                );
            }

            let document = document::render(&tree, &settings, &version, &mut ids)?;
            Ok((document, file_count))
        })
        .await
        .map_err(|e| Error::GenericError(format!("directory scan task failed: {e}")))??;

        let output_dir = self.settings.output_directory();
        tokio::fs::create_dir_all(output_dir)
            .await
            .fs_context("creating output directory", output_dir)?;

        let wxs_path = self.settings.wxs_path();
        tokio::fs::write(&wxs_path, document)
            .await
            .fs_context("writing wxs file", &wxs_path)?;

        log::info!(
            "✓ Wrote {} ({} files)",
            wxs_path.display(),
            file_count
        );

        self.artifacts.wxs_file = Some(wxs_path.clone());
        Ok(wxs_path)
    }

    /// Probes for `candle` and `light` without building anything.
    pub async fn probe_toolchain(&self) -> ToolchainStatus {
        toolset::probe_toolchain(self.runner.as_ref()).await
    }

    /// Compiles the document written by [`create`](Self::create) into an MSI.
    ///
    /// # Errors
    ///
    /// - [`Error::Precondition`] (`wxs file not found. Did you run create() yet?`)
    ///   when no document exists; no process is started
    /// - [`Error::ToolchainMissing`] when either tool fails its probe
    /// - [`Error::Compilation`] when a stage exits non-zero
    pub async fn compile(&mut self) -> Result<CompiledMsi> {
        let wxs = self.artifacts.wxs_file.clone().ok_or_else(|| {
            Error::Precondition("wxs file not found. Did you run create() yet?".into())
        })?;

        log::info!("Compiling {}", wxs.display());

        let request = CompileRequest {
            wxs,
            wixobj: self.settings.wixobj_path(),
            msi: self.settings.msi_path(),
            working_dir: self.settings.output_directory().to_path_buf(),
            arch: self.settings.arch(),
            ui: self.settings.wix().ui,
        };

        let mut driver = WixDriver::new(self.runner.as_ref());
        let (wixobj_file, msi_file) = driver.run(&request).await?;

        let checksum = calculate_sha256(&msi_file).await?;

        log::info!("✓ Created MSI installer: {}", msi_file.display());

        self.artifacts.wixobj_file = Some(wixobj_file.clone());
        self.artifacts.msi_file = Some(msi_file.clone());
        self.artifacts.checksum = Some(checksum.clone());

        Ok(CompiledMsi {
            wixobj_file,
            msi_file,
            checksum,
        })
    }

    fn validate(&self) -> Result<()> {
        let name = self.settings.product_name();
        if name.trim().is_empty() {
            return Err(Error::Precondition("product name must not be empty".into()));
        }
        if name.contains(['/', '\\', ':', '*', '?', '"', '<', '>', '|']) {
            return Err(Error::Precondition(format!(
                "product name '{name}' cannot be used as a file name"
            )));
        }
        if self.settings.manufacturer().trim().is_empty() {
            return Err(Error::Precondition("manufacturer must not be empty".into()));
        }
        let exe = self.settings.exe_name();
        if exe.trim().is_empty() || exe.eq_ignore_ascii_case(".exe") {
            return Err(Error::Precondition("executable name must not be empty".into()));
        }
        Ok(())
    }
}

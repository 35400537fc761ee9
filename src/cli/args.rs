//! Command line argument parsing and validation.
//!
//! Arguments left out on the command line can be filled from a Cargo.toml
//! via `--manifest`.

use crate::{
    bundler::{Arch, PackageSettings, Settings, SettingsBuilder, WixSettings},
    error::{CliError, Result},
    metadata::CargoManifest,
};
use clap::Parser;
use std::path::PathBuf;

/// WiX MSI installer bundler for application directories
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kodegen_bundler_msi",
    disable_version_flag = true,
    about = "WiX MSI installer bundler for application directories",
    long_about = "Creates a WiX source document (.wxs) for an application directory and, with --compile,
builds an .msi installer from it using the WiX Toolset v3 (candle and light on PATH).

Usage:
  kodegen_bundler_msi --app-dir dist/acme --exe acme --name Acme --manufacturer \"Acme Technologies\" --version 1.0.0 --output target/msi
  kodegen_bundler_msi --app-dir dist/acme --manifest Cargo.toml --output target/msi --compile

Exit code 0 = every requested artifact exists in the output directory."
)]
pub struct Args {
    /// Application directory to package
    #[arg(short = 'a', long, value_name = "DIR")]
    pub app_dir: PathBuf,

    /// Executable inside the application directory (".exe" is appended if missing)
    #[arg(short, long, value_name = "NAME")]
    pub exe: Option<String>,

    /// Product name
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Manufacturer (publisher) name
    #[arg(short, long, value_name = "NAME")]
    pub manufacturer: Option<String>,

    /// Product version (1-4 numeric parts, e.g. 1.0.0)
    #[arg(long = "version", value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Package description
    #[arg(short, long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Directory receiving the .wxs, .wixobj and .msi files
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: PathBuf,

    /// Target architecture: x64, x86, arm64 (defaults to the host)
    #[arg(long, value_name = "ARCH", value_parser = parse_arch)]
    pub arch: Option<Arch>,

    /// Include the stock WixUI_Minimal dialog set
    #[arg(long)]
    pub ui: bool,

    /// Product language as a Windows LCID
    #[arg(long, value_name = "LCID", default_value_t = 1033)]
    pub language: u16,

    /// Upgrade code GUID (derived from manufacturer and name when omitted)
    #[arg(long, value_name = "GUID")]
    pub upgrade_code: Option<String>,

    /// Cargo.toml supplying defaults for name, version, description, manufacturer and exe
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Run candle and light after writing the .wxs
    #[arg(short, long)]
    pub compile: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.language == 0 {
            return Err("Language must be a non-zero LCID".to_string());
        }
        if self.app_dir.as_os_str().is_empty() {
            return Err("Application directory cannot be empty".to_string());
        }
        Ok(())
    }

    /// Build [`Settings`] from the arguments, falling back to `manifest`.
    pub fn to_settings(&self, manifest: Option<&CargoManifest>) -> Result<Settings> {
        self.validate()
            .map_err(|reason| CliError::InvalidArguments { reason })?;

        let metadata = manifest.map(|m| &m.metadata);
        let missing = |argument: &str| CliError::MissingArgument {
            argument: argument.to_string(),
        };

        let name = self
            .name
            .clone()
            .or_else(|| metadata.map(|m| m.name.clone()))
            .ok_or_else(|| missing("name"))?;
        let version = self
            .app_version
            .clone()
            .or_else(|| metadata.map(|m| m.version.clone()))
            .ok_or_else(|| missing("version"))?;
        let manufacturer = self
            .manufacturer
            .clone()
            .or_else(|| metadata.and_then(|m| m.manufacturer()))
            .ok_or_else(|| missing("manufacturer"))?;
        let exe = self
            .exe
            .clone()
            .or_else(|| manifest.map(|m| m.binary_name.clone()))
            .ok_or_else(|| missing("exe"))?;
        let description = self
            .description
            .clone()
            .or_else(|| metadata.and_then(|m| m.description.clone()))
            .unwrap_or_else(|| name.clone());

        let mut builder = SettingsBuilder::new()
            .app_directory(&self.app_dir)
            .exe(exe)
            .output_directory(&self.output)
            .package_settings(PackageSettings {
                product_name: name,
                version,
                description,
                manufacturer,
                homepage: metadata.and_then(|m| m.homepage.clone()),
            })
            .wix_settings(WixSettings {
                ui: self.ui,
                language: self.language,
                upgrade_code: self.upgrade_code.clone(),
                ..Default::default()
            });
        if let Some(arch) = self.arch {
            builder = builder.arch(arch);
        }

        Ok(builder.build()?)
    }
}

fn parse_arch(value: &str) -> std::result::Result<Arch, String> {
    value.parse().map_err(|e: crate::bundler::Error| e.to_string())
}

//! Package defaults from a single Cargo.toml

use crate::error::{BundlerError, CliError, Result};
use std::path::Path;

/// Package metadata extracted from Cargo.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Package name from Cargo.toml
    pub name: String,

    /// Package description, if present
    pub description: Option<String>,

    /// Package version from Cargo.toml (e.g., "0.1.0")
    pub version: String,

    /// List of package authors from Cargo.toml
    pub authors: Vec<String>,

    /// Homepage URL if specified in Cargo.toml
    pub homepage: Option<String>,

    /// `[package.metadata.bundle] publisher`
    pub publisher: Option<String>,
}

impl PackageMetadata {
    /// Manufacturer to use when none was given: the bundle publisher, else
    /// the first author without an `<email>` suffix.
    pub fn manufacturer(&self) -> Option<String> {
        self.publisher.clone().or_else(|| {
            self.authors.first().map(|author| {
                author
                    .split('<')
                    .next()
                    .unwrap_or(author)
                    .trim()
                    .to_string()
            })
        })
    }
}

/// Complete manifest data from Cargo.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoManifest {
    /// Package metadata ([package] section)
    pub metadata: PackageMetadata,

    /// Primary binary name (from [[bin]] or package.name)
    pub binary_name: String,
}

/// Load package defaults from Cargo.toml (single read + parse)
pub fn load_manifest(cargo_toml_path: &Path) -> Result<CargoManifest> {
    let manifest = std::fs::read_to_string(cargo_toml_path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_cargo_toml".to_string(),
            reason: format!("Failed to read {}: {}", cargo_toml_path.display(), e),
        })
    })?;

    parse_manifest(&manifest)
}

fn parse_manifest(manifest: &str) -> Result<CargoManifest> {
    let toml_value: toml::Value = toml::from_str(manifest).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "parse_cargo_toml".to_string(),
            reason: format!("Failed to parse Cargo.toml: {}", e),
        })
    })?;

    let package = toml_value.get("package").ok_or_else(|| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: "No [package] section in Cargo.toml".to_string(),
        })
    })?;

    let string = |key: &str| package.get(key).and_then(|v| v.as_str()).map(String::from);

    let name = string("name").ok_or_else(|| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: "Missing 'name' in [package]".to_string(),
        })
    })?;

    // Workspace-inherited versions (`version.workspace = true`) are not strings
    let version = string("version").ok_or_else(|| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: "Missing 'version' in [package]".to_string(),
        })
    })?;

    let metadata = PackageMetadata {
        description: string("description"),
        authors: package
            .get("authors")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default(),
        homepage: string("homepage"),
        publisher: package
            .get("metadata")
            .and_then(|m| m.get("bundle"))
            .and_then(|b| b.get("publisher"))
            .and_then(|v| v.as_str())
            .map(String::from),
        name,
        version,
    };

    // Try [[bin]] section first, fall back to package name
    let binary_name = toml_value
        .get("bin")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|first| first.get("name"))
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(|| metadata.name.clone());

    Ok(CargoManifest {
        metadata,
        binary_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_package_and_bundle_publisher() {
        let manifest = parse_manifest(
            r#"
[package]
name = "acme"
version = "1.2.3"
description = "ACME is the best company ever"
authors = ["Wile E. Coyote <wile@acme.test>"]
homepage = "https://acme.test"

[package.metadata.bundle]
publisher = "Acme Technologies"

[[bin]]
name = "acme-app"
path = "src/main.rs"
"#,
        )
        .unwrap();

        assert_eq!(manifest.metadata.name, "acme");
        assert_eq!(manifest.metadata.version, "1.2.3");
        assert_eq!(manifest.metadata.manufacturer().as_deref(), Some("Acme Technologies"));
        assert_eq!(manifest.binary_name, "acme-app");
    }

    #[test]
    fn falls_back_to_first_author_and_package_name() {
        let manifest = parse_manifest(
            r#"
[package]
name = "acme"
version = "0.1.0"
authors = ["Wile E. Coyote <wile@acme.test>", "Road Runner"]
"#,
        )
        .unwrap();

        assert_eq!(manifest.metadata.manufacturer().as_deref(), Some("Wile E. Coyote"));
        assert_eq!(manifest.metadata.description, None);
        assert_eq!(manifest.binary_name, "acme");
    }

    #[test]
    fn missing_package_section_is_invalid() {
        let err = parse_manifest("[workspace]\nmembers = []\n").unwrap_err();
        assert!(err.to_string().contains("No [package] section"));
    }
}

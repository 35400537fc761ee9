//! WiX utility functions.
//!
//! Helper functions for architecture mapping, version formatting,
//! install scope mapping and XML escaping.

use crate::bundler::{
    error::{Error, Result},
    settings::{Arch, InstallScope},
};

/// Map architecture to the WiX `Platform` / candle `-arch` string.
pub fn map_arch(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x64",
        Arch::X86 => "x86",
        Arch::AArch64 => "arm64",
    }
}

/// Standard directory the application root lives under.
pub fn program_files_folder(arch: Arch) -> &'static str {
    if arch.is_64_bit() {
        "ProgramFiles64Folder"
    } else {
        "ProgramFilesFolder"
    }
}

/// Minimum Windows Installer version for the target.
///
/// ARM64 packages need Windows Installer 5.0.
pub fn installer_version(arch: Arch) -> u32 {
    match arch {
        Arch::AArch64 => 500,
        Arch::X86_64 | Arch::X86 => 200,
    }
}

/// Map install scope to the WiX `InstallScope` attribute value.
pub fn map_install_scope(scope: InstallScope) -> &'static str {
    match scope {
        InstallScope::PerMachine => "perMachine",
        InstallScope::PerUser => "perUser",
    }
}

/// Format version string for the MSI `ProductVersion` property.
///
/// Windows Installer accepts `major.minor.build[.revision]` with major and
/// minor at most 255 and build at most 65535. Versions are normalized to
/// four parts:
/// - "1" -> "1.0.0.0"
/// - "1.2.3" -> "1.2.3.0"
/// - "1.2.3-beta.1" -> "1.2.3.0" (pre-release dropped)
///
/// # Errors
///
/// Returns [`Error::Precondition`] for empty, non-numeric, out-of-range or
/// more-than-four-part versions.
pub fn format_version_for_msi(version: &str) -> Result<String> {
    let trimmed = version.trim();

    let core = match semver::Version::parse(trimmed) {
        Ok(parsed) => {
            if !parsed.pre.is_empty() || !parsed.build.is_empty() {
                log::warn!(
                    "MSI versions are numeric only; dropping '{}' suffix from {}",
                    if parsed.pre.is_empty() {
                        parsed.build.as_str()
                    } else {
                        parsed.pre.as_str()
                    },
                    trimmed
                );
            }
            format!("{}.{}.{}", parsed.major, parsed.minor, parsed.patch)
        }
        Err(_) => trimmed.to_string(),
    };

    let invalid = || {
        Error::Precondition(format!(
            "invalid version '{version}': expected 1-4 numeric dot-separated parts"
        ))
    };

    let parts = core
        .split('.')
        .map(|part| part.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>>>()?;

    if parts.len() > 4 {
        return Err(invalid());
    }

    const LIMITS: [u32; 4] = [255, 255, 65535, 65535];
    for (part, limit) in parts.iter().zip(LIMITS) {
        if *part > limit {
            return Err(Error::Precondition(format!(
                "invalid version '{version}': component {part} exceeds the MSI limit of {limit}"
            )));
        }
    }

    let mut padded = parts;
    padded.resize(4, 0);
    Ok(padded
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("."))
}

/// Escape a value for use inside an XML attribute.
pub fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_versions() {
        assert_eq!(format_version_for_msi("1").unwrap(), "1.0.0.0");
        assert_eq!(format_version_for_msi("1.2").unwrap(), "1.2.0.0");
        assert_eq!(format_version_for_msi("1.0.0").unwrap(), "1.0.0.0");
        assert_eq!(format_version_for_msi("2.3.4.5").unwrap(), "2.3.4.5");
        assert_eq!(format_version_for_msi("1.2.3-beta.1").unwrap(), "1.2.3.0");
        assert_eq!(format_version_for_msi(" 4.5.6 ").unwrap(), "4.5.6.0");
    }

    #[test]
    fn rejects_invalid_versions() {
        for version in ["", "abc", "1.x", "1.2.3.4.5", "256.0.0", "1.2.70000", "1..2"] {
            let err = format_version_for_msi(version).unwrap_err();
            assert!(
                matches!(err, Error::Precondition(_)),
                "{version} should be rejected"
            );
        }
    }

    #[test]
    fn escapes_xml_specials() {
        assert_eq!(
            xml_escape(r#"Tom & Jerry's <"app">"#),
            "Tom &amp; Jerry&apos;s &lt;&quot;app&quot;&gt;"
        );
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn maps_architectures() {
        assert_eq!(map_arch(Arch::X86_64), "x64");
        assert_eq!(map_arch(Arch::AArch64), "arm64");
        assert_eq!(program_files_folder(Arch::X86), "ProgramFilesFolder");
        assert_eq!(program_files_folder(Arch::AArch64), "ProgramFiles64Folder");
        assert_eq!(installer_version(Arch::AArch64), 500);
    }
}

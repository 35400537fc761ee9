//! CPU architecture types and utilities.

use std::{fmt, str::FromStr};

/// CPU architecture targeted by the installer.
///
/// Determines the `Platform` attribute of the WiX package, the `-arch`
/// flag passed to candle, and which Program Files folder the application
/// is installed under.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::Arch;
///
/// let arch: Arch = "x64".parse().unwrap();
/// assert_eq!(arch, Arch::X86_64);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    #[default]
    X86_64,
    /// x86 / i686 (32-bit)
    X86,
    /// AArch64 / ARM64 (64-bit)
    AArch64,
}

impl Arch {
    /// Detects the architecture from a Rust target triple or `std::env::consts::ARCH`.
    ///
    /// Falls back to [`Arch::X86_64`] for anything unrecognized.
    pub fn from_target(target: &str) -> Self {
        if target.starts_with("x86_64") {
            Arch::X86_64
        } else if target.starts_with('i') || target == "x86" {
            Arch::X86
        } else if target.starts_with("aarch64") {
            Arch::AArch64
        } else {
            Arch::X86_64 // fallback
        }
    }

    /// Returns true for 64-bit targets.
    pub fn is_64_bit(&self) -> bool {
        matches!(self, Arch::X86_64 | Arch::AArch64)
    }
}

impl FromStr for Arch {
    type Err = crate::bundler::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x64" | "x86_64" | "amd64" => Ok(Arch::X86_64),
            "x86" | "i686" | "i386" => Ok(Arch::X86),
            "arm64" | "aarch64" => Ok(Arch::AArch64),
            other => Err(crate::bundler::Error::ArchError(other.to_string())),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Arch::X86_64 => "x86_64",
            Arch::X86 => "x86",
            Arch::AArch64 => "aarch64",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!("X64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("i686".parse::<Arch>().unwrap(), Arch::X86);
        assert_eq!("arm64".parse::<Arch>().unwrap(), Arch::AArch64);
        assert!("sparc".parse::<Arch>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for arch in [Arch::X86_64, Arch::X86, Arch::AArch64] {
            assert_eq!(arch.to_string().parse::<Arch>().unwrap(), arch);
        }
    }
}

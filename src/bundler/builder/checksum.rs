//! Installer checksum calculation.

use crate::{bail, bundler::Result, bundler::error::ErrorExt};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 checksum of a file.
///
/// Reads the file in 8KB chunks to handle large installers efficiently.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the path cannot be read or is not a regular file
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading installer metadata", path)?;
    if !metadata.is_file() {
        bail!("Path is not a file: {}", path.display());
    }

    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

//! Kodegen Bundler MSI - WiX installer bundler for application directories.
//!
//! This binary writes a WiX source document for an application directory and,
//! with `--compile`, turns it into an `.msi` using candle and light.

use kodegen_bundler_msi::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}

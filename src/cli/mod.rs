//! Command line interface for the MSI bundler.
//!
//! Parses arguments, writes the `.wxs` document and optionally compiles it.

mod args;

pub use args::Args;

use crate::{bundler::MsiCreator, error::Result, metadata};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Run the bundler for already-parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    let manifest = args
        .manifest
        .as_deref()
        .map(metadata::load_manifest)
        .transpose()?;
    let settings = args.to_settings(manifest.as_ref())?;

    let mut creator = MsiCreator::new(settings);

    let wxs = creator.create().await?;
    println!("Created {}", wxs.display());

    if args.compile {
        let msi = creator.compile().await?;
        println!("Created {}", msi.msi_file.display());
        println!("SHA256: {}", msi.checksum);
    }

    Ok(0)
}

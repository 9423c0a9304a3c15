use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use docpix_core::container::{resolve_order, Archive};

#[derive(Args)]
pub struct OrderArgs {
    /// Input .docx document
    pub file: PathBuf,
}

pub fn run(args: &OrderArgs) -> Result<()> {
    let mut archive = Archive::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let parts = archive.package_parts()?;
    let order = resolve_order(&parts);

    println!("File:           {}", args.file.display());
    println!("Relationships:  {}", parts.relationships.len());
    println!("Media members:  {}", parts.media.len());
    match order.strategy {
        Some(strategy) => println!("Resolved by:    {strategy}"),
        None => println!("Resolved by:    nothing (no images)"),
    }
    println!();
    for (i, path) in order.paths.iter().enumerate() {
        println!("{:>4}  {}", i + 1, path);
    }

    Ok(())
}

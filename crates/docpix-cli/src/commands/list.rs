use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use docpix_core::error::Severity;
use docpix_core::io::folder::Gallery;

#[derive(Args)]
pub struct ListArgs {
    /// Image folder
    pub dir: PathBuf,
}

pub fn run(args: &ListArgs) -> Result<()> {
    let gallery = match Gallery::open(&args.dir) {
        Ok(gallery) => gallery,
        Err(e) if e.severity() == Severity::Warning => {
            println!("No images found in {}", args.dir.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    for (i, path) in gallery.images().iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{:>4}  {}", i + 1, name);
    }
    println!("\n{} image(s)", gallery.len());
    Ok(())
}

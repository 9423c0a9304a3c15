use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use docpix_core::config::AppConfig;
use docpix_core::edit::EditorSession;

use crate::notify::ConsoleNotifier;

#[derive(Args)]
pub struct CompressArgs {
    /// Input image
    pub file: PathBuf,

    /// JPEG quality 1-100 (default from settings)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

pub fn run(args: &CompressArgs, config: &AppConfig) -> Result<()> {
    let mut session = EditorSession::new(config.viewer.clone(), Box::new(ConsoleNotifier::new()));
    session.set_image(&args.file)?;
    session.compress(args.quality)?;
    Ok(())
}

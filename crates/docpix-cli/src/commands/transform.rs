use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use docpix_core::edit::ImageState;
use docpix_core::io::image_io::{load_image, save_image};

#[derive(Args)]
pub struct TransformArgs {
    /// Input image
    pub file: PathBuf,

    /// Output image path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Rotate counter-clockwise by DEGREES (repeatable, cumulative)
    #[arg(long, value_name = "DEGREES", allow_hyphen_values = true)]
    pub rotate: Vec<f64>,

    /// Mirror left-right (applied before rotation)
    #[arg(long)]
    pub flip_h: bool,

    /// Mirror top-bottom (applied before rotation)
    #[arg(long)]
    pub flip_v: bool,
}

pub fn run(args: &TransformArgs) -> Result<()> {
    if args.rotate.is_empty() && !args.flip_h && !args.flip_v {
        bail!("Nothing to do: pass --rotate, --flip-h or --flip-v");
    }

    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let mut state = ImageState::new(image);

    if args.flip_h {
        state.flip_horizontal();
    }
    if args.flip_v {
        state.flip_vertical();
    }
    for &delta in &args.rotate {
        state.rotate(delta);
    }

    save_image(state.current(), &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    let (w, h) = state.dimensions();
    println!(
        "Saved {}x{} (angle {:.1}) to {}",
        w,
        h,
        state.angle(),
        args.output.display()
    );
    Ok(())
}

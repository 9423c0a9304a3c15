use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use docpix_core::config::AppConfig;
use docpix_core::edit::{CropCommit, EditorSession, PointerEvent};
use docpix_core::geometry::{Point, Size};

use super::{parse_point, parse_size};
use crate::notify::ConsoleNotifier;

/// Replays a crop drag on a virtual surface, so selections can be given in
/// the same coordinates a viewer window would report.
#[derive(Args)]
pub struct CropArgs {
    /// Input image
    pub file: PathBuf,

    /// Drag start on the surface (X,Y)
    #[arg(long, value_parser = parse_point)]
    pub from: Point,

    /// Drag end on the surface (X,Y)
    #[arg(long, value_parser = parse_point)]
    pub to: Point,

    /// Surface size (WxH)
    #[arg(long, value_parser = parse_size, default_value = "800x600")]
    pub surface: Size,

    /// Zoom factor applied before the drag
    #[arg(long, default_value = "1.0")]
    pub zoom: f64,

    /// Zoom focal point on the surface (X,Y), default is the surface centre
    #[arg(long, value_parser = parse_point)]
    pub focus: Option<Point>,

    /// Pan applied before the drag (DX,DY)
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub pan: Option<Point>,
}

pub fn run(args: &CropArgs, config: &AppConfig) -> Result<()> {
    let mut session = EditorSession::new(config.viewer.clone(), Box::new(ConsoleNotifier::new()));
    session.resize(args.surface);
    session.set_image(&args.file)?;

    if args.zoom != 1.0 {
        session.zoom(args.zoom, args.focus)?;
    }
    if let Some(pan) = args.pan {
        session.pan(pan.x, pan.y)?;
    }

    if let Some(view) = session.viewport() {
        tracing::debug!(
            scale = view.scale(),
            offset_x = view.offset().x,
            offset_y = view.offset().y,
            "viewport before crop"
        );
    }

    session.begin_crop()?;
    session.handle_pointer(PointerEvent::Press(args.from));
    session.handle_pointer(PointerEvent::Move(args.to));
    session.handle_pointer(PointerEvent::Release(args.to));

    if let CropCommit::Saved { rect, .. } = session.commit_crop()? {
        println!(
            "  Region      {}x{} at ({}, {})",
            rect.width(),
            rect.height(),
            rect.left,
            rect.top
        );
    }
    Ok(())
}

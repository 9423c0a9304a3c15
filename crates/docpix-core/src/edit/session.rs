use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ViewerConfig;
use crate::consts::{COMPRESSED_SUFFIX, CROPPED_SUFFIX};
use crate::edit::notify::Notifier;
use crate::edit::rotate::ImageState;
use crate::error::{DocpixError, Result, Severity};
use crate::geometry::{Point, Size};
use crate::io::crop::{apply_crop, CropRect};
use crate::io::image_io::{load_image, save_compressed, save_image, unique_sibling_path};
use crate::view::crop::{CropEngine, CropOutcome};
use crate::view::viewport::ViewportTransform;

/// Raw pointer input from the surface, in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    /// Wheel notch; positive delta zooms in around `at`.
    Wheel { delta: f64, at: Point },
}

/// Result of committing a crop selection.
#[derive(Clone, Debug, PartialEq)]
pub enum CropCommit {
    Saved { path: PathBuf, rect: CropRect },
    Rejected { width: f64, height: f64 },
    NoSelection,
}

struct LoadedImage {
    path: PathBuf,
    state: ImageState,
    viewport: ViewportTransform,
}

/// One open image with its viewport and crop/rotate state, driven by the
/// event source of a UI shell.
pub struct EditorSession {
    config: ViewerConfig,
    notifier: Box<dyn Notifier>,
    surface: Size,
    loaded: Option<LoadedImage>,
    crop: CropEngine,
    last_pointer: Option<Point>,
}

impl EditorSession {
    pub fn new(config: ViewerConfig, notifier: Box<dyn Notifier>) -> Self {
        let crop = CropEngine::from_config(&config);
        Self {
            config,
            notifier,
            surface: Size::default(),
            loaded: None,
            crop,
            last_pointer: None,
        }
    }

    /// Load an image file, replacing whatever was open.
    pub fn set_image(&mut self, path: &Path) -> Result<()> {
        self.crop.cancel();
        self.last_pointer = None;

        let image = match load_image(path) {
            Ok(image) => image,
            Err(e) => {
                self.loaded = None;
                self.notifier
                    .notify(Severity::Error, &format!("Failed to load {}: {e}", path.display()));
                return Err(e);
            }
        };

        let size = Size::from_pixels(image.width(), image.height());
        debug!(path = %path.display(), width = image.width(), height = image.height(), "image loaded");
        self.loaded = Some(LoadedImage {
            path: path.to_path_buf(),
            state: ImageState::new(image),
            viewport: ViewportTransform::from_config(&self.config, size, self.surface),
        });
        Ok(())
    }

    pub fn close(&mut self) {
        self.loaded = None;
        self.crop.cancel();
        self.last_pointer = None;
    }

    pub fn path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    pub fn image(&self) -> Option<&ImageState> {
        self.loaded.as_ref().map(|l| &l.state)
    }

    pub fn viewport(&self) -> Option<&ViewportTransform> {
        self.loaded.as_ref().map(|l| &l.viewport)
    }

    pub fn crop(&self) -> &CropEngine {
        &self.crop
    }

    /// The drawing surface changed size.
    pub fn resize(&mut self, surface: Size) {
        self.surface = surface;
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.viewport.resize(surface);
        }
    }

    /// Route pointer input to panning or to crop capture. Ignored when no
    /// image is open.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };

        if self.crop.is_capturing() {
            match event {
                PointerEvent::Press(p) => self.crop.press(p),
                PointerEvent::Move(p) => self.crop.drag(p),
                PointerEvent::Release(p) => self.crop.release(p),
                PointerEvent::Wheel { .. } => {}
            }
            return;
        }

        match event {
            PointerEvent::Press(p) => self.last_pointer = Some(p),
            PointerEvent::Move(p) => {
                if let Some(last) = self.last_pointer {
                    let delta = p - last;
                    loaded.viewport.pan(delta.x, delta.y);
                    self.last_pointer = Some(p);
                }
            }
            PointerEvent::Release(_) => self.last_pointer = None,
            PointerEvent::Wheel { delta, at } => {
                if delta == 0.0 {
                    return;
                }
                let factor = if delta > 0.0 {
                    self.config.wheel_zoom_in
                } else {
                    self.config.wheel_zoom_out
                };
                loaded.viewport.zoom(factor, Some(at));
            }
        }
    }

    pub fn zoom(&mut self, factor: f64, focal: Option<Point>) -> Result<()> {
        self.loaded_mut()?.viewport.zoom(factor, focal);
        Ok(())
    }

    pub fn zoom_in(&mut self) -> Result<()> {
        self.zoom(self.config.button_zoom_in, None)
    }

    pub fn zoom_out(&mut self) -> Result<()> {
        self.zoom(self.config.button_zoom_out, None)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.loaded_mut()?.viewport.pan(dx, dy);
        Ok(())
    }

    pub fn reset_view(&mut self) -> Result<()> {
        self.loaded_mut()?.viewport.reset();
        Ok(())
    }

    pub fn fit(&mut self) -> Result<()> {
        self.loaded_mut()?.viewport.fit();
        Ok(())
    }

    /// Rotate counter-clockwise by `delta_degrees` relative to the current
    /// cumulative angle. The original is untouched.
    pub fn rotate(&mut self, delta_degrees: f64) -> Result<()> {
        let loaded = self.loaded_mut()?;
        loaded.state.rotate(delta_degrees);
        sync_viewport(loaded);
        Ok(())
    }

    pub fn flip_horizontal(&mut self) -> Result<()> {
        let loaded = self.loaded_mut()?;
        loaded.state.flip_horizontal();
        sync_viewport(loaded);
        Ok(())
    }

    pub fn flip_vertical(&mut self) -> Result<()> {
        let loaded = self.loaded_mut()?;
        loaded.state.flip_vertical();
        sync_viewport(loaded);
        Ok(())
    }

    /// Restore the last committed original and clear the rotation.
    pub fn reset_image(&mut self) -> Result<()> {
        let loaded = self.loaded_mut()?;
        loaded.state.reset();
        sync_viewport(loaded);
        Ok(())
    }

    pub fn begin_crop(&mut self) -> Result<()> {
        self.loaded_mut()?;
        self.last_pointer = None;
        self.crop.begin();
        Ok(())
    }

    pub fn cancel_crop(&mut self) {
        self.crop.cancel();
    }

    /// Save the drawn selection next to the source as
    /// `<stem>_cropped[_N].<ext>`. Once saved, the cropped region replaces the
    /// image and its original, and rotation and view reset.
    pub fn commit_crop(&mut self) -> Result<CropCommit> {
        let Some(loaded) = self.loaded.as_mut() else {
            self.crop.cancel();
            return Err(DocpixError::NoImage);
        };

        let rect = match self.crop.commit(&loaded.viewport) {
            CropOutcome::Accepted(rect) => rect,
            CropOutcome::Rejected { width, height } => {
                self.notifier.notify(
                    Severity::Warning,
                    &format!("Crop area too small ({width:.0}x{height:.0}), nothing was cropped"),
                );
                return Ok(CropCommit::Rejected { width, height });
            }
            CropOutcome::NoSelection => {
                self.notifier
                    .notify(Severity::Warning, "No crop area selected");
                return Ok(CropCommit::NoSelection);
            }
        };

        let path = unique_sibling_path(&loaded.path, CROPPED_SUFFIX);
        let saved = apply_crop(loaded.state.current(), &rect)
            .and_then(|cropped| save_image(&cropped, &path).map(|()| cropped));
        let cropped = match saved {
            Ok(cropped) => cropped,
            Err(e) => {
                self.notifier
                    .notify(Severity::Error, &format!("Failed to save crop: {e}"));
                return Err(e);
            }
        };

        // only a saved crop replaces the image
        loaded.state.commit(cropped);
        sync_viewport(loaded);
        loaded.viewport.reset();
        self.notifier.notify(
            Severity::Success,
            &format!("Cropped image saved to {}", path.display()),
        );
        Ok(CropCommit::Saved { path, rect })
    }

    /// Re-encode the current image next to the source as
    /// `<stem>_compressed[_N].<ext>`. `None` uses the configured quality.
    pub fn compress(&mut self, quality: Option<u8>) -> Result<PathBuf> {
        let quality = quality.unwrap_or(self.config.compress_quality);
        let loaded = self.loaded_mut()?;
        let path = unique_sibling_path(&loaded.path, COMPRESSED_SUFFIX);
        if let Err(e) = save_compressed(loaded.state.current(), &path, quality) {
            self.notifier
                .notify(Severity::Error, &format!("Failed to compress image: {e}"));
            return Err(e);
        }
        self.notifier.notify(
            Severity::Success,
            &format!("Compressed image saved to {}", path.display()),
        );
        Ok(path)
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedImage> {
        self.loaded.as_mut().ok_or(DocpixError::NoImage)
    }
}

/// Keep the viewport's notion of image size in step with the current bitmap.
fn sync_viewport(loaded: &mut LoadedImage) {
    let (w, h) = loaded.state.dimensions();
    loaded.viewport.set_image_size(Size::from_pixels(w, h));
}

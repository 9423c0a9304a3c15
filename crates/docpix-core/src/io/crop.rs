use image::DynamicImage;

use crate::error::{DocpixError, Result};

/// A crop region in image pixel coordinates, edges inclusive-exclusive
/// (`left..right`, `top..bottom`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Check the rect is non-empty and lies within a `src_w`x`src_h` image.
    pub fn validated(&self, src_w: u32, src_h: u32) -> Result<CropRect> {
        if self.width() == 0 || self.height() == 0 {
            return Err(DocpixError::InvalidCrop(
                "Crop width and height must be > 0".into(),
            ));
        }

        if self.right > src_w || self.bottom > src_h {
            return Err(DocpixError::InvalidCrop(format!(
                "Crop region ({},{} {}x{}) exceeds source dimensions ({src_w}x{src_h})",
                self.left,
                self.top,
                self.width(),
                self.height()
            )));
        }

        Ok(*self)
    }
}

/// Cut `crop` out of `image`.
pub fn apply_crop(image: &DynamicImage, crop: &CropRect) -> Result<DynamicImage> {
    let validated = crop.validated(image.width(), image.height())?;
    Ok(image.crop_imm(
        validated.left,
        validated.top,
        validated.width(),
        validated.height(),
    ))
}

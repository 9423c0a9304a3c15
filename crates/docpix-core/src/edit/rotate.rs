//! Rotation and mirroring against a preserved original bitmap.
//!
//! Rotation always starts from the original, rotated by the cumulative angle,
//! so repeated rotations never compound resampling error. Flips are
//! committing: the mirrored image becomes the new original.
//!
//! For rotation by θ (counter-clockwise on screen, y pointing down) each
//! output pixel samples the source at:
//! ```text
//! src_x = (dst_x - dst_cx) * cos(θ) - (dst_y - dst_cy) * sin(θ) + src_cx
//! src_y = (dst_x - dst_cx) * sin(θ) + (dst_y - dst_cy) * cos(θ) + src_cy
//! ```

use image::{DynamicImage, Rgba, RgbaImage};

use crate::consts::ANGLE_EPSILON;

/// Current bitmap, the original it derives from, and the cumulative angle.
#[derive(Clone, Debug)]
pub struct ImageState {
    current: DynamicImage,
    original: DynamicImage,
    angle: f64,
}

impl ImageState {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            current: image.clone(),
            original: image,
            angle: 0.0,
        }
    }

    pub fn current(&self) -> &DynamicImage {
        &self.current
    }

    pub fn original(&self) -> &DynamicImage {
        &self.original
    }

    /// Cumulative rotation in degrees, in `[0, 360)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.current.width(), self.current.height())
    }

    /// Non-finite deltas are ignored.
    pub fn rotate(&mut self, delta_degrees: f64) {
        if !delta_degrees.is_finite() {
            return;
        }
        self.angle = normalize_angle(self.angle + delta_degrees);
        self.current = rotate_image(&self.original, self.angle);
    }

    pub fn flip_horizontal(&mut self) {
        self.commit(self.current.fliph());
    }

    pub fn flip_vertical(&mut self) {
        self.commit(self.current.flipv());
    }

    /// Back to the original, unrotated.
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.angle = 0.0;
    }

    /// Make `image` both current and original; angle returns to 0.
    pub fn commit(&mut self, image: DynamicImage) {
        self.current = image.clone();
        self.original = image;
        self.angle = 0.0;
    }
}

/// Reduce an angle to `[0, 360)`, snapping values within epsilon of 360 to 0.
pub fn normalize_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    if a < ANGLE_EPSILON || 360.0 - a < ANGLE_EPSILON {
        0.0
    } else {
        a
    }
}

/// Bounding box of a `width`x`height` image rotated by `angle_degrees`.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let a = normalize_angle(angle_degrees);
    if a == 0.0 || (a - 180.0).abs() < ANGLE_EPSILON {
        return (width, height);
    }
    if (a - 90.0).abs() < ANGLE_EPSILON || (a - 270.0).abs() < ANGLE_EPSILON {
        return (height, width);
    }

    let rad = a.to_radians();
    let (cos, sin) = (rad.cos().abs(), rad.sin().abs());
    let (w, h) = (width as f64, height as f64);
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;
    (new_w.max(1), new_h.max(1))
}

/// Rotate counter-clockwise around the centre, expanding the canvas to fit.
/// Quarter turns are exact; other angles are bilinear-resampled onto a
/// transparent background.
pub fn rotate_image(image: &DynamicImage, angle_degrees: f64) -> DynamicImage {
    let a = normalize_angle(angle_degrees);
    if a == 0.0 {
        return image.clone();
    }
    if (a - 90.0).abs() < ANGLE_EPSILON {
        return image.rotate270();
    }
    if (a - 180.0).abs() < ANGLE_EPSILON {
        return image.rotate180();
    }
    if (a - 270.0).abs() < ANGLE_EPSILON {
        return image.rotate90();
    }

    let src = image.to_rgba8();
    let (dst_w, dst_h) = compute_rotated_bounds(src.width(), src.height(), a);

    let rad = a.to_radians();
    let (cos, sin) = (rad.cos(), rad.sin());
    let src_cx = src.width() as f64 / 2.0;
    let src_cy = src.height() as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let out = RgbaImage::from_fn(dst_w, dst_h, |x, y| {
        // sample at pixel centres
        let dx = x as f64 + 0.5 - dst_cx;
        let dy = y as f64 + 0.5 - dst_cy;
        let sx = dx * cos - dy * sin + src_cx - 0.5;
        let sy = dx * sin + dy * cos + src_cy - 0.5;
        sample_bilinear(&src, sx, sy)
    });

    DynamicImage::ImageRgba8(out)
}

/// Bilinear sample at fractional pixel coordinates; transparent outside.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (w, h) = (image.width() as f64, image.height() as f64);
    if x < -0.5 || y < -0.5 || x > w - 0.5 || y > h - 0.5 {
        return Rgba([0, 0, 0, 0]);
    }

    let max_x = image.width() - 1;
    let max_y = image.height() - 1;
    let x = x.clamp(0.0, max_x as f64);
    let y = y.clamp(0.0, max_y as f64);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.get_pixel(x0, y0).0;
    let p10 = image.get_pixel(x1, y0).0;
    let p01 = image.get_pixel(x0, y1).0;
    let p11 = image.get_pixel(x1, y1).0;

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    Rgba(result)
}

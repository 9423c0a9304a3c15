//! Scale/pan state of an image shown on a bounded drawing surface.
//!
//! The image is drawn centred on the surface, shifted by the pan offset:
//!
//! ```text
//! surface = surface_centre + pan + (image_point - image_size / 2) * scale
//! ```
//!
//! Pan is kept within half the overflow on each axis, so the scaled image can
//! never be dragged fully off-screen, and is pinned to 0 on any axis where the
//! scaled image is smaller than the surface.

use crate::config::ViewerConfig;
use crate::consts::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};
use crate::geometry::{Point, Size};

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportTransform {
    scale: f64,
    pan: Point,
    surface: Size,
    image: Size,
    min_scale: f64,
    max_scale: f64,
}

impl ViewportTransform {
    pub fn new(image: Size, surface: Size) -> Self {
        Self {
            scale: 1.0,
            pan: Point::ORIGIN,
            surface,
            image,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }

    pub fn from_config(config: &ViewerConfig, image: Size, surface: Size) -> Self {
        Self::new(image, surface).with_scale_limits(config.min_scale, config.max_scale)
    }

    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        // scale must stay positive, zoom divides by it
        let min_scale = min_scale.max(f64::EPSILON);
        self.min_scale = min_scale.min(max_scale);
        self.max_scale = max_scale.max(min_scale);
        self.scale = self.scale.clamp(self.min_scale, self.max_scale);
        self.clamp_pan();
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pan offset in surface pixels.
    pub fn offset(&self) -> Point {
        self.pan
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn image_size(&self) -> Size {
        self.image
    }

    pub fn scaled_size(&self) -> Size {
        self.image.scaled(self.scale)
    }

    /// Scale as a whole percentage, for the on-surface zoom label.
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// Largest allowed pan magnitude per axis.
    pub fn max_pan(&self) -> Point {
        let scaled = self.scaled_size();
        Point::new(
            ((scaled.width - self.surface.width) / 2.0).max(0.0),
            ((scaled.height - self.surface.height) / 2.0).max(0.0),
        )
    }

    /// Multiply the scale by `factor`, clamped to the scale limits. With a
    /// focal point (surface coordinates) the image point under it stays put.
    pub fn zoom(&mut self, factor: f64, focal: Option<Point>) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let old_scale = self.scale;
        self.scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);

        if let Some(focal) = focal {
            let rel = focal - self.surface.center();
            let ratio = self.scale / old_scale;
            self.pan = Point::new(
                rel.x - (rel.x - self.pan.x) * ratio,
                rel.y - (rel.y - self.pan.y) * ratio,
            );
        }

        self.clamp_pan();
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan = Point::new(self.pan.x + dx, self.pan.y + dy);
        self.clamp_pan();
    }

    /// New surface size; scale is kept and pan re-clamped.
    pub fn resize(&mut self, surface: Size) {
        self.surface = surface;
        self.clamp_pan();
    }

    /// Swap in a bitmap of a different size, keeping the scale.
    pub fn set_image_size(&mut self, image: Size) {
        self.image = image;
        self.clamp_pan();
    }

    /// Default scale (1.0, within limits) and centred.
    pub fn reset(&mut self) {
        self.scale = 1.0_f64.clamp(self.min_scale, self.max_scale);
        self.pan = Point::ORIGIN;
    }

    /// Largest scale at which the whole image fits the surface, centred.
    pub fn fit(&mut self) {
        if self.image.is_empty() || self.surface.is_empty() {
            return;
        }
        let fit_x = self.surface.width / self.image.width;
        let fit_y = self.surface.height / self.image.height;
        self.scale = fit_x.min(fit_y).clamp(self.min_scale, self.max_scale);
        self.pan = Point::ORIGIN;
    }

    pub fn image_to_surface(&self, p: Point) -> Point {
        let centre = self.surface.center();
        let half = self.image.center();
        Point::new(
            centre.x + self.pan.x + (p.x - half.x) * self.scale,
            centre.y + self.pan.y + (p.y - half.y) * self.scale,
        )
    }

    /// Exact inverse of [`Self::image_to_surface`].
    pub fn surface_to_image(&self, p: Point) -> Point {
        let centre = self.surface.center();
        let half = self.image.center();
        Point::new(
            (p.x - centre.x - self.pan.x) / self.scale + half.x,
            (p.y - centre.y - self.pan.y) / self.scale + half.y,
        )
    }

    fn clamp_pan(&mut self) {
        let max = self.max_pan();
        self.pan = Point::new(
            self.pan.x.clamp(-max.x, max.x),
            self.pan.y.clamp(-max.y, max.y),
        );
    }
}

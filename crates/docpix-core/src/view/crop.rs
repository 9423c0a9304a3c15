use crate::config::ViewerConfig;
use crate::consts::DEFAULT_MIN_CROP_SIZE;
use crate::geometry::Point;
use crate::io::crop::CropRect;
use crate::view::viewport::ViewportTransform;

/// What pointer drags on the surface do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Drag pans, wheel zooms.
    #[default]
    Navigate,
    /// Pan/zoom suspended; drags draw a crop rectangle.
    CropCapture,
}

/// Drag rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropSelection {
    pub start: Point,
    pub end: Point,
}

impl CropSelection {
    /// Normalised (top-left, bottom-right) corners.
    pub fn bounds(&self) -> (Point, Point) {
        (
            Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Point::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CropOutcome {
    Accepted(CropRect),
    /// Selection maps to less than the minimum size in image space.
    Rejected { width: f64, height: f64 },
    /// Commit without a drawn selection.
    NoSelection,
}

/// Two-phase freehand crop: capture a drag on the surface, then map it into
/// image space through the viewport.
#[derive(Clone, Debug)]
pub struct CropEngine {
    mode: InputMode,
    selection: Option<CropSelection>,
    dragging: bool,
    min_size: f64,
}

impl Default for CropEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CROP_SIZE)
    }
}

impl CropEngine {
    pub fn new(min_size: f64) -> Self {
        Self {
            mode: InputMode::Navigate,
            selection: None,
            dragging: false,
            min_size,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.min_crop_size)
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_capturing(&self) -> bool {
        self.mode == InputMode::CropCapture
    }

    pub fn selection(&self) -> Option<&CropSelection> {
        self.selection.as_ref()
    }

    /// Enter crop capture, dropping any earlier selection.
    pub fn begin(&mut self) {
        self.mode = InputMode::CropCapture;
        self.selection = None;
        self.dragging = false;
    }

    pub fn press(&mut self, p: Point) {
        if !self.is_capturing() {
            return;
        }
        self.selection = Some(CropSelection { start: p, end: p });
        self.dragging = true;
    }

    pub fn drag(&mut self, p: Point) {
        if !self.dragging {
            return;
        }
        if let Some(sel) = self.selection.as_mut() {
            sel.end = p;
        }
    }

    pub fn release(&mut self, p: Point) {
        self.drag(p);
        self.dragging = false;
    }

    /// Surface-space rectangle to draw as feedback while dragging.
    pub fn live_rect(&self) -> Option<(Point, Point)> {
        if !self.is_capturing() {
            return None;
        }
        self.selection.as_ref().map(CropSelection::bounds)
    }

    /// Leave crop capture without touching the image.
    pub fn cancel(&mut self) {
        self.mode = InputMode::Navigate;
        self.selection = None;
        self.dragging = false;
    }

    /// Map the selection into image space. Whatever the outcome, the
    /// selection is consumed and navigation mode restored.
    pub fn commit(&mut self, viewport: &ViewportTransform) -> CropOutcome {
        let selection = self.selection.take();
        self.cancel();

        let Some(selection) = selection else {
            return CropOutcome::NoSelection;
        };

        let image = viewport.image_size();
        let clamp = |p: Point| {
            let ip = viewport.surface_to_image(p);
            Point::new(ip.x.clamp(0.0, image.width), ip.y.clamp(0.0, image.height))
        };
        let a = clamp(selection.start);
        let b = clamp(selection.end);

        let (left, right) = (a.x.min(b.x), a.x.max(b.x));
        let (top, bottom) = (a.y.min(b.y), a.y.max(b.y));
        let (width, height) = (right - left, bottom - top);

        if width < self.min_size || height < self.min_size {
            return CropOutcome::Rejected { width, height };
        }

        CropOutcome::Accepted(CropRect {
            left: left.round() as u32,
            top: top.round() as u32,
            right: right.round() as u32,
            bottom: bottom.round() as u32,
        })
    }
}

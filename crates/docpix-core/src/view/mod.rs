pub mod crop;
pub mod viewport;

pub use crop::{CropEngine, CropOutcome, CropSelection, InputMode};
pub use viewport::ViewportTransform;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BUTTON_ZOOM_IN, DEFAULT_BUTTON_ZOOM_OUT, DEFAULT_COMPRESS_QUALITY,
    DEFAULT_MAX_SCALE, DEFAULT_MIN_CROP_SIZE, DEFAULT_MIN_SCALE, DEFAULT_ORDINAL_WIDTH,
    DEFAULT_WHEEL_ZOOM_IN, DEFAULT_WHEEL_ZOOM_OUT,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Zero-padding width of the ordinal in output file names.
    pub ordinal_width: usize,
    /// Delete regular files in the destination before writing.
    pub clear_destination: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            ordinal_width: DEFAULT_ORDINAL_WIDTH,
            clear_destination: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub wheel_zoom_in: f64,
    pub wheel_zoom_out: f64,
    pub button_zoom_in: f64,
    pub button_zoom_out: f64,
    /// Smallest accepted crop side in image pixels.
    pub min_crop_size: f64,
    /// JPEG quality (1-100) used by compress.
    pub compress_quality: u8,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            wheel_zoom_in: DEFAULT_WHEEL_ZOOM_IN,
            wheel_zoom_out: DEFAULT_WHEEL_ZOOM_OUT,
            button_zoom_in: DEFAULT_BUTTON_ZOOM_IN,
            button_zoom_out: DEFAULT_BUTTON_ZOOM_OUT,
            min_crop_size: DEFAULT_MIN_CROP_SIZE,
            compress_quality: DEFAULT_COMPRESS_QUALITY,
        }
    }
}

/// Main body markup part of a word-processing container.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Relationship manifest of the main body part.
pub const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";

/// Archive prefix under which embedded media parts live.
pub const MEDIA_PREFIX: &str = "word/media/";

/// Namespace root that relative relationship targets are resolved against.
pub const DOCUMENT_ROOT: &str = "word/";

/// Relationship target prefix (relative to [`DOCUMENT_ROOT`]) that marks a media part.
pub const MEDIA_TARGET_PREFIX: &str = "media/";

/// Default zero-padding width of extracted file ordinals ("007.png").
pub const DEFAULT_ORDINAL_WIDTH: usize = 3;

/// Number of leading bytes inspected when sniffing a file on disk.
pub const SNIFF_HEADER_LEN: usize = 32;

/// Default viewport scale bounds.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;
pub const DEFAULT_MAX_SCALE: f64 = 4.0;

/// Zoom factors applied per mouse-wheel notch.
pub const DEFAULT_WHEEL_ZOOM_IN: f64 = 1.1;
pub const DEFAULT_WHEEL_ZOOM_OUT: f64 = 0.9;

/// Zoom factors applied by the zoom-in / zoom-out buttons.
pub const DEFAULT_BUTTON_ZOOM_IN: f64 = 1.2;
pub const DEFAULT_BUTTON_ZOOM_OUT: f64 = 0.8;

/// Smallest accepted crop side, in image pixels.
pub const DEFAULT_MIN_CROP_SIZE: f64 = 10.0;

/// Default JPEG quality used by compress.
pub const DEFAULT_COMPRESS_QUALITY: u8 = 85;

/// Angles closer than this to a multiple of 90 degrees are treated as exact.
pub const ANGLE_EPSILON: f64 = 1e-3;

/// Suffix appended to the stem of a cropped image.
pub const CROPPED_SUFFIX: &str = "_cropped";

/// Suffix appended to the stem of a compressed image.
pub const COMPRESSED_SUFFIX: &str = "_compressed";

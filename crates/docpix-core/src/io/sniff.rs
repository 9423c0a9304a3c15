use std::fs::File;
use std::io::Read;
use std::path::Path;

use image::ImageFormat;

use crate::consts::SNIFF_HEADER_LEN;
use crate::error::Result;

/// Raster format detected from a byte signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SniffedFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    Webp,
    /// Recognised raster format outside the fixed extension table.
    Other(ImageFormat),
    Unknown,
}

impl SniffedFormat {
    /// Canonical lowercase tag, `"unknown"` when unrecognised.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Webp => "webp",
            Self::Other(format) => format.extensions_str().first().copied().unwrap_or("unknown"),
            Self::Unknown => "unknown",
        }
    }

    /// Output extension, including the dot. Anything outside the table is `.png`.
    pub fn extension(&self) -> &'static str {
        extension_for_tag(self.tag())
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn image_format(&self) -> Option<ImageFormat> {
        match self {
            Self::Jpeg => Some(ImageFormat::Jpeg),
            Self::Png => Some(ImageFormat::Png),
            Self::Gif => Some(ImageFormat::Gif),
            Self::Bmp => Some(ImageFormat::Bmp),
            Self::Tiff => Some(ImageFormat::Tiff),
            Self::Webp => Some(ImageFormat::WebP),
            Self::Other(format) => Some(*format),
            Self::Unknown => None,
        }
    }
}

/// Fixed tag → extension table.
pub fn extension_for_tag(tag: &str) -> &'static str {
    match tag {
        "jpeg" | "jpg" => ".jpg",
        "png" => ".png",
        "bmp" => ".bmp",
        "gif" => ".gif",
        "tiff" => ".tiff",
        "webp" => ".webp",
        _ => ".png",
    }
}

/// Classify raw bytes by signature. The file name plays no part.
pub fn sniff(bytes: &[u8]) -> SniffedFormat {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => SniffedFormat::Jpeg,
        Ok(ImageFormat::Png) => SniffedFormat::Png,
        Ok(ImageFormat::Gif) => SniffedFormat::Gif,
        Ok(ImageFormat::Bmp) => SniffedFormat::Bmp,
        Ok(ImageFormat::Tiff) => SniffedFormat::Tiff,
        Ok(ImageFormat::WebP) => SniffedFormat::Webp,
        Ok(other) => SniffedFormat::Other(other),
        Err(_) => SniffedFormat::Unknown,
    }
}

/// Sniff the leading bytes of a file on disk.
pub fn sniff_file(path: &Path) -> Result<SniffedFormat> {
    let mut header = Vec::with_capacity(SNIFF_HEADER_LEN);
    File::open(path)?
        .take(SNIFF_HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    Ok(sniff(&header))
}

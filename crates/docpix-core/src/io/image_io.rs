use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::Result;

/// Decode an image file. The format is taken from the content, so
/// extensionless files load too.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img)
}

/// Output format for `path`, from its extension. Unknown extensions encode as PNG.
pub fn format_for_path(path: &Path) -> ImageFormat {
    ImageFormat::from_path(path).unwrap_or(ImageFormat::Png)
}

/// Save an image, choosing the format from the file extension.
pub fn save_image(img: &DynamicImage, path: &Path) -> Result<()> {
    match format_for_path(path) {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => {
            DynamicImage::ImageRgb8(img.to_rgb8()).save_with_format(path, ImageFormat::Jpeg)?
        }
        format => img.save_with_format(path, format)?,
    }
    Ok(())
}

/// Re-encode an image to `path`: JPEG at `quality` (1-100), PNG at best
/// compression, anything else with its format's default encoder.
pub fn save_compressed(img: &DynamicImage, path: &Path, quality: u8) -> Result<()> {
    match format_for_path(path) {
        ImageFormat::Jpeg => {
            let writer = BufWriter::new(File::create(path)?);
            let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100));
            img.to_rgb8().write_with_encoder(encoder)?;
        }
        ImageFormat::Png => {
            let writer = BufWriter::new(File::create(path)?);
            let encoder =
                PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
            img.write_with_encoder(encoder)?;
        }
        _ => save_image(img, path)?,
    }
    Ok(())
}

/// `<stem><suffix>.<ext>` next to `source`, or `<stem><suffix>_N.<ext>`
/// (N = 1, 2, ...) when that name is taken. Never returns an existing path.
pub fn unique_sibling_path(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let ext = source.extension().and_then(|e| e.to_str());
    let parent = source.parent().unwrap_or(Path::new("."));

    let name_for = |counter: Option<usize>| {
        let base = match counter {
            Some(n) => format!("{stem}{suffix}_{n}"),
            None => format!("{stem}{suffix}"),
        };
        match ext {
            Some(ext) => parent.join(format!("{base}.{ext}")),
            None => parent.join(base),
        }
    };

    let mut candidate = name_for(None);
    let mut counter = 1;
    while candidate.exists() {
        candidate = name_for(Some(counter));
        counter += 1;
    }
    candidate
}

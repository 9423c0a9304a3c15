use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::ExtractConfig;
use crate::consts::DOCUMENT_PART;
use crate::container::{resolve_order, Archive, OrderStrategy};
use crate::error::{DocpixError, Result};
use crate::io::sniff::{sniff, SniffedFormat};

/// An image pulled out of the container, ready to be persisted.
#[derive(Clone, Debug)]
pub struct ExtractedImage {
    /// 1-based position in resolved reading order.
    pub ordinal: usize,
    pub format: SniffedFormat,
    pub bytes: Vec<u8>,
}

impl ExtractedImage {
    /// Zero-padded ordinal plus sniffed extension, e.g. `007.png`.
    pub fn file_name(&self, width: usize) -> String {
        format!("{:0width$}{}", self.ordinal, self.format.extension())
    }
}

#[derive(Clone, Debug)]
pub struct ExtractedFile {
    pub ordinal: usize,
    /// Archive member the bytes came from.
    pub member: String,
    pub format: SniffedFormat,
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Referenced member is not in the archive.
    Missing,
    /// Member could not be read.
    Unreadable(String),
    /// Bytes do not carry a known image signature.
    NotAnImage,
}

#[derive(Clone, Debug)]
pub struct SkippedMember {
    pub ordinal: usize,
    pub member: String,
    pub reason: SkipReason,
}

/// Outcome of a successful extraction run.
#[derive(Clone, Debug, Default)]
pub struct ExtractionReport {
    /// Order-resolution tier that produced the sequence.
    pub strategy: Option<OrderStrategy>,
    pub written: Vec<ExtractedFile>,
    pub skipped: Vec<SkippedMember>,
}

impl ExtractionReport {
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

/// Extract every image of `source` into `dest`, named by reading order.
///
/// Regular files already in `dest` are deleted first (when
/// `config.clear_destination` is set; otherwise an existing output name is
/// [`DocpixError::NameCollision`]). `progress` is called with
/// `(references_done, total_references)`. Returns
/// [`DocpixError::NoImagesFound`] when nothing could be written.
pub fn extract_images(
    source: &Path,
    dest: &Path,
    config: &ExtractConfig,
    progress: impl FnMut(usize, usize),
) -> Result<ExtractionReport> {
    if source.as_os_str().is_empty() {
        return Err(DocpixError::InputMissing("source document"));
    }
    if dest.as_os_str().is_empty() {
        return Err(DocpixError::InputMissing("destination directory"));
    }

    let mut archive = Archive::open(source)?;
    extract_from_archive(&mut archive, dest, config, progress)
}

/// Same as [`extract_images`] for an already opened container.
pub fn extract_from_archive(
    archive: &mut Archive,
    dest: &Path,
    config: &ExtractConfig,
    mut progress: impl FnMut(usize, usize),
) -> Result<ExtractionReport> {
    if !archive.has_member(DOCUMENT_PART) {
        return Err(DocpixError::MissingPart(DOCUMENT_PART.to_string()));
    }

    let parts = archive.package_parts()?;
    let order = resolve_order(&parts);

    fs::create_dir_all(dest)?;
    if config.clear_destination {
        clear_directory(dest)?;
    }

    let mut report = ExtractionReport {
        strategy: order.strategy,
        ..Default::default()
    };
    let total = order.paths.len();

    for (idx, member) in order.paths.iter().enumerate() {
        let ordinal = idx + 1;
        match load_member(archive, member, ordinal) {
            Ok(image) => {
                let path = dest.join(image.file_name(config.ordinal_width));
                write_new(&path, &image.bytes)?;
                debug!(ordinal, member = %member, path = %path.display(), "image written");
                report.written.push(ExtractedFile {
                    ordinal,
                    member: member.clone(),
                    format: image.format,
                    path,
                });
            }
            Err(reason) => {
                warn!(ordinal, member = %member, ?reason, "skipping media member");
                report.skipped.push(SkippedMember {
                    ordinal,
                    member: member.clone(),
                    reason,
                });
            }
        }
        progress(ordinal, total);
    }

    if report.written.is_empty() {
        return Err(DocpixError::NoImagesFound);
    }

    info!(
        count = report.count(),
        skipped = report.skipped.len(),
        dest = %dest.display(),
        "extraction finished"
    );
    Ok(report)
}

fn load_member(
    archive: &mut Archive,
    member: &str,
    ordinal: usize,
) -> std::result::Result<ExtractedImage, SkipReason> {
    let bytes = match archive.read(member) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Err(SkipReason::Missing),
        Err(e) => return Err(SkipReason::Unreadable(e.to_string())),
    };
    let format = sniff(&bytes);
    if !format.is_known() {
        return Err(SkipReason::NotAnImage);
    }
    Ok(ExtractedImage {
        ordinal,
        format,
        bytes,
    })
}

/// Write `bytes` to a path that must not exist yet.
fn write_new(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(DocpixError::NameCollision(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(bytes)?;
    Ok(())
}

/// Delete the regular files directly inside `dir`. Sub-directories are left
/// alone and a file that cannot be removed is logged, not fatal.
/// Returns the number of files removed.
pub fn clear_directory(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "removed existing file");
                removed += 1;
            }
            Err(e) => warn!(path = %path.display(), "failed to remove file: {e}"),
        }
    }
    Ok(removed)
}

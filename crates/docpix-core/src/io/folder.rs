use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DocpixError, Result};
use crate::io::sniff::sniff_file;

/// List the images in `dir`, ordered by the number formed from all digits in
/// each file name, then by name.
///
/// Files are recognised by content, so extensionless images are included and
/// mislabelled non-images are not.
pub fn load_folder(dir: &Path) -> Result<Vec<PathBuf>> {
    if dir.as_os_str().is_empty() {
        return Err(DocpixError::InputMissing("image folder"));
    }
    if !dir.is_dir() {
        return Err(DocpixError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        match sniff_file(&path) {
            Ok(format) if format.is_known() => images.push(path),
            Ok(_) => debug!(path = %path.display(), "not an image, skipped"),
            Err(e) => debug!(path = %path.display(), "unreadable, skipped: {e}"),
        }
    }

    if images.is_empty() {
        return Err(DocpixError::NoImagesFound);
    }

    images.sort_by_cached_key(|p| {
        let name = p
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (DigitKey::from_name(&name), name)
    });
    Ok(images)
}

/// All ASCII digits of a file name read as one number (`a1b5` is 15, no
/// digits is 0). Kept as a digit string so arbitrarily long runs compare
/// numerically without overflow.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct DigitKey {
    len: usize,
    digits: String,
}

impl DigitKey {
    fn from_name(name: &str) -> Self {
        let digits: String = name
            .chars()
            .filter(char::is_ascii_digit)
            .skip_while(|&c| c == '0')
            .collect();
        Self {
            len: digits.len(),
            digits,
        }
    }
}

/// Result of stepping through a [`Gallery`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Cursor moved to this index.
    Moved(usize),
    /// Already at the first/last image; all images have been viewed.
    Exhausted,
    /// The gallery holds no images.
    Empty,
}

/// Ordered image list with a cursor, as browsed one image at a time.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    images: Vec<PathBuf>,
    index: usize,
}

impl Gallery {
    pub fn new(images: Vec<PathBuf>) -> Self {
        Self { images, index: 0 }
    }

    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self::new(load_folder(dir)?))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn current(&self) -> Option<&Path> {
        self.images.get(self.index).map(PathBuf::as_path)
    }

    pub fn next(&mut self) -> Navigation {
        if self.images.is_empty() {
            Navigation::Empty
        } else if self.index + 1 < self.images.len() {
            self.index += 1;
            Navigation::Moved(self.index)
        } else {
            Navigation::Exhausted
        }
    }

    pub fn previous(&mut self) -> Navigation {
        if self.images.is_empty() {
            Navigation::Empty
        } else if self.index > 0 {
            self.index -= 1;
            Navigation::Moved(self.index)
        } else {
            Navigation::Exhausted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_key_joins_all_digits() {
        assert!(DigitKey::from_name("a2.png") < DigitKey::from_name("a1b5.png"));
        assert_eq!(DigitKey::from_name("cover.png"), DigitKey::from_name("x0.png"));
        assert_eq!(DigitKey::from_name("007.png"), DigitKey::from_name("7.png"));
        assert!(
            DigitKey::from_name("99999999999999999999999999999999999999999.png")
                < DigitKey::from_name("100000000000000000000000000000000000000000.png")
        );
    }
}

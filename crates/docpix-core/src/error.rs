use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocpixError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No {0} specified")]
    InputMissing(&'static str),

    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a valid document container: {0}")]
    InvalidContainer(String),

    #[error("Container is missing required part {0}")]
    MissingPart(String),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("File already exists: {}", .0.display())]
    NameCollision(PathBuf),

    #[error("No images found")]
    NoImagesFound,

    #[error("No image loaded")]
    NoImage,
}

/// Taxonomy used by callers to decide how a failure is surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InputMissing,
    FormatInvalid,
    PartialDecodeFailure,
    NameCollision,
    NoImagesFound,
    InvalidInput,
    Io,
}

/// How a message is presented to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl DocpixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputMissing(_) | Self::DirectoryNotFound(_) | Self::NoImage => {
                ErrorKind::InputMissing
            }
            Self::InvalidContainer(_) | Self::MissingPart(_) | Self::Zip(_) => {
                ErrorKind::FormatInvalid
            }
            Self::Image(_) => ErrorKind::PartialDecodeFailure,
            Self::NameCollision(_) => ErrorKind::NameCollision,
            Self::NoImagesFound => ErrorKind::NoImagesFound,
            Self::InvalidCrop(_) => ErrorKind::InvalidInput,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// An empty result is reported as a warning, everything else as an error.
    pub fn severity(&self) -> Severity {
        match self.kind() {
            ErrorKind::NoImagesFound => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocpixError>;

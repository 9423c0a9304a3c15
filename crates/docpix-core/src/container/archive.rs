use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::consts::{DOCUMENT_PART, MEDIA_PREFIX, RELATIONSHIPS_PART};
use crate::error::{DocpixError, Result};

use super::relationships::parse_relationships;
use super::PackageParts;

/// Bytes behind an open archive: a mapped file or an owned buffer.
enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl AsRef<[u8]> for Backing {
    fn as_ref(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Owned(bytes) => bytes.as_slice(),
        }
    }
}

/// Read-only view of a zip-packaged document container.
pub struct Archive {
    zip: ZipArchive<Cursor<Backing>>,
    names: Vec<String>,
}

impl Archive {
    /// Memory-map a container file and open it as a zip archive.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_backing(Backing::Mapped(mmap))
    }

    /// Open a container held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_backing(Backing::Owned(bytes))
    }

    fn from_backing(backing: Backing) -> Result<Self> {
        let mut zip = ZipArchive::new(Cursor::new(backing))
            .map_err(|e| DocpixError::InvalidContainer(e.to_string()))?;

        let mut names = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let entry = zip.by_index_raw(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            if is_safe_member_path(&name) {
                names.push(name);
            } else {
                debug!(member = %name, "ignoring unsafe archive member");
            }
        }

        Ok(Self { zip, names })
    }

    /// File members in storage order.
    pub fn member_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Members stored under `prefix`, in storage order.
    pub fn media_members(&self, prefix: &str) -> Vec<String> {
        self.names
            .iter()
            .filter(|n| n.starts_with(prefix) && n.len() > prefix.len())
            .cloned()
            .collect()
    }

    /// Read a member's bytes. Returns `Ok(None)` when the member does not exist.
    pub fn read(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        if !self.has_member(name) {
            return Ok(None);
        }
        let mut entry = match self.zip.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // declared sizes come from the container and are not trusted
        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    /// Lift the parts needed for order resolution out of the archive.
    pub fn package_parts(&mut self) -> Result<PackageParts> {
        let body = self
            .read(DOCUMENT_PART)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

        let relationships = match self.read(RELATIONSHIPS_PART)? {
            Some(bytes) => parse_relationships(&bytes),
            None => {
                debug!("no relationship manifest in container");
                Default::default()
            }
        };

        Ok(PackageParts {
            body,
            relationships,
            media: self.media_members(MEDIA_PREFIX),
        })
    }
}

/// Reject absolute member names and names that climb out of the archive root.
fn is_safe_member_path(name: &str) -> bool {
    !name.starts_with('/')
        && !name.starts_with('\\')
        && !name.split(['/', '\\']).any(|segment| segment == "..")
}

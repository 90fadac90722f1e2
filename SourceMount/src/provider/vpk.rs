//! VPK archive provider

use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::vpk::VpkArchive;

/// Serves files out of a VPK bundle
#[derive(Debug)]
pub struct VpkProvider {
    archive: VpkArchive,
    verify_crc: bool,
}

impl VpkProvider {
    /// Open an archive index file and validate its header
    ///
    /// # Errors
    ///
    /// Fails with a format error (see [`Error::is_format_error`]) when the
    /// file is not a valid VPK, or [`Error::Io`] when it cannot be read.
    pub fn open<P: AsRef<Path>>(index_path: P) -> Result<Self> {
        Ok(Self {
            archive: VpkArchive::open(index_path)?,
            verify_crc: true,
        })
    }

    /// Enable or disable CRC verification of reads
    #[must_use]
    pub fn with_crc_verification(mut self, verify: bool) -> Self {
        self.verify_crc = verify;
        self
    }

    /// Path of the index file
    #[must_use]
    pub fn path(&self) -> &Path {
        self.archive.path()
    }

    /// The underlying archive
    #[must_use]
    pub fn archive(&self) -> &VpkArchive {
        &self.archive
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.archive.contains(path)
    }

    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match self.archive.read(path, self.verify_crc) {
            Ok(data) => Ok(Some(data)),
            Err(Error::FileNotFoundInVpk(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.archive.entries().map(|e| e.path.clone()).collect()
    }
}

//! Types for VPK archive handling

use serde::Serialize;

use super::DIR_ARCHIVE_INDEX;

/// Header of a VPK directory file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VpkHeader {
    /// Version number (1 or 2)
    pub version: u32,
    /// Size of the directory tree in bytes
    pub tree_size: u32,
    /// Size of the embedded file data section (version 2 only)
    pub file_data_section_size: u32,
    /// Size of the archive MD5 section (version 2 only)
    pub archive_md5_section_size: u32,
    /// Size of the other MD5 section (version 2 only)
    pub other_md5_section_size: u32,
    /// Size of the signature section (version 2 only)
    pub signature_section_size: u32,
}

impl VpkHeader {
    /// Size of the header on disk for this version
    #[must_use]
    pub fn size(&self) -> u64 {
        if self.version >= 2 {
            super::HEADER_SIZE_V2
        } else {
            super::HEADER_SIZE_V1
        }
    }

    /// Offset of the embedded data section (directly after the tree)
    #[must_use]
    pub fn data_offset(&self) -> u64 {
        self.size() + u64::from(self.tree_size)
    }
}

/// A file stored in a VPK archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpkEntry {
    /// Full path inside the archive (lowercase, forward slashes)
    pub path: String,
    /// CRC32 of the complete file contents
    pub crc: u32,
    /// Bytes stored inline in the directory tree
    #[serde(skip)]
    pub preload: Vec<u8>,
    /// Which part holds the data (`0x7FFF` = the directory file)
    pub archive_index: u16,
    /// Offset of the data within its part
    pub offset: u32,
    /// Length of the data in its part (excluding preload)
    pub length: u32,
}

impl VpkEntry {
    /// Total size of the file once preload and part data are joined
    #[must_use]
    pub fn size(&self) -> u64 {
        self.preload.len() as u64 + u64::from(self.length)
    }

    /// Whether the data lives in the directory file
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.archive_index == DIR_ARCHIVE_INDEX
    }
}

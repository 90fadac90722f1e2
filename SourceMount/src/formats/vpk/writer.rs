//! VPK directory file writer
//!
//! Writes single-file bundles: every entry's data is stored in the
//! directory file itself after the tree.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use walkdir::WalkDir;

use super::{DIR_ARCHIVE_INDEX, ENTRY_TERMINATOR, MAGIC, MAX_VERSION};
use crate::error::{Error, Result};
use crate::utils::path::{normalize_path, relative_path};

/// File waiting to be written, grouped by extension and directory
struct PendingFile {
    name: String,
    data: Vec<u8>,
}

/// VPK directory file writer
pub struct VpkWriter {
    /// extension → directory → files
    tree: BTreeMap<String, BTreeMap<String, Vec<PendingFile>>>,
    /// VPK version to write
    version: u32,
}

impl Default for VpkWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VpkWriter {
    /// Create an empty writer
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
            version: MAX_VERSION,
        }
    }

    /// Create a writer holding every file below `root`
    pub fn from_directory<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let mut writer = Self::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || entry.file_name() == ".DS_Store" {
                continue;
            }

            let relative = relative_path(entry.path(), root)
                .ok_or_else(|| Error::InvalidPath(entry.path().display().to_string()))?;
            let data = std::fs::read(entry.path())?;
            writer = writer.add_file(&relative, data);
        }

        Ok(writer)
    }

    /// Set the VPK version to write
    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Queue a file for writing under the given archive path
    #[must_use]
    pub fn add_file(mut self, path: &str, data: Vec<u8>) -> Self {
        let path = normalize_path(path);
        let (directory, file_name) = match path.rsplit_once('/') {
            Some((dir, name)) => (dir.to_string(), name.to_string()),
            None => (" ".to_string(), path.clone()),
        };
        let (name, extension) = match file_name.rsplit_once('.') {
            Some((name, ext)) if !name.is_empty() => (name.to_string(), ext.to_string()),
            _ => (file_name, " ".to_string()),
        };

        self.tree
            .entry(extension)
            .or_default()
            .entry(directory)
            .or_default()
            .push(PendingFile { name, data });
        self
    }

    /// Number of queued files
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Whether no files are queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the directory file
    pub fn write<P: AsRef<Path>>(self, output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut tree = Vec::new();
        let mut data = Vec::new();

        for (extension, directories) in &self.tree {
            write_cstring(&mut tree, extension)?;
            for (directory, files) in directories {
                write_cstring(&mut tree, directory)?;
                for file in files {
                    write_cstring(&mut tree, &file.name)?;
                    let offset = u32::try_from(data.len()).map_err(|_| {
                        Error::InvalidPath(format!("archive data exceeds 4 GiB at {}", file.name))
                    })?;
                    tree.write_u32::<LittleEndian>(crc32fast::hash(&file.data))?;
                    tree.write_u16::<LittleEndian>(0)?; // preload bytes
                    tree.write_u16::<LittleEndian>(DIR_ARCHIVE_INDEX)?;
                    tree.write_u32::<LittleEndian>(offset)?;
                    tree.write_u32::<LittleEndian>(file.data.len() as u32)?;
                    tree.write_u16::<LittleEndian>(ENTRY_TERMINATOR)?;
                    data.extend_from_slice(&file.data);
                }
                tree.push(0);
            }
            tree.push(0);
        }
        tree.push(0);

        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(output_path)?;
        let mut output = BufWriter::new(file);

        output.write_u32::<LittleEndian>(MAGIC)?;
        output.write_u32::<LittleEndian>(self.version)?;
        output.write_u32::<LittleEndian>(tree.len() as u32)?;
        if self.version >= 2 {
            output.write_u32::<LittleEndian>(data.len() as u32)?;
            output.write_u32::<LittleEndian>(0)?; // archive MD5 section
            output.write_u32::<LittleEndian>(0)?; // other MD5 section
            output.write_u32::<LittleEndian>(0)?; // signature section
        }
        output.write_all(&tree)?;
        output.write_all(&data)?;
        output.flush()?;

        tracing::debug!(
            "Wrote VPK {} ({} bytes of data)",
            output_path.display(),
            data.len()
        );

        Ok(())
    }
}

fn write_cstring(buffer: &mut Vec<u8>, value: &str) -> Result<()> {
    buffer.write_all(value.as_bytes())?;
    buffer.push(0);
    Ok(())
}

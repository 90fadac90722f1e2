//! VPK directory file reader

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use indexmap::IndexMap;

use super::{
    ENTRY_TERMINATOR, MAGIC, MAX_VERSION, MIN_VERSION, VpkEntry, VpkHeader,
    part_path,
};
use crate::error::{Error, Result};
use crate::utils::path::normalize_path;

/// An opened VPK bundle: header plus the parsed directory tree.
///
/// File handles are not kept open; each read opens the part it needs, so an
/// archive can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct VpkArchive {
    path: PathBuf,
    header: VpkHeader,
    entries: IndexMap<String, VpkEntry>,
}

impl VpkArchive {
    /// Open a `_dir.vpk` index file and parse its directory tree
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVpkMagic`] or [`Error::UnsupportedVpkVersion`] if
    /// the header is wrong, [`Error::InvalidVpk`] if the tree is malformed or
    /// truncated, and [`Error::Io`] if the file cannot be read at all.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let header = read_header(&mut reader, path)?;

        if header.data_offset() > file_len {
            return Err(invalid(
                path,
                format!(
                    "directory tree of {} bytes exceeds file size {file_len}",
                    header.tree_size
                ),
            ));
        }

        let mut tree = vec![0u8; header.tree_size as usize];
        reader
            .read_exact(&mut tree)
            .map_err(|e| truncated(e, path, "directory tree"))?;

        let entries = parse_tree(&tree, path)?;

        tracing::debug!(
            "Opened VPK {} (v{}, {} entries)",
            path.display(),
            header.version,
            entries.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            header,
            entries,
        })
    }

    /// Path of the index file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed header
    #[must_use]
    pub fn header(&self) -> &VpkHeader {
        &self.header
    }

    /// All entries in tree order
    pub fn entries(&self) -> impl Iterator<Item = &VpkEntry> {
        self.entries.values()
    }

    /// Number of files in the archive
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive holds no files
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by path (case-insensitive, either slash style)
    #[must_use]
    pub fn entry(&self, path: &str) -> Option<&VpkEntry> {
        self.entries.get(&normalize_path(path))
    }

    /// Whether the archive contains a file
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entry(path).is_some()
    }

    /// Read a file's full contents
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFoundInVpk`] if the path is not in the tree,
    /// plus any error from [`VpkArchive::read_entry`].
    pub fn read(&self, path: &str, verify_crc: bool) -> Result<Vec<u8>> {
        let entry = self
            .entry(path)
            .ok_or_else(|| Error::FileNotFoundInVpk(path.to_string()))?;
        self.read_entry(entry, verify_crc)
    }

    /// Read the contents of an entry: preload bytes followed by part data
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArchivePartMissing`] if the part file is absent,
    /// [`Error::InvalidVpk`] if the entry runs past the end of its file,
    /// [`Error::VpkCrcMismatch`] if verification fails, or [`Error::Io`].
    pub fn read_entry(&self, entry: &VpkEntry, verify_crc: bool) -> Result<Vec<u8>> {
        let mut data = entry.preload.clone();

        if entry.length > 0 {
            let (source, offset) = if entry.is_embedded() {
                (
                    self.path.clone(),
                    self.header.data_offset() + u64::from(entry.offset),
                )
            } else {
                (
                    part_path(&self.path, entry.archive_index),
                    u64::from(entry.offset),
                )
            };

            if !source.exists() {
                return Err(Error::ArchivePartMissing { path: source });
            }

            let mut file = File::open(&source)?;
            let source_len = file.metadata()?.len();
            let end = offset + u64::from(entry.length);
            if end > source_len {
                return Err(invalid(
                    &source,
                    format!(
                        "entry {} spans bytes {offset}..{end} but the file is {source_len} bytes",
                        entry.path
                    ),
                ));
            }

            file.seek(SeekFrom::Start(offset))?;
            let start = data.len();
            data.resize(start + entry.length as usize, 0);
            file.read_exact(&mut data[start..])?;
        }

        if verify_crc {
            let actual = crc32fast::hash(&data);
            if actual != entry.crc {
                return Err(Error::VpkCrcMismatch {
                    path: entry.path.clone(),
                    expected: entry.crc,
                    actual,
                });
            }
        }

        Ok(data)
    }
}

fn invalid(path: &Path, message: impl Into<String>) -> Error {
    Error::InvalidVpk {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Running out of bytes inside the header or tree is a format problem, not
/// an environment one.
fn truncated(err: io::Error, path: &Path, what: &str) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        invalid(path, format!("truncated {what}"))
    } else {
        Error::Io(err)
    }
}

fn read_header<R: Read>(reader: &mut R, path: &Path) -> Result<VpkHeader> {
    let magic = reader
        .read_u32::<LittleEndian>()
        .map_err(|e| truncated(e, path, "header"))?;
    if magic != MAGIC {
        return Err(Error::InvalidVpkMagic { found: magic });
    }

    let version = reader
        .read_u32::<LittleEndian>()
        .map_err(|e| truncated(e, path, "header"))?;
    if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
        return Err(Error::UnsupportedVpkVersion { version });
    }

    let mut fields = [0u32; 5];
    let count = if version >= 2 { 5 } else { 1 };
    for field in fields.iter_mut().take(count) {
        *field = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| truncated(e, path, "header"))?;
    }

    Ok(VpkHeader {
        version,
        tree_size: fields[0],
        file_data_section_size: fields[1],
        archive_md5_section_size: fields[2],
        other_md5_section_size: fields[3],
        signature_section_size: fields[4],
    })
}

/// Parse the three-level tree: extension → directory → file name.
fn parse_tree(tree: &[u8], path: &Path) -> Result<IndexMap<String, VpkEntry>> {
    let mut cursor = Cursor::new(tree);
    let mut entries = IndexMap::new();

    loop {
        let extension = read_cstring(&mut cursor, path)?;
        if extension.is_empty() {
            break;
        }

        loop {
            let directory = read_cstring(&mut cursor, path)?;
            if directory.is_empty() {
                break;
            }

            loop {
                let name = read_cstring(&mut cursor, path)?;
                if name.is_empty() {
                    break;
                }

                let full_path = join_entry_path(&directory, &name, &extension);
                let entry = read_entry_record(&mut cursor, path, full_path)?;
                entries.insert(entry.path.clone(), entry);
            }
        }
    }

    Ok(entries)
}

fn read_entry_record(
    cursor: &mut Cursor<&[u8]>,
    path: &Path,
    entry_path: String,
) -> Result<VpkEntry> {
    let eof = |e: io::Error| truncated(e, path, "entry record");

    let crc = cursor.read_u32::<LittleEndian>().map_err(eof)?;
    let preload_len = cursor.read_u16::<LittleEndian>().map_err(eof)?;
    let archive_index = cursor.read_u16::<LittleEndian>().map_err(eof)?;
    let offset = cursor.read_u32::<LittleEndian>().map_err(eof)?;
    let length = cursor.read_u32::<LittleEndian>().map_err(eof)?;
    let terminator = cursor.read_u16::<LittleEndian>().map_err(eof)?;

    if terminator != ENTRY_TERMINATOR {
        return Err(invalid(
            path,
            format!("bad terminator {terminator:#06x} after entry {entry_path}"),
        ));
    }

    let mut preload = vec![0u8; preload_len as usize];
    cursor.read_exact(&mut preload).map_err(eof)?;

    Ok(VpkEntry {
        path: entry_path,
        crc,
        preload,
        archive_index,
        offset,
        length,
    })
}

fn read_cstring(cursor: &mut Cursor<&[u8]>, path: &Path) -> Result<String> {
    let mut bytes = Vec::new();
    loop {
        let byte = cursor
            .read_u8()
            .map_err(|e| truncated(e, path, "directory tree string"))?;
        if byte == 0 {
            break;
        }
        bytes.push(byte);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `" "` stands for "no directory" / "no extension" in the tree.
fn join_entry_path(directory: &str, name: &str, extension: &str) -> String {
    let mut full = String::new();
    if directory != " " {
        full.push_str(directory);
        full.push('/');
    }
    full.push_str(name);
    if extension != " " {
        full.push('.');
        full.push_str(extension);
    }
    normalize_path(full)
}

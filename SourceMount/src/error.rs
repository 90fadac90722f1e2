//! Error types for `SourceMount`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `SourceMount` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== VPK Archive Errors ====================
    /// The file is not a VPK directory file (wrong signature).
    #[error("invalid VPK magic: expected 0x55AA1234, found {found:#010X}")]
    InvalidVpkMagic {
        /// The signature read from the file header.
        found: u32,
    },

    /// The VPK version is not supported.
    #[error("unsupported VPK version: {version} (supported: 1-2)")]
    UnsupportedVpkVersion {
        /// The version number found in the file.
        version: u32,
    },

    /// The VPK header or directory tree is malformed or truncated.
    #[error("invalid VPK {path}: {message}")]
    InvalidVpk {
        /// The archive being read.
        path: PathBuf,
        /// Description of what is invalid.
        message: String,
    },

    /// The requested file is not in the VPK directory tree.
    #[error("file not found in VPK: {0}")]
    FileNotFoundInVpk(String),

    /// Entry data did not match the CRC32 stored in the directory tree.
    #[error("CRC mismatch for {path}: expected {expected:#010x}, got {actual:#010x}")]
    VpkCrcMismatch {
        /// Path of the entry inside the archive.
        path: String,
        /// CRC stored in the tree.
        expected: u32,
        /// CRC of the data actually read.
        actual: u32,
    },

    /// A multi-part archive part file does not exist on disk.
    #[error("archive part file not found: {path}")]
    ArchivePartMissing {
        /// The expected path to the archive part.
        path: PathBuf,
    },

    // ==================== Manifest Errors ====================
    /// Syntax error in a `KeyValues` text document.
    #[error("KeyValues syntax error at line {line}: {message}")]
    KeyValuesSyntax {
        /// 1-based line number where the problem was detected.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// A `gameinfo.txt` exists but could not be understood.
    #[error("failed to parse manifest {path}: {message}")]
    ManifestParse {
        /// The manifest file.
        path: PathBuf,
        /// The underlying parse error.
        message: String,
    },

    // ==================== Configuration Errors ====================
    /// The resolver configuration file is invalid.
    #[error("invalid config {path}: {message}")]
    InvalidConfig {
        /// The config file.
        path: PathBuf,
        /// The TOML error message.
        message: String,
    },

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error that carries no underlying IO error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl Error {
    /// Whether this error means "the archive is not a valid VPK".
    ///
    /// The resolver skips archives failing with one of these and keeps
    /// scanning; every other error propagates.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidVpkMagic { .. }
                | Error::UnsupportedVpkVersion { .. }
                | Error::InvalidVpk { .. }
        )
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let message = err.to_string();
        match err.into_io_error() {
            Some(io) => Error::Io(io),
            None => Error::WalkDirError(message),
        }
    }
}

/// A specialized Result type for `SourceMount` operations.
pub type Result<T> = std::result::Result<T, Error>;

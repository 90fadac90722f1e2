//! Resolution of `SearchPaths` values to paths on disk

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;
use crate::formats::vpk;

/// Expands to the directory containing `gameinfo.txt`
pub const GAMEINFO_PATH: &str = "|gameinfo_path|";

/// Expands to the engine root (parent of the game directory)
pub const ALL_SOURCE_ENGINE_PATHS: &str = "|all_source_engine_paths|";

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &value[prefix.len()..])
}

/// Drop `.` components so `|gameinfo_path|.` is the directory itself
fn clean(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Resolve one `SearchPaths` value to zero or more existing paths
///
/// - `|gameinfo_path|rest` → `manifest_dir/rest`
/// - `|all_source_engine_paths|rest` → `engine_root/rest`
/// - any other `|marker|` → nothing
/// - relative → `engine_root/value`, absolute → as is
/// - `dir/*` → sorted subdirectories and `*_dir.vpk` files of `dir`
///   (nothing when `expand_wildcards` is off)
/// - `*.vpk` → the `_dir` index file, unless a directory has that name
///
/// Paths that do not exist are dropped.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if a wildcard directory exists but cannot be listed.
pub fn resolve_search_path(
    value: &str,
    manifest_dir: &Path,
    engine_root: &Path,
    expand_wildcards: bool,
) -> Result<Vec<PathBuf>> {
    let value = value.trim().replace('\\', "/");

    let candidate = if let Some(rest) = strip_prefix_ignore_case(&value, GAMEINFO_PATH) {
        manifest_dir.join(rest.trim_start_matches('/'))
    } else if let Some(rest) = strip_prefix_ignore_case(&value, ALL_SOURCE_ENGINE_PATHS) {
        engine_root.join(rest.trim_start_matches('/'))
    } else if value.starts_with('|') {
        tracing::debug!("Unknown search path marker in {:?}", value);
        return Ok(Vec::new());
    } else if Path::new(&value).is_absolute() {
        PathBuf::from(&value)
    } else {
        engine_root.join(&value)
    };
    let candidate = clean(&candidate);

    if candidate.file_name().is_some_and(|n| n == "*") {
        let Some(parent) = candidate.parent() else {
            return Ok(Vec::new());
        };
        return if expand_wildcards {
            expand_wildcard(parent)
        } else {
            Ok(Vec::new())
        };
    }

    if candidate.is_dir() {
        return Ok(vec![candidate]);
    }

    if candidate
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(vpk::EXTENSION))
    {
        let index = vpk::normalize_index_path(&candidate);
        return Ok(if index.is_file() { vec![index] } else { Vec::new() });
    }

    Ok(Vec::new())
}

fn expand_wildcard(parent: &Path) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let is_index = path.is_file()
            && vpk::is_index_file_name(&entry.file_name().to_string_lossy());
        if path.is_dir() || is_index {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

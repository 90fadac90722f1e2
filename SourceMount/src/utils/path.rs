//! Path utilities

use std::path::{Path, PathBuf};

/// Normalize a content path for lookups: forward slashes, lowercase, no
/// leading `./` or `/`
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    let normalized = path.as_ref().to_string_lossy().replace('\\', "/").to_lowercase();
    let mut trimmed = normalized.as_str();
    loop {
        if let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            trimmed = rest;
        } else {
            break;
        }
    }
    trimmed.to_string()
}

/// Get relative path and normalize separators
pub fn relative_path<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
}

/// Final segment of a path as an owned string (empty for `/` or `..`)
#[must_use]
pub fn final_segment(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Expand a leading `~` to the home directory
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("Materials\\Dev\\dev_01.VMT"), "materials/dev/dev_01.vmt");
        assert_eq!(normalize_path("./scripts/game.txt"), "scripts/game.txt");
        assert_eq!(normalize_path("/models/a.mdl"), "models/a.mdl");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/g/hl2/materials/a.vmt"), Path::new("/g/hl2")),
            Some("materials/a.vmt".to_string())
        );
        assert_eq!(relative_path(Path::new("/other"), Path::new("/g")), None);
    }

    #[test]
    fn test_final_segment() {
        assert_eq!(final_segment(Path::new("/g/hl2")), "hl2");
        assert_eq!(final_segment(Path::new("/g/hl2/")), "hl2");
        assert_eq!(final_segment(Path::new("/")), "");
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/g/hl2"), PathBuf::from("/g/hl2"));
    }
}

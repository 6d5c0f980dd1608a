//! File system utilities.

use crate::Result;
use std::path::Path;

const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "wmv", "m4v", "ts", "m2ts", "flv", "webm", "mpg", "mpeg", "3gp",
    "ogv", "vob", "divx",
];

/// Check that a path exists and is a regular file.
pub fn ensure_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(crate::Error::InvalidPath(path.display().to_string()));
    }
    Ok(())
}

/// Rename a file in place, refusing to overwrite another file.
///
/// A target that resolves to the source itself (a case-only rename on a
/// case-insensitive filesystem) is not treated as a conflict.
pub fn rename_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() && !is_same_file(from, to) {
        return Err(crate::Error::FileAlreadyExists(to.display().to_string()));
    }
    std::fs::rename(from, to)?;
    Ok(())
}

/// Check whether two paths name the same file on disk.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    if let (Ok(ca), Ok(cb)) = (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        if ca == cb {
            return true;
        }
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let (Ok(ma), Ok(mb)) = (std::fs::metadata(a), std::fs::metadata(b)) {
            return ma.dev() == mb.dev() && ma.ino() == mb.ino();
        }
    }

    false
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Get the original extension including the leading dot, or an empty string.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// Check if a file is a video file based on extension.
pub fn is_video_file(path: &Path) -> bool {
    get_extension(path)
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Check if a file is an `.nfo` sidecar.
pub fn is_sidecar_file(path: &Path) -> bool {
    get_extension(path).as_deref() == Some("nfo")
}

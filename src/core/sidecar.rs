//! Sidecar identity extraction.
//!
//! Scans the `.nfo` files next to a media file for an IMDb title URL.

use crate::utils::fs::is_sidecar_file;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

static IMDB_URL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:www\.)?imdb\.(?:com|de)/(?:[a-z]{2}/)?title/(tt\d+)").ok()
});

/// Find the first IMDb identifier in `content`, lowercased.
pub fn find_imdb_id(content: &str) -> Option<String> {
    IMDB_URL
        .as_ref()?
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Find an IMDb identifier in the sidecar files of `file`'s directory.
///
/// Sidecars are visited in directory-listing order; the first match wins.
/// Unreadable sidecars are skipped.
pub fn find_sidecar_id(file: &Path) -> Option<String> {
    let directory = match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_sidecar_file(path) {
            continue;
        }

        tracing::debug!("Parsing .nfo file <{}>", path.display());
        let content = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Cannot read <{}>: {}", path.display(), e);
                continue;
            }
        };

        if let Some(id) = find_imdb_id(&String::from_utf8_lossy(&content)) {
            tracing::debug!("imdbID: {}", id);
            return Some(id);
        }
    }

    tracing::debug!("No imdbID found");
    None
}

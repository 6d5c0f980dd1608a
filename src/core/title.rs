//! Title extraction from file paths.
//!
//! Every path segment is scored by its informational value: segments closer
//! to the file name and segments with more tokens are more likely to carry the
//! full title. The best segment is stripped of release artifacts and cut at
//! the season/episode marker or the release year.

use super::episode::find_leftmost_marker;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_SEPARATOR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[ _.\-]").ok());

static RE_ARTIFACTS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)[()\[\]]",
        r"|(?:720|1080|2160)p?",
        r"|director[´'`]?s cut",
        r"|[xh]26[45]",
        r"|bluray|dubbed|repack|extended|unrated|uncut|remastered",
        r"|dl|a[av]c|ac3d?|dts|dsnp|amzn",
    ))
    .ok()
});

static RE_SPACES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r" +").ok());

/// A path segment with its tokenized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Position in the path, 0 being the root-most segment.
    pub index: usize,
    /// Tokens joined by single spaces.
    pub text: String,
    /// Number of tokens after splitting on separators.
    pub tokens: usize,
}

impl PathSegment {
    fn new(index: usize, raw: &str) -> Self {
        let words: Vec<&str> = match RE_SEPARATOR.as_ref() {
            Some(re) => re.split(raw).collect(),
            None => vec![raw],
        };
        Self {
            index,
            text: words.join(" "),
            tokens: words.len(),
        }
    }

    /// Score in tenths, so that equal values compare exactly.
    fn score_tenths(&self) -> usize {
        self.index * 10 + self.tokens * 3
    }

    /// Informational value: `index + 0.3 * tokens`.
    pub fn informational_value(&self) -> f64 {
        self.score_tenths() as f64 / 10.0
    }
}

/// Strip the extension and make the path absolute.
///
/// The parent directory is canonicalized when it exists; otherwise the path
/// is only made absolute.
pub fn resolve_path(path: &Path) -> PathBuf {
    let stripped = path.with_extension("");

    let canonical_parent = stripped
        .parent()
        .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
        .and_then(|p| std::fs::canonicalize(p).ok());

    match (canonical_parent, stripped.file_name()) {
        (Some(parent), Some(name)) => parent.join(name),
        _ => std::path::absolute(&stripped).unwrap_or(stripped),
    }
}

/// Split a path into scored segments.
pub fn path_segments(path: &Path) -> Vec<PathSegment> {
    path.components()
        .enumerate()
        .map(|(index, component)| {
            let segment = PathSegment::new(index, &component.as_os_str().to_string_lossy());
            tracing::debug!(
                "Path chunk <{}> has an informational value of: {:.1}",
                segment.text,
                segment.informational_value()
            );
            segment
        })
        .collect()
}

/// Pick the segment with the highest score; the shallower one wins ties.
pub fn select_segment(segments: &[PathSegment]) -> Option<&PathSegment> {
    segments.iter().fold(None, |best: Option<&PathSegment>, segment| match best {
        Some(b) if b.score_tenths() >= segment.score_tenths() => Some(b),
        _ => Some(segment),
    })
}

/// Remove release artifacts (brackets, resolution, codec and source tags).
pub fn strip_artifacts(text: &str) -> String {
    let mut result = text.to_string();
    if let Some(re) = RE_ARTIFACTS.as_ref() {
        result = re.replace_all(&result, "").into_owned();
    }
    if let Some(re) = RE_SPACES.as_ref() {
        result = re.replace_all(&result, " ").into_owned();
    }
    result
}

/// Cut the title at the first season/episode marker, or else before the
/// rightmost occurrence of the known year.
pub fn truncate_title(text: &str, year: Option<&str>) -> String {
    if let Some(marker) = find_leftmost_marker(text) {
        return text[..marker.start].trim().to_string();
    }

    if let Some(year) = year.filter(|y| !y.is_empty()) {
        if let Some(pos) = text.rfind(year) {
            let leading = text[..pos].trim();
            if !leading.is_empty() {
                return leading.to_string();
            }
        }
    }

    text.trim().to_string()
}

/// Extract a clean title from a file path.
pub fn extract_title(path: &Path, year: Option<&str>) -> String {
    let resolved = resolve_path(path);
    tracing::debug!("Full path: <{}>", resolved.display());

    let segments = path_segments(&resolved);
    let Some(segment) = select_segment(&segments) else {
        return String::new();
    };
    tracing::debug!("Path chunk <{}> will be used for title parsing", segment.text);

    let cleaned = strip_artifacts(&segment.text);
    tracing::debug!("Sanitized title string: <{}>", cleaned);

    let title = truncate_title(&cleaned, year);
    tracing::debug!("title: {}", title);
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(index: usize, raw: &str) -> PathSegment {
        PathSegment::new(index, raw)
    }

    #[test]
    fn test_segment_tokens() {
        let s = segment(3, "The.Matrix_1999-x264 final");
        assert_eq!(s.text, "The Matrix 1999 x264 final");
        assert_eq!(s.tokens, 5);
        assert!((s.informational_value() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_deeper_segment_wins() {
        let segments = vec![segment(0, "/"), segment(1, "Movies"), segment(2, "The.Matrix.1999")];
        assert_eq!(select_segment(&segments).map(|s| s.index), Some(2));
    }

    #[test]
    fn test_token_rich_parent_wins() {
        let segments = vec![
            segment(0, "The.Lord.of.the.Rings.The.Fellowship.of.the.Ring.2001"),
            segment(1, "cd1"),
        ];
        assert_eq!(select_segment(&segments).map(|s| s.index), Some(0));
    }

    #[test]
    fn test_tie_prefers_shallower_segment() {
        // 0 + 0.3 * 11 == 3 + 0.3 * 1 == 3.3
        let segments = vec![
            segment(0, "a b c d e f g h i j k"),
            segment(1, "x"),
            segment(2, "y"),
            segment(3, "z"),
        ];
        assert_eq!(select_segment(&segments).map(|s| s.index), Some(0));
    }

    #[test]
    fn test_strip_artifacts() {
        assert_eq!(
            strip_artifacts("The Matrix 1999 1080p BluRay x264"),
            "The Matrix 1999 "
        );
        assert_eq!(
            strip_artifacts("Blade Runner [Director's Cut] 1982 2160p DTS"),
            "Blade Runner 1982 "
        );
        assert_eq!(strip_artifacts("Movie 2010 REPACK H265 AC3D"), "Movie 2010 ");
    }

    #[test]
    fn test_truncate_at_episode_marker() {
        assert_eq!(truncate_title("Show Name S02E05 ", None), "Show Name");
        assert_eq!(truncate_title("Show Name 3x07 Title", Some("2019")), "Show Name");
    }

    #[test]
    fn test_truncate_at_rightmost_year() {
        assert_eq!(truncate_title("Blade Runner 2049 2017 ", Some("2017")), "Blade Runner 2049");
        assert_eq!(truncate_title("The Matrix 1999 ", Some("1999")), "The Matrix");
        assert_eq!(truncate_title("Title Only ", Some("1999")), "Title Only");
    }

    #[test]
    fn test_year_only_title_is_kept() {
        assert_eq!(truncate_title("2012 ", Some("2012")), "2012");
    }

    #[test]
    fn test_extract_title_from_absolute_path() {
        let title = extract_title(
            Path::new("/library/movies/The.Matrix.1999.1080p.BluRay.x264.mkv"),
            Some("1999"),
        );
        assert_eq!(title, "The Matrix");
    }
}

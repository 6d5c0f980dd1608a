//! Season/episode extraction.

use regex::Regex;
use std::sync::LazyLock;

// S01E02, s1e3
static RE_SXXEXX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)s(\d{1,2})e(\d{1,2})").ok());

// 1x02, not part of a resolution like 1920x1080
static RE_NXM: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\D)(\d{1,2})x(\d{1,2})(?:\D|$)").ok());

/// A season/episode marker located in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeMarker {
    /// Byte offset where the marker starts.
    pub start: usize,
    pub season: u32,
    pub episode: u32,
}

fn parse_marker(re: &Regex, text: &str, whole_match: bool) -> Option<EpisodeMarker> {
    let caps = re.captures(text)?;
    let season = caps.get(1)?;
    let episode = caps.get(2)?;
    let start = if whole_match {
        caps.get(0)?.start()
    } else {
        season.start()
    };
    Some(EpisodeMarker {
        start,
        season: season.as_str().parse().ok()?,
        episode: episode.as_str().parse().ok()?,
    })
}

fn sxxexx_marker(text: &str) -> Option<EpisodeMarker> {
    parse_marker(RE_SXXEXX.as_ref()?, text, true)
}

fn nxm_marker(text: &str) -> Option<EpisodeMarker> {
    parse_marker(RE_NXM.as_ref()?, text, false)
}

/// Find the first `SxxEyy` marker, falling back to the first `NxM` marker.
pub fn find_marker(text: &str) -> Option<EpisodeMarker> {
    sxxexx_marker(text).or_else(|| nxm_marker(text))
}

/// Find whichever marker occurs first in `text`.
pub fn find_leftmost_marker(text: &str) -> Option<EpisodeMarker> {
    match (sxxexx_marker(text), nxm_marker(text)) {
        (Some(a), Some(b)) => Some(if b.start < a.start { b } else { a }),
        (a, b) => a.or(b),
    }
}

/// Extract season and episode numbers from a file name.
///
/// `offset` is added to the parsed episode number, saturating at the `i32`
/// bounds. Returns `(None, None)` when no marker is present.
pub fn extract_episode(filename: &str, offset: i32) -> (Option<u32>, Option<i32>) {
    match find_marker(filename) {
        Some(marker) => {
            let episode = (marker.episode as i32).saturating_add(offset);
            tracing::debug!("season: {}, episode: {}", marker.season, episode);
            (Some(marker.season), Some(episode))
        }
        None => {
            tracing::debug!("No season or episode found");
            (None, None)
        }
    }
}

//! Cross-file batch cache.
//!
//! Consecutive files of the same series and season share their metadata and
//! episode list, so only the first of them needs provider calls.

use crate::models::media::{EpisodeEntry, Metadata};

/// Resolved state of the previously processed file.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub title: String,
    pub season: Option<u32>,
    pub metadata: Metadata,
    pub episodes: Option<Vec<EpisodeEntry>>,
}

/// Single-slot cache holding the last resolved file.
#[derive(Debug, Default)]
pub struct BatchCache {
    slot: Option<CacheEntry>,
}

impl BatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached entry when it applies to the file at `index`.
    ///
    /// Only series files qualify: the title must match and both seasons must
    /// be present and equal. The first file of a batch never hits.
    pub fn lookup(&self, index: usize, title: &str, season: Option<u32>) -> Option<&CacheEntry> {
        if index == 0 || season.is_none() {
            return None;
        }
        self.slot
            .as_ref()
            .filter(|entry| entry.title == title && entry.season == season)
    }

    /// Overwrite the slot with the current file's state.
    pub fn store(&mut self, entry: CacheEntry) {
        self.slot = Some(entry);
    }

    pub fn current(&self) -> Option<&CacheEntry> {
        self.slot.as_ref()
    }
}

//! Media-related data models.

use serde::Deserialize;

/// Media category, derived from whether a season number was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Movie,
    Series,
}

impl Category {
    /// Derive the category from an optional season number.
    pub fn from_season(season: Option<u32>) -> Self {
        if season.is_some() {
            Category::Series
        } else {
            Category::Movie
        }
    }

    /// Value used by the provider's `type` search parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Series => "series",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity information parsed from a single file's path and sidecars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInfo {
    /// IMDb identifier found in a sidecar file.
    pub sidecar_id: Option<String>,
    /// Release year found in the path.
    pub year: Option<String>,
    /// Cleaned title.
    pub title: String,
    /// Season number (series only).
    pub season: Option<u32>,
    /// Episode number with offset applied (series only).
    pub episode: Option<i32>,
}

impl ParsedInfo {
    pub fn category(&self) -> Category {
        Category::from_season(self.season)
    }
}

/// A single provider search result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchMatch {
    /// IMDb identifier (e.g. "tt0133093").
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
}

impl std::fmt::Display for SearchMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.year)
    }
}

/// Opaque metadata returned by the provider for a resolved identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata(serde_json::Map<String, serde_json::Value>);

impl Metadata {
    pub fn new(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(fields)
    }

    /// Look up a string field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.get("Title")
    }

    pub fn year(&self) -> Option<&str> {
        self.get("Year")
    }

    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.0.remove(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
                .collect(),
        )
    }
}

/// A real episode record from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    /// Episode number within the season.
    pub episode: u32,
    /// Episode title.
    pub title: String,
    /// IMDb identifier of the episode.
    pub imdb_id: Option<String>,
    /// Release date as reported by the provider.
    pub released: Option<String>,
}

impl EpisodeRecord {
    pub fn new(episode: u32, title: impl Into<String>) -> Self {
        Self {
            episode,
            title: title.into(),
            imdb_id: None,
            released: None,
        }
    }
}

/// Entry of a season's episode list.
///
/// Position `i` of a list always holds episode `i + 1`; missing episode
/// numbers are represented by `Placeholder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeEntry {
    Episode(EpisodeRecord),
    Placeholder,
}

impl EpisodeEntry {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, EpisodeEntry::Placeholder)
    }

    pub fn record(&self) -> Option<&EpisodeRecord> {
        match self {
            EpisodeEntry::Episode(record) => Some(record),
            EpisodeEntry::Placeholder => None,
        }
    }
}

/// Close gaps in a provider episode list.
///
/// Records are placed at position `episode - 1`; a placeholder is inserted for
/// every skipped episode number and replaced if the record arrives later.
/// Records numbered 0 or already covered by an earlier record are dropped.
pub fn fill_episode_gaps(records: Vec<EpisodeRecord>) -> Vec<EpisodeEntry> {
    let mut entries = Vec::with_capacity(records.len());

    for record in records {
        let number = record.episode as usize;
        if number == 0 {
            tracing::debug!("Dropping episode 0 <{}>", record.title);
            continue;
        }
        while entries.len() < number {
            entries.push(EpisodeEntry::Placeholder);
        }
        let slot = &mut entries[number - 1];
        if slot.is_placeholder() {
            *slot = EpisodeEntry::Episode(record);
        } else {
            tracing::debug!(
                "Dropping episode {} <{}>: position already taken",
                record.episode,
                record.title
            );
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_season() {
        assert_eq!(Category::from_season(Some(1)), Category::Series);
        assert_eq!(Category::from_season(None), Category::Movie);
        assert_eq!(Category::Series.to_string(), "series");
    }

    #[test]
    fn test_fill_gaps_missing_two_and_four() {
        let records = vec![
            EpisodeRecord::new(1, "One"),
            EpisodeRecord::new(3, "Three"),
            EpisodeRecord::new(5, "Five"),
        ];
        let entries = fill_episode_gaps(records);

        assert_eq!(entries.len(), 5);
        assert!(entries[1].is_placeholder());
        assert!(entries[3].is_placeholder());
        for (i, entry) in entries.iter().enumerate() {
            if let Some(record) = entry.record() {
                assert_eq!(record.episode as usize, i + 1);
            }
        }
    }

    #[test]
    fn test_fill_gaps_leading_gap() {
        let entries = fill_episode_gaps(vec![EpisodeRecord::new(3, "Three")]);
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_placeholder());
        assert!(entries[1].is_placeholder());
        assert_eq!(entries[2].record().map(|r| r.title.as_str()), Some("Three"));
    }

    #[test]
    fn test_fill_gaps_drops_zero_and_duplicates() {
        let records = vec![
            EpisodeRecord::new(0, "Special"),
            EpisodeRecord::new(1, "One"),
            EpisodeRecord::new(1, "One again"),
            EpisodeRecord::new(2, "Two"),
        ];
        let entries = fill_episode_gaps(records);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].record().map(|r| r.title.as_str()), Some("One"));
        assert_eq!(entries[1].record().map(|r| r.title.as_str()), Some("Two"));
    }

    #[test]
    fn test_fill_gaps_out_of_order() {
        let records = vec![
            EpisodeRecord::new(2, "Two"),
            EpisodeRecord::new(1, "One"),
            EpisodeRecord::new(4, "Four"),
        ];
        let titles: Vec<_> = fill_episode_gaps(records)
            .iter()
            .map(|e| e.record().map(|r| r.title.clone()))
            .collect();

        assert_eq!(
            titles,
            vec![
                Some("One".to_string()),
                Some("Two".to_string()),
                None,
                Some("Four".to_string()),
            ]
        );
    }

    #[test]
    fn test_metadata_accessors() {
        let metadata: Metadata = [("Title", "The Matrix"), ("Year", "1999")]
            .into_iter()
            .collect();
        assert_eq!(metadata.title(), Some("The Matrix"));
        assert_eq!(metadata.year(), Some("1999"));
        assert_eq!(metadata.get("Plot"), None);
    }

    #[test]
    fn test_search_match_display() {
        let m = SearchMatch {
            id: "tt0133093".to_string(),
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
        };
        assert_eq!(m.to_string(), "The Matrix (1999)");
    }
}

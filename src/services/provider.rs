//! Metadata provider abstraction.

use crate::models::media::{Category, EpisodeEntry, Metadata, SearchMatch};
use crate::Result;

/// A metadata provider that can search and fetch metadata by IMDb id.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the metadata of a title.
    async fn fetch_by_id(&self, id: &str) -> Result<Metadata>;

    /// Fetch a season's episode list.
    ///
    /// Position `i` of the returned list holds episode `i + 1`; gaps are
    /// filled with placeholders.
    async fn fetch_episodes(&self, id: &str, season: u32) -> Result<Vec<EpisodeEntry>>;

    /// Search titles of the given category, optionally restricted to a year.
    async fn search_by_title(
        &self,
        title: &str,
        category: Category,
        year: Option<&str>,
    ) -> Result<Vec<SearchMatch>>;
}

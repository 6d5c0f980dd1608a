//! Rename orchestration.
//!
//! Processes files strictly in input order:
//! 1. Validate the path and its video type
//! 2. Parse identity information from the path and sidecars
//! 3. Reuse the batch cache or resolve through the provider
//! 4. Build and sanitize the canonical name
//! 5. Rename in place unless simulating
//!
//! Every failure is confined to the file that caused it.

use super::cache::{BatchCache, CacheEntry};
use super::episode::extract_episode;
use super::selector::{select_match, MatchResolver};
use super::sidecar::find_sidecar_id;
use super::title::extract_title;
use super::year::{current_year, extract_year};
use crate::generators::filename::{episode_filename, movie_filename, sanitize_filename};
use crate::models::media::{Category, EpisodeEntry, EpisodeRecord, Metadata, ParsedInfo};
use crate::services::provider::MetadataProvider;
use crate::utils::fs::{dotted_extension, ensure_file, is_video_file, rename_file};
use crate::Result;
use std::path::{Path, PathBuf};

/// Renamer options.
#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Log the new names without touching the filesystem.
    pub simulate: bool,
    /// Added to every parsed episode number.
    pub offset: i32,
    /// Upper bound for plausible release years.
    pub current_year: u32,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            simulate: false,
            offset: 0,
            current_year: current_year(),
        }
    }
}

/// A file that was (or would have been) renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedFile {
    pub from: PathBuf,
    pub to: PathBuf,
    pub simulated: bool,
}

/// Outcome of a single input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<RenamedFile>,
}

/// Outcomes of a whole batch, in input order.
#[derive(Debug, Default)]
pub struct RenameReport {
    pub outcomes: Vec<FileOutcome>,
}

impl RenameReport {
    pub fn renamed(&self) -> impl Iterator<Item = &RenamedFile> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&Path, &crate::Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.as_path(), e)))
    }
}

/// Parse all identity information available for `path`.
pub fn parse_file(path: &Path, options: &RenameOptions) -> ParsedInfo {
    let sidecar_id = find_sidecar_id(path);
    let year = extract_year(&path.to_string_lossy(), options.current_year);
    let title = extract_title(path, year.as_deref());
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (season, episode) = extract_episode(&filename, options.offset);

    ParsedInfo {
        sidecar_id,
        year,
        title,
        season,
        episode,
    }
}

/// Look up the episode at `episode` (1-based), rejecting gaps.
fn episode_record(episodes: &[EpisodeEntry], season: u32, episode: i32) -> Result<&EpisodeRecord> {
    let missing = || crate::Error::MissingEpisodeData { season, episode };
    if episode < 1 {
        return Err(missing());
    }
    episodes
        .get((episode - 1) as usize)
        .and_then(EpisodeEntry::record)
        .ok_or_else(missing)
}

/// Build the unsanitized target name.
pub fn build_name(
    parsed: &ParsedInfo,
    metadata: &Metadata,
    episodes: Option<&[EpisodeEntry]>,
    extension: &str,
) -> Result<String> {
    let title = metadata
        .title()
        .ok_or_else(|| crate::Error::Provider("metadata has no Title".to_string()))?;

    match (parsed.season, parsed.episode) {
        (Some(season), Some(episode)) => {
            let record = episode_record(episodes.unwrap_or(&[]), season, episode)?;
            Ok(episode_filename(title, season, episode, &record.title, extension))
        }
        _ => {
            let year = metadata
                .year()
                .ok_or_else(|| crate::Error::Provider("metadata has no Year".to_string()))?;
            Ok(movie_filename(title, year, extension))
        }
    }
}

/// Sequential renamer over a batch of files.
pub struct Renamer<P> {
    provider: P,
    resolver: Box<dyn MatchResolver>,
    options: RenameOptions,
    cache: BatchCache,
}

impl<P: MetadataProvider> Renamer<P> {
    pub fn new(provider: P, resolver: Box<dyn MatchResolver>, options: RenameOptions) -> Self {
        Self {
            provider,
            resolver,
            options,
            cache: BatchCache::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn options(&self) -> &RenameOptions {
        &self.options
    }

    /// Process every file in order. Failures are logged and recorded.
    pub async fn run(&mut self, files: &[PathBuf]) -> RenameReport {
        let mut report = RenameReport::default();

        for (index, path) in files.iter().enumerate() {
            tracing::info!("Start processing file: <{}>", display_name(path));

            let result = self.process_file(index, path).await;
            if let Err(ref e) = result {
                match e {
                    crate::Error::InvalidPath(_) | crate::Error::NotAVideo(_) => {
                        tracing::error!("{}", e);
                    }
                    _ => tracing::error!("Renaming skipped for file <{}>: {}", display_name(path), e),
                }
            }

            report.outcomes.push(FileOutcome {
                path: path.clone(),
                result,
            });
        }

        report
    }

    /// Process a single file at position `index` of the batch.
    pub async fn process_file(&mut self, index: usize, path: &Path) -> Result<RenamedFile> {
        ensure_file(path)?;
        if !is_video_file(path) {
            return Err(crate::Error::NotAVideo(path.display().to_string()));
        }

        let parsed = parse_file(path, &self.options);
        let category = parsed.category();
        tracing::debug!("Parsed {:?} as {}", parsed, category);

        let cached = self
            .cache
            .lookup(index, &parsed.title, parsed.season)
            .cloned();
        let (metadata, episodes) = match cached {
            Some(entry) => {
                tracing::debug!("Batch mode");
                (entry.metadata, entry.episodes)
            }
            None => {
                tracing::debug!("Normal mode");
                self.resolve(&parsed, category).await?
            }
        };

        self.cache.store(CacheEntry {
            title: parsed.title.clone(),
            season: parsed.season,
            metadata: metadata.clone(),
            episodes: episodes.clone(),
        });

        let raw = build_name(&parsed, &metadata, episodes.as_deref(), &dotted_extension(path))?;
        tracing::debug!("raw name: <{}>", raw);
        let name = sanitize_filename(&raw);
        tracing::debug!("sanitized name: <{}>", name);

        let target = path.with_file_name(&name);
        tracing::info!("Renaming <{}> to <{}>", display_name(path), name);

        if !self.options.simulate {
            if target == path {
                tracing::debug!("File already has its canonical name");
            } else {
                rename_file(path, &target)?;
            }
        }

        Ok(RenamedFile {
            from: path.to_path_buf(),
            to: target,
            simulated: self.options.simulate,
        })
    }

    /// Resolve metadata (and the season's episodes) through the provider.
    async fn resolve(
        &mut self,
        parsed: &ParsedInfo,
        category: Category,
    ) -> Result<(Metadata, Option<Vec<EpisodeEntry>>)> {
        let id = match &parsed.sidecar_id {
            Some(id) => id.clone(),
            None => {
                tracing::debug!("Search for title and retrieve imdbID");
                self.search(parsed, category).await?
            }
        };

        tracing::debug!("Get metadata for {}", id);
        let metadata = self.provider.fetch_by_id(&id).await?;

        let episodes = match parsed.season {
            Some(season) => {
                tracing::debug!("Get episodes for season {}", season);
                let episodes = self
                    .provider
                    .fetch_episodes(&id, season)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::warn!("No episode list for {} season {}: {}", id, season, e);
                        Vec::new()
                    });
                Some(episodes)
            }
            None => None,
        };

        Ok((metadata, episodes))
    }

    async fn search(&mut self, parsed: &ParsedInfo, category: Category) -> Result<String> {
        let matches = self
            .provider
            .search_by_title(&parsed.title, category, parsed.year.as_deref())
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Search for <{}> failed: {}", parsed.title, e);
                Vec::new()
            });

        select_match(&matches, &parsed.title, self.resolver.as_mut())
            .map(|m| m.id.clone())
            .ok_or_else(|| crate::Error::NoIdentifierResolved(parsed.title.clone()))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(season: Option<u32>, episode: Option<i32>) -> ParsedInfo {
        ParsedInfo {
            title: "Show".to_string(),
            season,
            episode,
            ..Default::default()
        }
    }

    fn episodes() -> Vec<EpisodeEntry> {
        vec![
            EpisodeEntry::Episode(EpisodeRecord::new(1, "Pilot")),
            EpisodeEntry::Placeholder,
            EpisodeEntry::Episode(EpisodeRecord::new(3, "Third: The Return")),
        ]
    }

    #[test]
    fn test_build_movie_name() {
        let metadata: Metadata = [("Title", "The Matrix"), ("Year", "1999")].into_iter().collect();
        let name = build_name(&parsed(None, None), &metadata, None, ".mkv").unwrap();
        assert_eq!(name, "The Matrix (1999).mkv");
    }

    #[test]
    fn test_build_episode_name() {
        let metadata: Metadata = [("Title", "Show")].into_iter().collect();
        let list = episodes();
        let name = build_name(&parsed(Some(1), Some(3)), &metadata, Some(&list), ".mkv").unwrap();
        assert_eq!(name, "Show - S01E03 - Third: The Return.mkv");
    }

    #[test]
    fn test_episode_bounds() {
        let metadata: Metadata = [("Title", "Show")].into_iter().collect();
        let list = episodes();

        for episode in [0, -1, 2, 4, i32::MAX, i32::MIN] {
            let result = build_name(&parsed(Some(1), Some(episode)), &metadata, Some(&list), ".mkv");
            assert!(
                matches!(result, Err(crate::Error::MissingEpisodeData { season: 1, .. })),
                "episode {} should be missing",
                episode
            );
        }
    }

    #[test]
    fn test_missing_metadata_fields() {
        let metadata: Metadata = [("Title", "The Matrix")].into_iter().collect();
        assert!(matches!(
            build_name(&parsed(None, None), &metadata, None, ".mkv"),
            Err(crate::Error::Provider(_))
        ));
        assert!(matches!(
            build_name(&parsed(None, None), &Metadata::default(), None, ".mkv"),
            Err(crate::Error::Provider(_))
        ));
    }
}

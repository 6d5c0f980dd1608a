//! OMDb API client.

use crate::models::config::OmdbConfig;
use crate::models::media::{fill_episode_gaps, Category, EpisodeEntry, EpisodeRecord, Metadata, SearchMatch};
use crate::services::provider::MetadataProvider;
use crate::Result;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Identifier used to verify the API key.
const PROBE_ID: &str = "tt0133093";

/// OMDb API client.
pub struct OmdbClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

/// Season response.
#[derive(Debug, Deserialize)]
struct SeasonResult {
    #[serde(rename = "Episodes", default)]
    episodes: Vec<EpisodeItem>,
}

/// Episode item within a season.
#[derive(Debug, Deserialize)]
struct EpisodeItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Episode")]
    episode: String,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

/// Search response.
#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "Search", default)]
    search: Vec<SearchMatch>,
}

impl OmdbClient {
    /// Create a new client from configuration.
    pub fn new(config: &OmdbConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(crate::Error::ApiKeyMissing)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key,
            client: builder.build()?,
        })
    }

    /// Build a request URL; parameters without a value are omitted.
    fn build_url(&self, params: &[(&str, Option<&str>)]) -> String {
        let mut query: Vec<String> = params
            .iter()
            .filter_map(|(key, value)| {
                value.map(|v| format!("{}={}", key, urlencoding::encode(v)))
            })
            .collect();
        query.push(format!("apikey={}", urlencoding::encode(&self.api_key)));

        format!("{}?{}", self.base_url, query.join("&"))
    }

    /// Send a request and unwrap the OMDb response envelope.
    async fn send_request(&self, url: &str) -> Result<Map<String, Value>> {
        tracing::debug!(
            "Sending API call: {}",
            url.replace(&urlencoding::encode(&self.api_key).into_owned(), "***")
        );

        let body: Value = self.client.get(url).send().await?.json().await?;
        check_response(body)
    }

    /// Verify API key is valid.
    ///
    /// Returns `Error::ApiKeyInvalid` when OMDb rejects the key.
    pub async fn verify_api_key(&self) -> Result<()> {
        let url = self.build_url(&[("i", Some(PROBE_ID))]);
        key_status(self.send_request(&url).await)
    }
}

/// Map the key probe response, turning an API key rejection into `ApiKeyInvalid`.
fn key_status(response: Result<Map<String, Value>>) -> Result<()> {
    match response {
        Ok(_) => Ok(()),
        Err(crate::Error::Provider(msg)) if msg.to_lowercase().contains("api key") => {
            Err(crate::Error::ApiKeyInvalid)
        }
        Err(e) => Err(e),
    }
}

/// Check the `Response` flag and strip it from the body.
fn check_response(body: Value) -> Result<Map<String, Value>> {
    let Value::Object(mut fields) = body else {
        return Err(crate::Error::Provider("unexpected response body".to_string()));
    };

    match fields.remove("Response").as_ref().and_then(Value::as_str) {
        Some("True") => Ok(fields),
        _ => {
            let message = fields
                .get("Error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            tracing::error!("API response: {}", message);
            Err(crate::Error::Provider(message))
        }
    }
}

/// Turn OMDb episode items into a gap-free episode list.
fn episode_entries(items: Vec<EpisodeItem>) -> Vec<EpisodeEntry> {
    let records = items
        .into_iter()
        .filter_map(|item| match item.episode.trim().parse::<u32>() {
            Ok(number) => Some(EpisodeRecord {
                episode: number,
                title: item.title,
                imdb_id: item.imdb_id,
                released: item.released,
            }),
            Err(_) => {
                tracing::debug!("Skipping episode with number <{}>", item.episode);
                None
            }
        })
        .collect();

    fill_episode_gaps(records)
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbClient {
    async fn fetch_by_id(&self, id: &str) -> Result<Metadata> {
        let url = self.build_url(&[("i", Some(id))]);
        let fields = self.send_request(&url).await?;
        Ok(Metadata::new(fields))
    }

    async fn fetch_episodes(&self, id: &str, season: u32) -> Result<Vec<EpisodeEntry>> {
        let season = season.to_string();
        let url = self.build_url(&[("i", Some(id)), ("Season", Some(&season))]);
        let fields = self.send_request(&url).await?;
        let result: SeasonResult = serde_json::from_value(Value::Object(fields))?;
        Ok(episode_entries(result.episodes))
    }

    async fn search_by_title(
        &self,
        title: &str,
        category: Category,
        year: Option<&str>,
    ) -> Result<Vec<SearchMatch>> {
        let url = self.build_url(&[
            ("s", Some(title)),
            ("type", Some(category.as_str())),
            ("y", year),
        ]);
        let fields = self.send_request(&url).await?;
        let result: SearchResult = serde_json::from_value(Value::Object(fields))?;
        Ok(result.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> OmdbClient {
        OmdbClient::new(&OmdbConfig {
            base_url: "http://www.omdbapi.com/".to_string(),
            api_key: Some("k3y".to_string()),
            timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_missing_api_key() {
        let result = OmdbClient::new(&OmdbConfig::default());
        assert!(matches!(result, Err(crate::Error::ApiKeyMissing)));
    }

    #[test]
    fn test_build_url_omits_missing_params() {
        let url = client().build_url(&[("s", Some("The Matrix")), ("type", Some("movie")), ("y", None)]);
        assert_eq!(
            url,
            "http://www.omdbapi.com/?s=The%20Matrix&type=movie&apikey=k3y"
        );
    }

    #[test]
    fn test_check_response_strips_flag() {
        let fields = check_response(json!({"Title": "The Matrix", "Response": "True"})).unwrap();
        assert!(fields.get("Response").is_none());
        assert_eq!(fields.get("Title").and_then(Value::as_str), Some("The Matrix"));
    }

    #[test]
    fn test_check_response_error() {
        let result = check_response(json!({"Response": "False", "Error": "Movie not found!"}));
        match result {
            Err(crate::Error::Provider(msg)) => assert_eq!(msg, "Movie not found!"),
            other => panic!("Expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_key_status() {
        assert!(key_status(Ok(Map::new())).is_ok());

        let rejected = check_response(json!({"Response": "False", "Error": "Invalid API key!"}));
        assert!(matches!(key_status(rejected), Err(crate::Error::ApiKeyInvalid)));

        let not_found = check_response(json!({"Response": "False", "Error": "Incorrect IMDb ID."}));
        assert!(matches!(key_status(not_found), Err(crate::Error::Provider(_))));
    }

    #[test]
    fn test_season_response_gaps() {
        let body = json!({
            "Title": "Show",
            "Season": "1",
            "Episodes": [
                {"Title": "One", "Released": "2020-01-01", "Episode": "1", "imdbID": "tt01"},
                {"Title": "Three", "Released": "2020-01-15", "Episode": "3", "imdbID": "tt03"},
                {"Title": "Five", "Released": "2020-01-29", "Episode": "5", "imdbID": "tt05"},
                {"Title": "Bogus", "Episode": "N/A"}
            ],
            "Response": "True"
        });
        let fields = check_response(body).unwrap();
        let result: SeasonResult = serde_json::from_value(Value::Object(fields)).unwrap();
        let entries = episode_entries(result.episodes);

        assert_eq!(entries.len(), 5);
        assert!(entries[1].is_placeholder());
        assert!(entries[3].is_placeholder());
        assert_eq!(entries[4].record().map(|r| r.title.as_str()), Some("Five"));
        assert_eq!(
            entries[0].record().and_then(|r| r.imdb_id.as_deref()),
            Some("tt01")
        );
    }

    #[test]
    fn test_search_response() {
        let body = json!({
            "Search": [
                {"Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "N/A"},
                {"Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "2",
            "Response": "True"
        });
        let fields = check_response(body).unwrap();
        let result: SearchResult = serde_json::from_value(Value::Object(fields)).unwrap();
        assert_eq!(result.search.len(), 2);
        assert_eq!(result.search[1].id, "tt0234215");
        assert_eq!(result.search[0].year, "1999");
    }
}

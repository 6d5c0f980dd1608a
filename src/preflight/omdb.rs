//! OMDb API preflight check.

use super::CheckResult;
use crate::models::config::OmdbConfig;
use crate::services::omdb::OmdbClient;

/// Check if the OMDb API accepts the configured key.
pub async fn check(config: &OmdbConfig) -> CheckResult {
    match OmdbClient::new(config) {
        Ok(client) => match client.verify_api_key().await {
            Ok(()) => CheckResult::ok("OMDb API", "connected"),
            Err(crate::Error::ApiKeyInvalid) => CheckResult::fail(
                "OMDb API",
                "invalid API key",
                "Check OMDB_API_KEY or the api_key entry in config.toml",
            ),
            Err(e) => CheckResult::fail(
                "OMDb API",
                &format!("connection failed ({})", e),
                "Check your network connection and the configured base_url",
            ),
        },
        Err(_) => CheckResult::fail(
            "OMDb API",
            "API key not configured",
            "Set OMDB_API_KEY or add api_key under [omdb] in config.toml",
        ),
    }
}

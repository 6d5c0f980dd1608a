//! Error types for the renamer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the renamer.
#[derive(Error, Debug)]
pub enum Error {
    // Preflight errors
    #[error("OMDb API key not configured. Set OMDB_API_KEY or add it to config.toml")]
    ApiKeyMissing,

    #[error("OMDb API key invalid")]
    ApiKeyInvalid,

    // Per-file errors
    #[error("Not a valid file: {0}")]
    InvalidPath(String),

    #[error("Not a video file: {0}")]
    NotAVideo(String),

    #[error("No search results found for given pattern <{0}>")]
    NoIdentifierResolved(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Missing episode data for S{season:02}E{episode:02}")]
    MissingEpisodeData { season: u32, episode: i32 },

    // File system errors
    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Short reason label used in batch summaries.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::InvalidPath(_) => "invalid path",
            Error::NotAVideo(_) => "not a video",
            Error::NoIdentifierResolved(_) => "no results",
            Error::Provider(_) => "no metadata",
            Error::MissingEpisodeData { .. } => "missing episode data",
            Error::FileAlreadyExists(_) => "target exists",
            Error::ApiKeyMissing | Error::ApiKeyInvalid => "api key",
            _ => "error",
        }
    }
}

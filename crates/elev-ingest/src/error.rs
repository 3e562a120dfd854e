//! Error types for survey data acquisition.

use std::path::PathBuf;

use elev_model::ModelError;
use thiserror::Error;

/// A failed request against the statistics API.
///
/// These never reach the caller of the data source: they are logged and
/// replaced by a bundled snapshot or an empty result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Transport failure, including timeouts.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// The response body was not the expected JSON.
    #[error("could not decode API response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Unrecoverable acquisition errors.
///
/// A missing or corrupt snapshot has nothing beneath it to fall back to,
/// so it surfaces to the load state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Source configuration holds an invalid value.
    #[error("invalid source configuration: {0}")]
    InvalidConfig(#[from] ModelError),

    /// Snapshot file missing or unreadable.
    #[error("failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON of the expected shape.
    #[error("failed to parse snapshot {path}: {message}")]
    SnapshotParse { path: PathBuf, message: String },
}

impl IngestError {
    /// Message suitable for an error screen that offers a reload.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::SnapshotRead { .. } | Self::SnapshotParse { .. } => {
                "Could not load survey data from the API or the bundled snapshot. Please reload."
            }
            Self::ClientBuild(_) => "Could not initialize the network client.",
            Self::InvalidConfig(_) => "The data source configuration is invalid.",
        }
    }
}

/// Result type for acquisition operations.
pub type Result<T> = std::result::Result<T, IngestError>;

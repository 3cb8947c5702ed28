//! Error types for fetching listings and persisting the directory.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single request or a whole exchange listing.
///
/// The same type is used at both granularities. The caller decides
/// the blast radius: on a primary listing request it fails the
/// exchange, on a per-instrument detail request it skips one pair.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed {exchange} response: {reason}")]
    Malformed { exchange: String, reason: String },
}

impl FetchError {
    pub fn malformed(exchange: &str, reason: impl Into<String>) -> Self {
        FetchError::Malformed {
            exchange: exchange.to_string(),
            reason: reason.into(),
        }
    }
}

/// Directory persistence errors. All of these are fatal for a run.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("failed to serialize directory: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse directory document: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

//! Error types for data-source requests

use thiserror::Error;

/// Anything that can go wrong while fetching movie data.
///
/// The UI collapses all of these into a single user-facing message and logs
/// the detail; a failure is contained to the current render cycle.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection, transfer, or body-decode failure from the HTTP client.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Status { status: u16 },

    /// The response body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

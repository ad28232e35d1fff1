//! Error types for pricewatch.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pricewatch operations.
pub type Result<T> = std::result::Result<T, PricewatchError>;

/// Main error type for pricewatch.
///
/// None of these are fatal to the running system: fetch and render
/// failures degrade to "no value this time" at the public surfaces, and
/// the sampler logs storage failures and tries again next tick.
#[derive(Error, Debug)]
pub enum PricewatchError {
    // Fetch errors
    #[error("Fetch failed: {reason}")]
    FetchFailed { reason: String },

    #[error("Price pattern not found in response body")]
    PatternNotFound,

    // Storage errors
    #[error("I/O error at {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode sample data: {0}")]
    EncodeError(#[from] serde_json::Error),

    // Rendering errors
    #[error("Chart rendering failed: {reason}")]
    RenderFailed { reason: String },

    // Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

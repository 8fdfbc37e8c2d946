//! Error types shared by the catalog, viewer and asset pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`GalleryError`]
pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Debug, Error)]
pub enum GalleryError {
    // ── Network / resources ────────────────────────────────────────────────
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request for {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Timed out after {millis} ms waiting for {what}")]
    Timeout { what: String, millis: u64 },

    // ── Catalog ─────────────────────────────────────────────────────────────
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate content id in catalog: {id}")]
    DuplicateId { id: String },

    #[error("Content not found: {id}")]
    UnknownContent { id: String },

    // ── Viewer ──────────────────────────────────────────────────────────────
    #[error("Clipboard unavailable: {message}")]
    Clipboard { message: String },

    #[error("Invalid highlight rule for {language}: {message}")]
    HighlightRule { language: String, message: String },

    // ── Filesystem / config ─────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GalleryError {
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the failure came from the network layer rather than the data.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl { .. }
                | Self::Fetch { .. }
                | Self::HttpStatus { .. }
                | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = GalleryError::DuplicateId { id: "bar-chart".into() };
        assert_eq!(e.to_string(), "Duplicate content id in catalog: bar-chart");

        let e = GalleryError::HttpStatus {
            url: "http://localhost/data.json".into(),
            status: 404,
        };
        assert!(e.to_string().contains("404"));
        assert!(e.is_network());
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let e: GalleryError = err.into();
        assert!(matches!(e, GalleryError::Json(_)));
        assert!(!e.is_network());
    }
}

//! Error types for the ownership crawler
//!
//! Registry and report failures are expressed with thiserror so the
//! traversal engine can decide per variant whether a failure is local to
//! one entity or fatal for the whole run.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for crawling and reporting
#[derive(Error, Debug)]
pub enum CrawlError {
    /// The registry answered with a non-success status
    #[error("Registry API error {status} for {resource}: {body}")]
    Fetch {
        resource: String,
        status: u16,
        body: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode {resource}: {message}")]
    Decode { resource: String, message: String },

    /// A company detail fetch produced no usable record
    #[error("No information available for company {company_number}")]
    EmptyRecord { company_number: String },

    /// The reported total and the pages actually served disagree
    #[error("Pagination of {resource} stopped at {fetched} of {total} items")]
    Pagination {
        resource: String,
        fetched: usize,
        total: usize,
    },

    #[error("Failed to load filing description templates from {path}: {message}")]
    Templates { path: PathBuf, message: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrawlError {
    /// Build a decode error from any displayable cause
    pub fn decode(resource: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Decode {
            resource: resource.into(),
            message: cause.to_string(),
        }
    }

    /// Whether the failure is confined to a single entity's sub-report.
    ///
    /// Only report-sink and setup failures abort a crawl.
    pub fn is_entity_local(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Templates { .. })
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = CrawlError::Fetch {
            resource: "/company/00000123/officers".to_string(),
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Registry API error 404 for /company/00000123/officers: not found"
        );
        assert!(err.is_entity_local());
    }

    #[test]
    fn test_io_error_is_fatal() {
        let err = CrawlError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert!(!err.is_entity_local());
    }
}

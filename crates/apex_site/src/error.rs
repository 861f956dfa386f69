//! Error types for the site crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading content or mounting the page.
#[derive(Error, Debug)]
pub enum SiteError {
    /// Config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`SiteConfig`](crate::config::SiteConfig).
    #[error("invalid site config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A content literal is malformed.
    #[error("invalid content at {field}: {reason}")]
    InvalidContent {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An in-page link points at a section the page does not have.
    #[error("unknown anchor: {0}")]
    UnknownAnchor(String),
}

impl SiteError {
    /// Shorthand for [`SiteError::InvalidContent`].
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidContent {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for site operations.
pub type SiteResult<T> = Result<T, SiteError>;

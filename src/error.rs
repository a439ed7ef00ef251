//! Error types for repository operations.

use thiserror::Error;
use url::Url;

/// Status code carried by failures that happen before any response exists.
pub const NO_STATUS: i32 = -1;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, FcrepoError>;

#[derive(Debug, Error)]
pub enum FcrepoError {
    /// The request could not be built, or the repository answered with an error status.
    #[error("Operation failed for {url}: {status_code} {status_text}")]
    OperationFailed {
        url: Url,
        /// HTTP status, or [`NO_STATUS`] when no response was received.
        status_code: i32,
        status_text: String,
    },

    #[error("Invalid resource URI {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Credentials cannot be sent as a header: {0}")]
    InvalidCredentials(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FcrepoError {
    pub(crate) fn encoding(url: &Url, message: impl Into<String>) -> Self {
        FcrepoError::OperationFailed {
            url: url.clone(),
            status_code: NO_STATUS,
            status_text: message.into(),
        }
    }

    /// HTTP status of the failed operation, if the repository answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FcrepoError::OperationFailed { status_code, .. } => u16::try_from(*status_code).ok(),
            FcrepoError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Parse a resource URI, reporting the offending input on failure.
pub fn parse_uri(uri: &str) -> Result<Url> {
    Url::parse(uri).map_err(|source| FcrepoError::InvalidUri {
        uri: uri.to_string(),
        source,
    })
}

use std::path::PathBuf;

use sheetlink_core::A1Error;
use thiserror::Error;

/// Client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid range {range:?}: {source}")]
    Reference {
        range: String,
        #[source]
        source: A1Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot read credentials from {}: {source}", path.display())]
    Credentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Attach the offending range string to a parse failure
    pub(crate) fn reference(range: &str) -> impl FnOnce(A1Error) -> ClientError + '_ {
        move |source| ClientError::Reference {
            range: range.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

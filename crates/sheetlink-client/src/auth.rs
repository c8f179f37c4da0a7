//! Access-token loading.
//!
//! The credential file holds either a JSON object with an `access_token`
//! field or the bare token text. Tokens are used as-is; minting and
//! refreshing them is left to whatever wrote the file.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Bearer credentials for the spreadsheet API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
}

// Keep tokens out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenFile {
    access_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Load credentials from a token file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ClientError::Credentials {
            path: path.to_path_buf(),
            source,
        })?;
        let contents = contents.trim();

        let token = if contents.starts_with('{') {
            serde_json::from_str::<TokenFile>(contents)?.access_token
        } else {
            contents.to_string()
        };

        if token.is_empty() {
            return Err(ClientError::Config(format!(
                "no access token in {}",
                path.display()
            )));
        }

        tracing::debug!("Loaded credentials from {}", path.display());
        Ok(Self::new(token))
    }
}

use std::env;
use std::path::PathBuf;

pub const ENV_SPREADSHEET_ID: &str = "SHEETLINK_SPREADSHEET_ID";
pub const ENV_SHEET_ID: &str = "SHEETLINK_SHEET_ID";
pub const ENV_SHEET_NAME: &str = "SHEETLINK_SHEET_NAME";
pub const ENV_CREDENTIALS: &str = "SHEETLINK_CREDENTIALS";
pub const ENV_API_BASE: &str = "SHEETLINK_API_BASE";

pub const DEFAULT_CREDENTIALS: &str = "credentials.json";
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Spreadsheet (document) identifier
    pub spreadsheet_id: String,
    /// Numeric sheet (tab) id used for formatting and grouping
    pub sheet_id: Option<i64>,
    /// Sheet (tab) title used to qualify bare A1 ranges
    pub sheet_name: Option<String>,
    /// File holding the access token
    pub credential_path: PathBuf,
    /// Base URL of the spreadsheet API
    pub api_base: String,
}

impl Config {
    /// Configuration for a spreadsheet with every other option at its default
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            sheet_id: None,
            sheet_name: None,
            credential_path: PathBuf::from(DEFAULT_CREDENTIALS),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_sheet_id(mut self, sheet_id: i64) -> Self {
        self.sheet_id = Some(sheet_id);
        self
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = path.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let spreadsheet_id = lookup(ENV_SPREADSHEET_ID)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("{} is not set", ENV_SPREADSHEET_ID))?;

        let sheet_id = lookup(ENV_SHEET_ID)
            .map(|id| id.trim().parse::<i64>())
            .transpose()
            .map_err(|e| anyhow::anyhow!("{} is not an integer: {}", ENV_SHEET_ID, e))?;
        let sheet_name = lookup(ENV_SHEET_NAME).filter(|name| !name.is_empty());
        let credential_path = lookup(ENV_CREDENTIALS)
            .unwrap_or_else(|| DEFAULT_CREDENTIALS.to_string())
            .into();
        let api_base = lookup(ENV_API_BASE)
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            spreadsheet_id,
            sheet_id,
            sheet_name,
            credential_path,
            api_base,
        })
    }
}

//! HTTP implementation of [`SpreadsheetService`].
//!
//! Async reqwest client speaking the v4 REST shape. No retries.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use sheetlink_core::ValueMatrix;

use crate::auth::Credentials;
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::requests::{BatchUpdateRequest, Request};
use crate::service::{SheetProperties, SpreadsheetService};

const VALUE_INPUT_OPTION: (&str, &str) = ("valueInputOption", "USER_ENTERED");
const INSERT_DATA_OPTION: (&str, &str) = ("insertDataOption", "INSERT_ROWS");

/// Spreadsheet API client over HTTP
#[derive(Clone)]
pub struct HttpService {
    http: reqwest::Client,
    api_base: Url,
    spreadsheet_id: String,
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: &'a ValueMatrix,
}

#[derive(Deserialize)]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

impl HttpService {
    /// Create a new service for the configured spreadsheet
    pub fn new(config: &Config, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("sheetlink/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()?;
        let api_base = Url::parse(&config.api_base)
            .map_err(|e| ClientError::Config(format!("invalid API base {:?}: {}", config.api_base, e)))?;

        Ok(Self {
            http,
            api_base,
            spreadsheet_id: config.spreadsheet_id.clone(),
            token: credentials.access_token,
        })
    }

    /// `{api_base}/v4/spreadsheets/{segments...}` with each segment encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("API base {} cannot be a base", self.api_base)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(segments);
        Ok(url)
    }

    fn values_endpoint(&self, range: &str) -> Result<Url> {
        self.endpoint(&[self.spreadsheet_id.as_str(), "values", range])
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::error!("Spreadsheet API returned {}: {}", status, message);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl SpreadsheetService for HttpService {
    async fn get_values(&self, range: &str) -> Result<Vec<Vec<serde_json::Value>>> {
        tracing::debug!("GET values {}", range);
        let url = self.values_endpoint(range)?;
        let response = self.send(self.http.get(url)).await?;
        let body: ValueRangeResponse = response.json().await?;
        Ok(body.values)
    }

    async fn update_values(&self, range: &str, values: &ValueMatrix) -> Result<()> {
        tracing::debug!("PUT {} rows into {}", values.len(), range);
        let url = self.values_endpoint(range)?;
        let body = ValueRangeBody {
            range,
            major_dimension: "ROWS",
            values,
        };
        self.send(self.http.put(url).query(&[VALUE_INPUT_OPTION]).json(&body))
            .await?;
        Ok(())
    }

    async fn append_values(&self, range: &str, values: &ValueMatrix) -> Result<()> {
        tracing::debug!("Append {} rows after {}", values.len(), range);
        let append = format!("{}:append", range);
        let url = self.endpoint(&[self.spreadsheet_id.as_str(), "values", append.as_str()])?;
        let body = ValueRangeBody {
            range,
            major_dimension: "ROWS",
            values,
        };
        self.send(
            self.http
                .post(url)
                .query(&[VALUE_INPUT_OPTION, INSERT_DATA_OPTION])
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn batch_update(&self, requests: Vec<Request>) -> Result<()> {
        tracing::debug!("Batch update with {} requests", requests.len());
        let target = format!("{}:batchUpdate", self.spreadsheet_id);
        let url = self.endpoint(&[target.as_str()])?;
        let body = BatchUpdateRequest { requests };
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    async fn sheets(&self) -> Result<Vec<SheetProperties>> {
        tracing::debug!("Fetching sheet properties for {}", self.spreadsheet_id);
        let url = self.endpoint(&[self.spreadsheet_id.as_str()])?;
        let response = self
            .send(self.http.get(url).query(&[("fields", "sheets.properties")]))
            .await?;
        let body: SpreadsheetResponse = response.json().await?;
        Ok(body.sheets.into_iter().map(|s| s.properties).collect())
    }
}

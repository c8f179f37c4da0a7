pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod requests;
pub mod service;

pub use auth::Credentials;
pub use client::{Record, SheetsClient};
pub use config::Config;
pub use error::{ClientError, Result};
pub use http::HttpService;
pub use service::{SheetProperties, SpreadsheetService};

/// Connect to the configured spreadsheet over HTTP
pub fn connect(config: Config) -> Result<SheetsClient<HttpService>> {
    let credentials = Credentials::load(&config.credential_path)?;
    let service = HttpService::new(&config, credentials)?;

    tracing::info!("Connected to spreadsheet {}", config.spreadsheet_id);

    Ok(SheetsClient::new(service, config))
}

use std::future::Future;

use serde::Deserialize;
use sheetlink_core::ValueMatrix;

use crate::error::Result;
use crate::requests::Request;

/// Properties of one sheet (tab) in a spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: u32,
}

/// The remote calls the client needs from a spreadsheet backend.
///
/// Ranges are A1 strings, optionally sheet-qualified (`Sheet1!A1:C10`).
pub trait SpreadsheetService: Send + Sync {
    /// Raw cell values of a range, row by row
    fn get_values(
        &self,
        range: &str,
    ) -> impl Future<Output = Result<Vec<Vec<serde_json::Value>>>> + Send;

    /// Overwrite the cells of a range
    fn update_values(
        &self,
        range: &str,
        values: &ValueMatrix,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Append rows after the table found at a range
    fn append_values(
        &self,
        range: &str,
        values: &ValueMatrix,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Send structural requests as one batch
    fn batch_update(&self, requests: Vec<Request>) -> impl Future<Output = Result<()>> + Send;

    /// List the sheets of the spreadsheet
    fn sheets(&self) -> impl Future<Output = Result<Vec<SheetProperties>>> + Send;
}

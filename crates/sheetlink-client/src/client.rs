use sheetlink_core::{
    first_column, index_to_letters, normalize, parse_range, plan_detail_range, quote_sheet_name,
    split_sheet_prefix, CellFormat, CellValue, DetailRange, GridRange,
};

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::requests::Request;
use crate::service::{SheetProperties, SpreadsheetService};

/// One row read from a sheet, keyed by column letter in column order
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Spreadsheet operations on top of a [`SpreadsheetService`]
pub struct SheetsClient<S> {
    service: S,
    config: Config,
}

impl<S: SpreadsheetService> SheetsClient<S> {
    pub fn new(service: S, config: Config) -> Self {
        Self { service, config }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Qualify a bare A1 range with the configured sheet name.
    ///
    /// Ranges that already name a sheet, and all ranges when no sheet name
    /// is configured, are returned unchanged.
    pub fn sheet_range(&self, range: &str) -> String {
        match (&self.config.sheet_name, split_sheet_prefix(range)) {
            (Some(name), (None, _)) => format!("{}!{}", quote_sheet_name(name), range.trim()),
            _ => range.to_string(),
        }
    }

    /// Numeric id of the configured sheet.
    ///
    /// An explicit sheet id wins, then a lookup by sheet name, then the first
    /// sheet of the spreadsheet.
    pub async fn resolve_sheet_id(&self) -> Result<i64> {
        if let Some(sheet_id) = self.config.sheet_id {
            return Ok(sheet_id);
        }
        self.lookup_sheet_id(self.config.sheet_name.as_deref()).await
    }

    async fn lookup_sheet_id(&self, title: Option<&str>) -> Result<i64> {
        let sheets = self.service.sheets().await?;
        let found = match title {
            Some(title) => sheets.iter().find(|s| s.title == title),
            None => sheets.iter().min_by_key(|s| s.index),
        };

        found.map(|s: &SheetProperties| s.sheet_id).ok_or_else(|| {
            ClientError::SheetNotFound(title.unwrap_or("<first sheet>").to_string())
        })
    }

    /// Read a range into records keyed by column letter.
    ///
    /// Labels start at the range's first column, so reading `C1:D5` yields
    /// keys `C` and `D`. The range itself is validated by the service, which
    /// also accepts open-ended forms such as `A2:C`.
    pub async fn read(&self, range: &str) -> Result<Vec<Record>> {
        let start_column = first_column(range);

        let target = self.sheet_range(range);
        let rows = self.service.get_values(&target).await?;
        tracing::debug!("Read {} rows from {}", rows.len(), target);

        let records: Vec<Record> = rows
            .into_iter()
            .map(|row| {
                (start_column..)
                    .zip(row)
                    .map(|(col, value)| (index_to_letters(col), value))
                    .collect::<Record>()
            })
            .collect();

        Ok(records)
    }

    /// Overwrite a range with normalized values, returning the rows written
    pub async fn write(&self, range: &str, values: impl Into<CellValue>) -> Result<usize> {
        let matrix = normalize(values);
        if matrix.is_empty() {
            tracing::debug!("Nothing to write to {}", range);
            return Ok(0);
        }

        let target = self.sheet_range(range);
        self.service.update_values(&target, &matrix).await?;
        tracing::info!("Wrote {} rows to {}", matrix.len(), target);
        Ok(matrix.len())
    }

    /// Append normalized values after the table at a range, returning the
    /// rows appended
    pub async fn append(&self, range: &str, values: impl Into<CellValue>) -> Result<usize> {
        let matrix = normalize(values);
        if matrix.is_empty() {
            tracing::debug!("Nothing to append to {}", range);
            return Ok(0);
        }

        let target = self.sheet_range(range);
        self.service.append_values(&target, &matrix).await?;
        tracing::info!("Appended {} rows to {}", matrix.len(), target);
        Ok(matrix.len())
    }

    /// Apply a format to a range.
    ///
    /// A sheet-qualified range is formatted on the named sheet; a bare range
    /// on the configured one.
    pub async fn format(&self, range: &str, format: &CellFormat) -> Result<GridRange> {
        let (sheet, a1) = split_sheet_prefix(range);
        let mut grid = parse_range(a1, 0).map_err(ClientError::reference(range))?;
        grid.sheet_id = match sheet {
            Some(title) => self.lookup_sheet_id(Some(title.as_str())).await?,
            None => self.resolve_sheet_id().await?,
        };

        if format.is_empty() {
            tracing::debug!("No format fields set for {}", range);
            return Ok(grid);
        }

        self.service
            .batch_update(vec![Request::repeat_format(grid, format)])
            .await?;
        tracing::info!("Formatted {} on sheet {}", range, grid.sheet_id);
        Ok(grid)
    }

    /// Group the detail rows between a parent row and the last detail row,
    /// optionally collapsing the group.
    ///
    /// Returns the grouped band, or `None` when there were no detail rows and
    /// nothing was sent.
    pub async fn group_rows(
        &self,
        present_row: u32,
        last_row: u32,
        index_offset: i64,
        collapse: bool,
    ) -> Result<Option<DetailRange>> {
        let Some(detail) = plan_detail_range(present_row, last_row, index_offset) else {
            tracing::warn!(
                "No detail rows between row {} and row {}, skipping group",
                present_row,
                last_row
            );
            return Ok(None);
        };

        let sheet_id = self.resolve_sheet_id().await?;
        let mut requests = vec![Request::add_row_group(sheet_id, detail)];
        if collapse {
            requests.push(Request::collapse_row_group(sheet_id, detail));
        }

        self.service.batch_update(requests).await?;
        tracing::info!(
            "Grouped rows {}..{} on sheet {} (collapsed: {})",
            detail.start_index,
            detail.end_index,
            sheet_id,
            collapse
        );
        Ok(Some(detail))
    }
}

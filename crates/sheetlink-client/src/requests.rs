//! Typed batch-update request envelopes.
//!
//! Field names follow the remote JSON (camelCase). Only the request kinds
//! the client issues are modelled.

use serde::Serialize;
use sheetlink_core::{CellFormat, Color, DetailRange, GridRange, HorizontalAlign};

/// Body of a batch update call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

/// A single batch-update operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    RepeatCell(RepeatCellRequest),
    AddDimensionGroup(AddDimensionGroupRequest),
    UpdateDimensionGroup(UpdateDimensionGroupRequest),
}

impl Request {
    /// Apply a format to every cell of a grid range
    pub fn repeat_format(range: GridRange, format: &CellFormat) -> Self {
        Request::RepeatCell(RepeatCellRequest {
            range,
            cell: CellData {
                user_entered_format: UserEnteredFormat::from(format),
            },
            fields: format_fields(format).join(","),
        })
    }

    /// Create an outline group over a band of rows
    pub fn add_row_group(sheet_id: i64, detail: DetailRange) -> Self {
        Request::AddDimensionGroup(AddDimensionGroupRequest {
            range: DimensionRange::rows(sheet_id, detail),
        })
    }

    /// Collapse the depth-1 group over a band of rows
    pub fn collapse_row_group(sheet_id: i64, detail: DetailRange) -> Self {
        Request::UpdateDimensionGroup(UpdateDimensionGroupRequest {
            dimension_group: DimensionGroup {
                range: DimensionRange::rows(sheet_id, detail),
                depth: 1,
                collapsed: true,
            },
            fields: "collapsed".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatCellRequest {
    pub range: GridRange,
    pub cell: CellData,
    /// Field mask naming the format fields to overwrite
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub user_entered_format: UserEnteredFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEnteredFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_strategy: Option<WrapStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_format: Option<TextFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
}

impl TextFormat {
    fn is_empty(&self) -> bool {
        *self == TextFormat::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WrapStrategy {
    Wrap,
    OverflowCell,
}

/// Color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorValue {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl From<Color> for ColorValue {
    fn from(color: Color) -> Self {
        let (red, green, blue, alpha) = color.to_unit();
        ColorValue {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl From<&CellFormat> for UserEnteredFormat {
    fn from(format: &CellFormat) -> Self {
        let text_format = TextFormat {
            foreground_color: format.text_color.map(Into::into),
            font_size: format.font_size,
            bold: format.bold,
            italic: format.italic,
            underline: format.underline,
            strikethrough: format.strikethrough,
        };

        UserEnteredFormat {
            background_color: format.background_color.map(Into::into),
            horizontal_alignment: format.horizontal_align,
            wrap_strategy: format.wrap_text.map(|wrap| {
                if wrap {
                    WrapStrategy::Wrap
                } else {
                    WrapStrategy::OverflowCell
                }
            }),
            text_format: (!text_format.is_empty()).then_some(text_format),
        }
    }
}

/// Field mask entries for the fields set on a format
fn format_fields(format: &CellFormat) -> Vec<&'static str> {
    let candidates = [
        (format.background_color.is_some(), "userEnteredFormat.backgroundColor"),
        (format.horizontal_align.is_some(), "userEnteredFormat.horizontalAlignment"),
        (format.wrap_text.is_some(), "userEnteredFormat.wrapStrategy"),
        (format.text_color.is_some(), "userEnteredFormat.textFormat.foregroundColor"),
        (format.font_size.is_some(), "userEnteredFormat.textFormat.fontSize"),
        (format.bold.is_some(), "userEnteredFormat.textFormat.bold"),
        (format.italic.is_some(), "userEnteredFormat.textFormat.italic"),
        (format.underline.is_some(), "userEnteredFormat.textFormat.underline"),
        (format.strikethrough.is_some(), "userEnteredFormat.textFormat.strikethrough"),
    ];

    candidates
        .into_iter()
        .filter_map(|(set, field)| set.then_some(field))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: Dimension,
    pub start_index: u32,
    pub end_index: u32,
}

impl DimensionRange {
    pub fn rows(sheet_id: i64, detail: DetailRange) -> Self {
        Self {
            sheet_id,
            dimension: Dimension::Rows,
            start_index: detail.start_index,
            end_index: detail.end_index,
        }
    }
}

/// Only row groups are created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Dimension {
    Rows,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDimensionGroupRequest {
    pub range: DimensionRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionGroup {
    pub range: DimensionRange,
    pub depth: u32,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDimensionGroupRequest {
    pub dimension_group: DimensionGroup,
    pub fields: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sheetlink_core::parse_range;

    #[test]
    fn test_repeat_format_background_only() {
        let range = parse_range("A1:B2", 7).unwrap();
        let format = CellFormat::new().with_background_color(Color::RED);
        let request = Request::repeat_format(range, &format);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "repeatCell": {
                    "range": {
                        "sheetId": 7,
                        "startRowIndex": 0,
                        "endRowIndex": 2,
                        "startColumnIndex": 0,
                        "endColumnIndex": 2
                    },
                    "cell": {
                        "userEnteredFormat": {
                            "backgroundColor": {"red": 1.0, "green": 0.0, "blue": 0.0, "alpha": 1.0}
                        }
                    },
                    "fields": "userEnteredFormat.backgroundColor"
                }
            })
        );
    }

    #[test]
    fn test_repeat_format_text_fields() {
        let range = parse_range("3:3", 0).unwrap();
        let format = CellFormat::new()
            .with_bold(true)
            .with_text_color(Color::BLACK)
            .with_horizontal_align(HorizontalAlign::Center)
            .with_wrap_text(true);

        let json = serde_json::to_value(Request::repeat_format(range, &format)).unwrap();
        let repeat = &json["repeatCell"];
        assert_eq!(
            repeat["fields"],
            "userEnteredFormat.horizontalAlignment,userEnteredFormat.wrapStrategy,\
             userEnteredFormat.textFormat.foregroundColor,userEnteredFormat.textFormat.bold"
        );
        let cell_format = &repeat["cell"]["userEnteredFormat"];
        assert_eq!(cell_format["horizontalAlignment"], "CENTER");
        assert_eq!(cell_format["wrapStrategy"], "WRAP");
        assert_eq!(cell_format["textFormat"]["bold"], true);
        assert!(cell_format.get("backgroundColor").is_none());
        assert!(repeat["range"].get("startColumnIndex").is_none());
    }

    #[test]
    fn test_row_group_requests() {
        let detail = DetailRange {
            start_index: 10,
            end_index: 15,
        };
        let requests = BatchUpdateRequest {
            requests: vec![
                Request::add_row_group(3, detail),
                Request::collapse_row_group(3, detail),
            ],
        };

        let range = json!({"sheetId": 3, "dimension": "ROWS", "startIndex": 10, "endIndex": 15});
        assert_eq!(
            serde_json::to_value(&requests).unwrap(),
            json!({
                "requests": [
                    {"addDimensionGroup": {"range": range}},
                    {"updateDimensionGroup": {
                        "dimensionGroup": {"range": range, "depth": 1, "collapsed": true},
                        "fields": "collapsed"
                    }}
                ]
            })
        );
    }
}

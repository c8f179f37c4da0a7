use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::column::{index_to_letters, letters_to_index, ColumnIndex};
use crate::error::A1Error;

static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)([0-9]+)$").expect("valid cell pattern"));
static COLUMN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+$").expect("valid column pattern"));
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid row pattern"));
static BARE_SHEET_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid sheet name pattern"));

/// Which axes a single A1 reference pins down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// Letters and digits, e.g. `B7`
    Cell,
    /// Digits only, e.g. `7`
    Row,
    /// Letters only, e.g. `B`
    Column,
}

/// A single parsed A1 reference. At least one of row or column is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    row: Option<u32>,
    col: Option<ColumnIndex>,
}

impl CellRef {
    /// 1-based row number, if the reference names one
    pub fn row(&self) -> Option<u32> {
        self.row
    }

    /// 0-based column index, if the reference names one
    pub fn col(&self) -> Option<ColumnIndex> {
        self.col
    }

    pub fn kind(&self) -> RefKind {
        match (self.row, self.col) {
            (Some(_), Some(_)) => RefKind::Cell,
            (Some(_), None) => RefKind::Row,
            _ => RefKind::Column,
        }
    }
}

/// 0-based, end-exclusive region of a sheet.
///
/// Absent row bounds select whole columns and absent column bounds select
/// whole rows. Serializes with the remote service's field names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}

impl GridRange {
    /// Number of rows, when the range is row-bounded
    pub fn row_count(&self) -> Option<u32> {
        Some(self.end_row_index?.saturating_sub(self.start_row_index?))
    }

    /// Number of columns, when the range is column-bounded
    pub fn column_count(&self) -> Option<u32> {
        Some(self.end_column_index?.saturating_sub(self.start_column_index?))
    }

    /// Render back to A1 notation.
    ///
    /// Returns `None` for shapes A1 cannot express without a sheet size,
    /// such as a range with a start row but no end row.
    pub fn to_a1(&self) -> Option<String> {
        let rows = match (self.start_row_index, self.end_row_index) {
            (Some(start), Some(end)) if end > start => Some((start + 1, end)),
            (None, None) => None,
            _ => return None,
        };
        let cols = match (self.start_column_index, self.end_column_index) {
            (Some(start), Some(end)) if end > start => {
                Some((index_to_letters(start), index_to_letters(end - 1)))
            }
            (None, None) => None,
            _ => return None,
        };

        match (rows, cols) {
            (Some((r0, r1)), Some((c0, c1))) => {
                if r0 == r1 && c0 == c1 {
                    Some(format!("{}{}", c0, r0))
                } else {
                    Some(format!("{}{}:{}{}", c0, r0, c1, r1))
                }
            }
            (Some((r0, r1)), None) => Some(format!("{}:{}", r0, r1)),
            (None, Some((c0, c1))) => Some(format!("{}:{}", c0, c1)),
            (None, None) => None,
        }
    }
}

/// Parse a single reference such as `AB23`, `AB` or `23`
pub fn parse_ref(reference: &str) -> Result<CellRef, A1Error> {
    let normalized = reference.trim().to_ascii_uppercase();
    let invalid = || A1Error::InvalidReference(reference.to_string());

    if let Some(caps) = CELL_RE.captures(&normalized) {
        let col = letters_to_index(&caps[1]).map_err(|_| invalid())?;
        let row = parse_row(&caps[2]).ok_or_else(invalid)?;
        return Ok(CellRef {
            row: Some(row),
            col: Some(col),
        });
    }

    if COLUMN_RE.is_match(&normalized) {
        let col = letters_to_index(&normalized).map_err(|_| invalid())?;
        return Ok(CellRef {
            row: None,
            col: Some(col),
        });
    }

    if ROW_RE.is_match(&normalized) {
        let row = parse_row(&normalized).ok_or_else(invalid)?;
        return Ok(CellRef {
            row: Some(row),
            col: None,
        });
    }

    Err(invalid())
}

/// Rows are 1-based in A1 notation, so `0` is rejected along with overflow
fn parse_row(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|row| *row > 0)
}

/// Parse an A1 range (`A1:C10`, `2:2`, `A:Z`, or a single reference) into a
/// grid range on the given sheet.
///
/// Both ends must be the same kind of reference. Reversed ends such as
/// `C10:A1` are normalized to top-left / bottom-right.
pub fn parse_range(range: &str, sheet_id: i64) -> Result<GridRange, A1Error> {
    let mut parts = range.split(':');
    let start = parse_ref(parts.next().unwrap_or_default())?;
    let end = match parts.next() {
        Some(end) => parse_ref(end)?,
        None => start,
    };
    if parts.next().is_some() || start.kind() != end.kind() {
        return Err(A1Error::InvalidReference(range.to_string()));
    }

    let mut grid = GridRange {
        sheet_id,
        ..GridRange::default()
    };

    if let Some(start_row) = start.row {
        let end_row = end.row.unwrap_or(start_row);
        grid.start_row_index = Some(start_row.min(end_row) - 1);
        grid.end_row_index = Some(start_row.max(end_row));
    }

    if let Some(start_col) = start.col {
        let end_col = end.col.unwrap_or(start_col);
        grid.start_column_index = Some(start_col.min(end_col));
        grid.end_column_index = Some(
            start_col
                .max(end_col)
                .checked_add(1)
                .ok_or_else(|| A1Error::InvalidReference(range.to_string()))?,
        );
    }

    Ok(grid)
}

/// First column of a possibly sheet-qualified range, for labelling values
/// read from it.
///
/// Only the start reference is looked at, so open-ended ranges such as
/// `A2:C` work. Whole-row ranges, bare sheet names and anything else that is
/// not an A1 start reference begin at column `A`. A letters-only sheet name
/// without `!` is indistinguishable from a column reference.
pub fn first_column(range: &str) -> ColumnIndex {
    let (_, a1) = split_sheet_prefix(range);
    let start = a1.split(':').next().unwrap_or_default();
    parse_ref(start)
        .ok()
        .and_then(|reference| reference.col)
        .unwrap_or(0)
}

/// Split a sheet-qualified range such as `'My Sheet'!A1:B2` into the
/// unquoted sheet name and the bare A1 part.
pub fn split_sheet_prefix(range: &str) -> (Option<String>, &str) {
    if let Some(quoted) = range.strip_prefix('\'') {
        let mut name = String::new();
        let mut chars = quoted.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != '\'' {
                name.push(c);
                continue;
            }
            // '' is an escaped quote inside the name
            if let Some((_, '\'')) = chars.peek() {
                chars.next();
                name.push('\'');
                continue;
            }
            return match quoted[i + 1..].strip_prefix('!') {
                Some(rest) => (Some(name), rest),
                None => (None, range),
            };
        }
        return (None, range);
    }

    match range.split_once('!') {
        Some((sheet, rest)) => (Some(sheet.to_string()), rest),
        None => (None, range),
    }
}

/// Quote a sheet name for use in a range string when it needs quoting
pub fn quote_sheet_name(name: &str) -> String {
    if BARE_SHEET_NAME_RE.is_match(name) {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ref_shapes() {
        assert_eq!(
            parse_ref("AB23").unwrap(),
            CellRef {
                row: Some(23),
                col: Some(letters_to_index("AB").unwrap()),
            }
        );
        assert_eq!(parse_ref(" ab ").unwrap().kind(), RefKind::Column);
        assert_eq!(parse_ref("ab").unwrap().col(), Some(27));
        assert_eq!(parse_ref("10").unwrap().row(), Some(10));
        assert_eq!(parse_ref("10").unwrap().kind(), RefKind::Row);
        assert_eq!(parse_ref("c3").unwrap().kind(), RefKind::Cell);
    }

    #[test]
    fn test_parse_ref_rejects_malformed() {
        assert_eq!(
            parse_ref("##"),
            Err(A1Error::InvalidReference("##".to_string()))
        );
        assert!(parse_ref("").is_err());
        assert!(parse_ref("1A").is_err());
        assert!(parse_ref("A1B").is_err());
        assert!(parse_ref("A0").is_err());
        assert!(parse_ref("A99999999999").is_err());
        assert!(parse_ref("ß1").is_err());
        assert!(parse_ref("ﬀ").is_err());
        assert!(parse_ref("ǆ3").is_err());
        assert!(parse_range("ß1:ß2", 0).is_err());
    }

    #[test]
    fn test_parse_range_rectangle() {
        assert_eq!(
            parse_range("A1:C10", 5).unwrap(),
            GridRange {
                sheet_id: 5,
                start_row_index: Some(0),
                end_row_index: Some(10),
                start_column_index: Some(0),
                end_column_index: Some(3),
            }
        );
    }

    #[test]
    fn test_parse_range_single_cell() {
        let grid = parse_range("A1", 0).unwrap();
        assert_eq!(grid.row_count(), Some(1));
        assert_eq!(grid.column_count(), Some(1));
        assert_eq!(grid.start_row_index, Some(0));
        assert_eq!(grid.start_column_index, Some(0));
    }

    #[test]
    fn test_parse_range_whole_row() {
        assert_eq!(
            parse_range("2:2", 5).unwrap(),
            GridRange {
                sheet_id: 5,
                start_row_index: Some(1),
                end_row_index: Some(2),
                ..GridRange::default()
            }
        );
        let json = serde_json::to_value(parse_range("2:2", 5).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sheetId": 5, "startRowIndex": 1, "endRowIndex": 2})
        );
    }

    #[test]
    fn test_parse_range_whole_column() {
        let grid = parse_range("A:Z", 5).unwrap();
        assert_eq!(
            grid,
            GridRange {
                sheet_id: 5,
                start_column_index: Some(0),
                end_column_index: Some(26),
                ..GridRange::default()
            }
        );
        let json = serde_json::to_value(grid).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sheetId": 5, "startColumnIndex": 0, "endColumnIndex": 26})
        );
    }

    #[test]
    fn test_parse_range_reversed_is_normalized() {
        assert_eq!(parse_range("C10:A1", 1), parse_range("A1:C10", 1));
    }

    #[test]
    fn test_parse_range_rejects_mixed_and_malformed() {
        assert!(matches!(
            parse_range("A:2", 0),
            Err(A1Error::InvalidReference(_))
        ));
        assert!(parse_range("A1:C", 0).is_err());
        assert!(parse_range("A1:B2:C3", 0).is_err());
        assert!(parse_range("", 0).is_err());
        assert!(parse_range("A1:", 0).is_err());
    }

    #[test]
    fn test_counts_of_inverted_bounds_saturate() {
        let inverted = GridRange {
            sheet_id: 0,
            start_row_index: Some(5),
            end_row_index: Some(2),
            start_column_index: Some(3),
            end_column_index: Some(1),
        };
        assert_eq!(inverted.row_count(), Some(0));
        assert_eq!(inverted.column_count(), Some(0));

        let json = serde_json::json!({"sheetId": 1, "startRowIndex": 9, "endRowIndex": 4});
        let parsed: GridRange = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.row_count(), Some(0));
        assert_eq!(parsed.column_count(), None);
    }

    #[test]
    fn test_first_column() {
        assert_eq!(first_column("C2:D5"), 2);
        assert_eq!(first_column("A2:C"), 0);
        assert_eq!(first_column("'My Sheet'!AB3:AD"), 27);
        assert_eq!(first_column("Log!B:B"), 1);
        assert_eq!(first_column("2:4"), 0);
        assert_eq!(first_column("Data!"), 0);
        assert_eq!(first_column("My Sheet"), 0);
    }

    #[test]
    fn test_to_a1() {
        for a1 in ["A1", "A1:C10", "2:2", "A:Z", "AA5:AB7"] {
            assert_eq!(parse_range(a1, 0).unwrap().to_a1().as_deref(), Some(a1));
        }
        let open = GridRange {
            start_row_index: Some(3),
            ..GridRange::default()
        };
        assert_eq!(open.to_a1(), None);
    }

    #[test]
    fn test_split_sheet_prefix() {
        assert_eq!(
            split_sheet_prefix("Sheet1!A1:B2"),
            (Some("Sheet1".to_string()), "A1:B2")
        );
        assert_eq!(
            split_sheet_prefix("'My Sheet'!A1"),
            (Some("My Sheet".to_string()), "A1")
        );
        assert_eq!(
            split_sheet_prefix("'It''s'!B:B"),
            (Some("It's".to_string()), "B:B")
        );
        assert_eq!(split_sheet_prefix("A1:B2"), (None, "A1:B2"));
    }

    #[test]
    fn test_quote_sheet_name() {
        assert_eq!(quote_sheet_name("Sheet1"), "Sheet1");
        assert_eq!(quote_sheet_name("My Sheet"), "'My Sheet'");
        assert_eq!(quote_sheet_name("It's"), "'It''s'");
        assert_eq!(quote_sheet_name("2024"), "'2024'");
    }
}

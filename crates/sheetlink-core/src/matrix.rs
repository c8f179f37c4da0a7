//! Coercion of caller-supplied values into a matrix of cell strings.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Ordered rows of cell strings, ready to be written to a sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMatrix(Vec<Vec<String>>);

impl ValueMatrix {
    pub fn rows(&self) -> &[Vec<String>] {
        &self.0
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.0
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl From<Vec<Vec<String>>> for ValueMatrix {
    fn from(rows: Vec<Vec<String>>) -> Self {
        ValueMatrix(rows)
    }
}

impl From<ValueMatrix> for CellValue {
    fn from(matrix: ValueMatrix) -> Self {
        matrix.0.into()
    }
}

/// Normalize arbitrary nested values into a matrix of cell strings.
///
/// 1. If no top-level element is a sequence, the whole input is one row.
///    A flat list meant as a single column is therefore written as a row;
///    wrap each element in its own sequence to get a column.
/// 2. Top-level scalars among sequences become one-cell rows.
/// 3. A cell that is itself a sequence is flattened to one string: nested
///    sequences inside it are JSON-encoded, scalars are taken as-is, and the
///    parts are joined with `\n`.
///
/// Rows are `Vec`s, so cell positions are always contiguous.
pub fn normalize(values: impl Into<CellValue>) -> ValueMatrix {
    let items = match values.into() {
        CellValue::Sequence(items) => items,
        scalar => vec![scalar],
    };

    let rows = if items.is_empty() || items.iter().any(CellValue::is_sequence) {
        items
    } else {
        vec![CellValue::Sequence(items)]
    };

    let rows = rows
        .into_iter()
        .map(|row| match row {
            CellValue::Sequence(cells) => cells.into_iter().map(stringify_cell).collect(),
            scalar => vec![stringify_cell(scalar)],
        })
        .collect();

    ValueMatrix(rows)
}

fn stringify_cell(cell: CellValue) -> String {
    match cell {
        CellValue::Scalar(s) => s,
        CellValue::Sequence(parts) => parts
            .into_iter()
            .map(|part| match part {
                CellValue::Scalar(s) => s,
                nested => nested.to_json(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

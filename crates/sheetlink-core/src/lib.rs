//! Pure range algebra and value shaping for SheetLink.
//!
//! Nothing in this crate performs I/O; every function is deterministic and
//! safe to call from any thread.

pub mod cell;
pub mod column;
pub mod error;
pub mod format;
pub mod group;
pub mod matrix;
pub mod range;

pub use cell::CellValue;
pub use column::{index_to_letters, letters_to_index, ColumnIndex};
pub use error::A1Error;
pub use format::{CellFormat, Color, HorizontalAlign};
pub use group::{plan_detail_range, DetailRange};
pub use matrix::{normalize, ValueMatrix};
pub use range::{
    first_column, parse_range, parse_ref, quote_sheet_name, split_sheet_prefix, CellRef, GridRange,
    RefKind,
};

use serde::{Deserialize, Serialize};

/// Band of rows to collapse under a parent row (0-based, end-exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRange {
    pub start_index: u32,
    pub end_index: u32,
}

impl DetailRange {
    /// Number of detail rows in the band
    pub fn len(&self) -> u32 {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Work out which rows to group beneath a parent row.
///
/// `present_row` is the 1-based parent row and `last_row` the 1-based last
/// detail row; `index_offset` shifts both (for example to skip a header
/// block). Returns `None` when there is nothing between the two rows, in which
/// case no grouping request should be sent.
pub fn plan_detail_range(present_row: u32, last_row: u32, index_offset: i64) -> Option<DetailRange> {
    let start_row = i64::from(present_row) + index_offset + 1;
    let end_row = i64::from(last_row) + index_offset;

    if end_row < start_row || start_row < 1 {
        return None;
    }

    Some(DetailRange {
        start_index: u32::try_from(start_row - 1).ok()?,
        end_index: u32::try_from(end_row).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_detail_range() {
        assert_eq!(
            plan_detail_range(10, 15, 0),
            Some(DetailRange {
                start_index: 10,
                end_index: 15,
            })
        );
        assert_eq!(plan_detail_range(10, 15, 0).map(|r| r.len()), Some(5));
    }

    #[test]
    fn test_single_detail_row() {
        let range = plan_detail_range(10, 11, 0).unwrap();
        assert_eq!((range.start_index, range.end_index), (10, 11));
    }

    #[test]
    fn test_adjacent_rows_have_no_detail() {
        assert_eq!(plan_detail_range(10, 10, 0), None);
        assert_eq!(plan_detail_range(10, 9, 0), None);
    }

    #[test]
    fn test_index_offset_shifts_band() {
        assert_eq!(
            plan_detail_range(1, 4, 2),
            Some(DetailRange {
                start_index: 3,
                end_index: 6,
            })
        );
        assert_eq!(plan_detail_range(1, 4, -5), None);
    }

    #[test]
    fn test_inverted_range_has_no_rows() {
        let inverted = DetailRange {
            start_index: 8,
            end_index: 3,
        };
        assert_eq!(inverted.len(), 0);
        assert!(inverted.is_empty());

        let parsed: DetailRange =
            serde_json::from_str(r#"{"startIndex": 4, "endIndex": 1}"#).unwrap();
        assert!(parsed.is_empty());
    }
}

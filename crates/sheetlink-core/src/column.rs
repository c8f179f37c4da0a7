//! Conversion between column letters and zero-based column indices.
//!
//! Column letters are bijective base-26: the digits are `A`..=`Z` standing for
//! 1..=26 and there is no zero digit, so `Z` is followed by `AA`.

use crate::error::A1Error;

/// Zero-based position of a spreadsheet column
pub type ColumnIndex = u32;

/// Convert a column index (0-indexed) to letters (A, B, ..., Z, AA, AB, ...)
pub fn index_to_letters(index: ColumnIndex) -> String {
    let mut letters = Vec::new();
    // Widen so that u32::MAX + 1 does not overflow
    let mut n = u64::from(index) + 1;

    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - rem) / 26;
    }

    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Convert column letters to an index (0-indexed). Case-insensitive.
pub fn letters_to_index(letters: &str) -> Result<ColumnIndex, A1Error> {
    let invalid = || A1Error::InvalidColumnLetters(letters.to_string());

    if letters.is_empty() {
        return Err(invalid());
    }

    let mut value: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = u64::from(c.to_ascii_uppercase() as u8 - b'A' + 1);
        value = value
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .filter(|v| *v <= u64::from(ColumnIndex::MAX) + 1)
            .ok_or_else(invalid)?;
    }

    Ok((value - 1) as ColumnIndex)
}

//! Barcode normalization.
//!
//! Source feeds deliver barcodes as numbers (often with a spreadsheet
//! `.0` tail), as text with stray characters, or already clean. The
//! normalizer reduces every variant to a canonical digit string so the
//! reconciler can compare the two sides byte for byte.

use std::sync::LazyLock;

use pyo3::prelude::*;
use regex::Regex;

use crate::sheets::cells::CellValue;

/// Canonical barcode width (UPC-A, zero padded).
pub const BARCODE_WIDTH: usize = 12;

static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Normalize raw barcode text to its canonical form.
///
/// Strips one trailing `.0`, keeps the first contiguous digit run, and left
/// pads with zeros to [`BARCODE_WIDTH`]. Longer digit runs are kept whole;
/// padding never truncates. Text without digits normalizes to all zeros.
#[pyfunction]
pub fn normalize_barcode(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    let digits = DIGIT_RUN_RE
        .find(trimmed)
        .map(|m| m.as_str())
        .unwrap_or("");
    format!("{digits:0>width$}", width = BARCODE_WIDTH)
}

/// Normalize the barcode carried by a cell, via its text rendering.
pub fn normalize_cell(value: &CellValue) -> String {
    normalize_barcode(&value.to_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_short_codes_to_width() {
        assert_eq!(normalize_barcode("12345678905"), "012345678905");
    }

    #[test]
    fn test_strips_float_tail() {
        assert_eq!(normalize_barcode("12345678905.0"), "012345678905");
    }

    #[test]
    fn test_no_digits_becomes_all_zeros() {
        assert_eq!(normalize_barcode("n/a"), "000000000000");
        assert_eq!(normalize_barcode("ABC"), "000000000000");
        assert_eq!(normalize_barcode(""), "000000000000");
    }

    #[test]
    fn test_long_codes_are_never_truncated() {
        assert_eq!(normalize_barcode("1234567890123456"), "1234567890123456");
    }

    #[test]
    fn test_first_digit_run_wins() {
        assert_eq!(normalize_barcode("ABC123DEF456"), "000000000123");
    }

    #[test]
    fn test_idempotent_on_canonical_form() {
        let canonical = normalize_barcode("4011");
        assert_eq!(normalize_barcode(&canonical), canonical);
    }

    #[test]
    fn test_numeric_cell_normalizes_through_text() {
        let cell = CellValue::Number(12345678905.0);
        assert_eq!(normalize_cell(&cell), "012345678905");
    }

    #[test]
    fn test_empty_cell_normalizes_to_zeros() {
        assert_eq!(normalize_cell(&CellValue::Empty), "000000000000");
    }
}

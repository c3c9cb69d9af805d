//! Header row detection for source worksheets.
//!
//! Partner exports rarely start the table at row 0: banner rows, export
//! timestamps, and blank spacer rows come first. The detector scans a small
//! window from the top and picks the first row containing a known header
//! keyword.

use pyo3::prelude::*;

use crate::sheets::cells::CellValue;

/// Cell texts that identify a header row, compared case-insensitively
/// against each trimmed cell.
pub const HEADER_KEYWORDS: &[&str] = &["title", "description", "gtin", "upc", "barcode"];

/// Number of leading rows scanned for a header before falling back to row 0.
pub const HEADER_SCAN_WINDOW: usize = 5;

/// Find the header row index within the scan window.
///
/// A row qualifies when any of its cells, trimmed and lowercased, equals one
/// of [`HEADER_KEYWORDS`]. Falls back to 0 when no row in the window matches,
/// so a sheet with unrecognized headers is still read as a table.
pub fn find_header_row(rows: &[Vec<CellValue>]) -> usize {
    for (idx, row) in rows.iter().take(HEADER_SCAN_WINDOW).enumerate() {
        let matched = row.iter().any(|cell| {
            let text = cell.to_text();
            HEADER_KEYWORDS.contains(&text.trim().to_lowercase().as_str())
        });
        if matched {
            return idx;
        }
    }
    0
}

/// Python-facing header detection over plain string rows.
#[pyfunction]
pub fn detect_header_row(rows: Vec<Vec<String>>) -> usize {
    let cell_rows: Vec<Vec<CellValue>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(crate::sheets::cells::text_cell).collect())
        .collect();
    find_header_row(&cell_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to build a row of text cells.
    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells
            .iter()
            .map(|s| crate::sheets::cells::text_cell(s.to_string()))
            .collect()
    }

    #[test]
    fn test_header_on_first_row() {
        let rows = vec![row(&["Title", "GTIN"]), row(&["Aquafina", "123"])];
        assert_eq!(find_header_row(&rows), 0);
    }

    #[test]
    fn test_header_after_banner_rows() {
        let rows = vec![
            row(&["Export 2024-01-15"]),
            row(&[]),
            row(&["UPC", "Description"]),
            row(&["12345", "Water"]),
        ];
        assert_eq!(find_header_row(&rows), 2);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_and_trimmed() {
        let rows = vec![row(&["  BARCODE  ", "whatever"])];
        assert_eq!(find_header_row(&rows), 0);
    }

    #[test]
    fn test_no_keyword_falls_back_to_zero() {
        let rows = vec![row(&["col_a", "col_b"]), row(&["1", "2"])];
        assert_eq!(find_header_row(&rows), 0);
    }

    #[test]
    fn test_keyword_outside_window_is_ignored() {
        let mut rows = vec![row(&["x"]); HEADER_SCAN_WINDOW];
        rows.push(row(&["barcode"]));
        assert_eq!(find_header_row(&rows), 0);
    }

    #[test]
    fn test_detect_header_row_over_strings() {
        let rows = vec![
            vec!["junk".to_string()],
            vec!["Title".to_string(), "UPC".to_string()],
        ];
        assert_eq!(detect_header_row(rows), 1);
    }
}

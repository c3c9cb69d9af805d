//! Workbook writing via umya-spreadsheet.

use std::io::Cursor;

use tracing::debug;

use crate::errors::{MergeError, MergeResult};
use crate::sheets::cells::CellValue;

/// Serialize a column list plus data rows into a single-sheet xlsx payload.
///
/// The header row is written bold. Text cells are forced to string type;
/// plain `set_value` re-detects digit strings as numbers, which would drop
/// the zero padding on normalized barcodes.
pub fn write_table_bytes(columns: &[String], rows: &[Vec<CellValue>]) -> MergeResult<Vec<u8>> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| MergeError::Workbook("default sheet missing".to_string()))?;

    for (col_idx, name) in columns.iter().enumerate() {
        let cell = sheet.get_cell_mut(((col_idx as u32) + 1, 1u32));
        cell.set_value_string(name.as_str());
        cell.get_style_mut().get_font_mut().set_bold(true);
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = (row_idx as u32) + 2;
        for (col_idx, value) in row.iter().enumerate() {
            let coord = ((col_idx as u32) + 1, row_num);
            match value {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    sheet.get_cell_mut(coord).set_value_string(s.as_str());
                }
                CellValue::Number(n) => {
                    sheet.get_cell_mut(coord).set_value_number(*n);
                }
                CellValue::Bool(b) => {
                    sheet.get_cell_mut(coord).set_value_bool(*b);
                }
            }
        }
    }

    let mut buf = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buf)
        .map_err(|e| MergeError::Workbook(format!("failed to serialize workbook: {e}")))?;
    debug!("wrote workbook: {} columns, {} rows", columns.len(), rows.len());
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_still_serializes_header() {
        let columns = vec!["barcode".to_string(), "name".to_string()];
        let bytes = write_table_bytes(&columns, &[]).unwrap();
        assert!(!bytes.is_empty());

        let grids = crate::sheets::read::read_workbook_bytes(&bytes).unwrap();
        assert_eq!(grids[0].rows.len(), 1);
        assert_eq!(grids[0].rows[0][0].to_text(), "barcode");
    }

    #[test]
    fn test_digit_string_is_not_coerced_to_number() {
        let columns = vec!["barcode".to_string()];
        let rows = vec![vec![CellValue::Text("000000000042".to_string())]];
        let bytes = write_table_bytes(&columns, &rows).unwrap();

        let grids = crate::sheets::read::read_workbook_bytes(&bytes).unwrap();
        assert_eq!(
            grids[0].rows[1][0],
            CellValue::Text("000000000042".to_string())
        );
    }
}

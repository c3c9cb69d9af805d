//! Workbook reading via calamine.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use tracing::{debug, warn};

use crate::errors::{MergeError, MergeResult};
use crate::sheets::cells::CellValue;

/// One sheet materialized as a dense grid anchored at cell A1.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

/// Read every sheet of an in-memory workbook payload.
pub fn read_workbook_bytes(bytes: &[u8]) -> MergeResult<Vec<SheetGrid>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| MergeError::Workbook(format!("failed to open workbook: {e}")))?;
    collect_grids(&mut workbook)
}

/// Read every sheet of a workbook on disk.
pub fn read_workbook_path(path: &Path) -> MergeResult<Vec<SheetGrid>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| MergeError::Workbook(format!("failed to open {}: {e}", path.display())))?;
    collect_grids(&mut workbook)
}

fn collect_grids<RS>(workbook: &mut Sheets<RS>) -> MergeResult<Vec<SheetGrid>>
where
    RS: std::io::Read + std::io::Seek,
{
    let sheet_names = workbook.sheet_names().to_vec();
    let mut grids = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| MergeError::Workbook(format!("sheet {name:?}: {e}")))?;
        let rows = grid_rows(&range);
        if rows.is_empty() {
            warn!("sheet {name:?} is empty");
        } else {
            debug!("read sheet {:?}: {} rows", name, rows.len());
        }
        grids.push(SheetGrid { name, rows });
    }
    Ok(grids)
}

/// Calamine ranges are anchored at the first used cell; pad the leading
/// empty rows and columns back so row indices stay absolute.
fn grid_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((row_start, col_start)) = range.start() else {
        return Vec::new();
    };
    let mut rows = Vec::with_capacity(row_start as usize + range.height());
    for _ in 0..row_start {
        rows.push(Vec::new());
    }
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; col_start as usize];
        cells.extend(row.iter().map(CellValue::from_data));
        rows.push(cells);
    }
    rows
}

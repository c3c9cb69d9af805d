//! Table assembly from raw sheet grids.
//!
//! Source workbooks may spread rows over several sheets with roughly the
//! same columns. [`build_source_table`] unions them into one table: columns
//! are keyed by normalized name, display names come from the first sheet
//! that mentions them, and rows from sheets missing a column get empty
//! cells there. The catalog side is stricter; [`build_catalog_table`]
//! expects a single tabular sheet with a literal `barcode` header.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::errors::{MergeError, MergeResult};
use crate::ingest::columns::normalize_name;
use crate::ingest::header::find_header_row;
use crate::sheets::cells::CellValue;
use crate::sheets::read::SheetGrid;

/// Header name the catalog workbook must carry for its key column.
pub const CATALOG_BARCODE_COLUMN: &str = "barcode";

/// Per-sheet ingest summary, reported back to the caller.
#[derive(Debug, Clone)]
pub struct SheetSummary {
    pub name: String,
    pub header_row: usize,
    pub data_rows: usize,
}

/// Unioned source table across all sheets of the source workbook.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub sheets: Vec<SheetSummary>,
}

impl SourceTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Union all sheets into a single table.
///
/// `header_row` pins the header index for every sheet; `None` runs the
/// keyword detector per sheet. Columns whose header cell is blank are
/// skipped, and when two columns of one sheet normalize to the same name
/// only the first carries data.
pub fn build_source_table(grids: &[SheetGrid], header_row: Option<usize>) -> SourceTable {
    let mut columns: Vec<String> = Vec::new();
    let mut by_norm: IndexMap<String, usize> = IndexMap::new();
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    let mut sheets: Vec<SheetSummary> = Vec::new();

    for grid in grids {
        let hdr = header_row.unwrap_or_else(|| find_header_row(&grid.rows));
        if grid.rows.len() <= hdr {
            warn!(
                "sheet {:?} has no header at row {}; skipping",
                grid.name, hdr
            );
            sheets.push(SheetSummary {
                name: grid.name.clone(),
                header_row: hdr,
                data_rows: 0,
            });
            continue;
        }

        let header = &grid.rows[hdr];
        let mut col_map: Vec<Option<usize>> = Vec::with_capacity(header.len());
        let mut seen: HashSet<usize> = HashSet::new();
        for cell in header {
            let text = cell.to_text();
            let norm = normalize_name(&text);
            if norm.is_empty() {
                warn!("sheet {:?}: skipping column with empty header", grid.name);
                col_map.push(None);
                continue;
            }
            let idx = *by_norm.entry(norm).or_insert_with(|| {
                columns.push(text.clone());
                columns.len() - 1
            });
            if seen.insert(idx) {
                col_map.push(Some(idx));
            } else {
                warn!(
                    "sheet {:?}: duplicate column {:?} ignored",
                    grid.name, text
                );
                col_map.push(None);
            }
        }

        let mut data_rows = 0usize;
        for row in grid.rows.iter().skip(hdr + 1) {
            let mut out = vec![CellValue::Empty; columns.len()];
            for (pos, target) in col_map.iter().enumerate() {
                if let Some(target) = target {
                    if let Some(value) = row.get(pos) {
                        out[*target] = value.clone();
                    }
                }
            }
            rows.push(out);
            data_rows += 1;
        }

        debug!(
            "sheet {:?}: header row {}, {} data rows",
            grid.name, hdr, data_rows
        );
        sheets.push(SheetSummary {
            name: grid.name.clone(),
            header_row: hdr,
            data_rows,
        });
    }

    // Rows ingested before a later sheet introduced new columns are short.
    for row in &mut rows {
        row.resize(columns.len(), CellValue::Empty);
    }

    SourceTable {
        columns,
        rows,
        sheets,
    }
}

// ---------------------------------------------------------------------------
// Catalog side
// ---------------------------------------------------------------------------

/// The partner catalog table: first sheet, header on row 0.
#[derive(Debug, Clone)]
pub struct CatalogTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub barcode_idx: usize,
}

/// Read the catalog table out of its sheet grids.
pub fn build_catalog_table(grids: &[SheetGrid]) -> MergeResult<CatalogTable> {
    let grid = grids.first().ok_or_else(|| {
        MergeError::CatalogSchema("catalog workbook has no sheets".to_string())
    })?;
    if grids.len() > 1 {
        warn!(
            "catalog workbook has {} sheets; only {:?} is used",
            grids.len(),
            grid.name
        );
    }

    let header = grid.rows.first().ok_or_else(|| {
        MergeError::CatalogSchema("catalog sheet has no header row".to_string())
    })?;
    let width = grid.rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut columns: Vec<String> = header.iter().map(|c| c.to_text()).collect();
    columns.resize(width, String::new());

    let barcode_idx = columns
        .iter()
        .position(|c| c == CATALOG_BARCODE_COLUMN)
        .ok_or_else(|| {
            MergeError::CatalogSchema(format!(
                "catalog is missing the {CATALOG_BARCODE_COLUMN:?} column"
            ))
        })?;

    let mut rows: Vec<Vec<CellValue>> = grid.rows[1..].to_vec();
    for row in &mut rows {
        row.resize(width, CellValue::Empty);
    }

    debug!("catalog: {} columns, {} rows", columns.len(), rows.len());
    Ok(CatalogTable {
        columns,
        rows,
        barcode_idx,
    })
}

//! Set reconciliation between source barcodes and the catalog.

use std::collections::HashSet;

use tracing::info;

use crate::ingest::table::{CatalogTable, SourceTable};
use crate::merge::barcode::normalize_cell;
use crate::sheets::cells::CellValue;

/// Outcome of comparing the source barcodes against the catalog set.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Source row indices whose barcode is absent from the catalog, in
    /// source order. Duplicate source barcodes are labeled independently,
    /// so a repeated new barcode appears here once per row.
    pub new_indices: Vec<usize>,
    /// Count of source rows whose barcode the catalog already has.
    pub existing: usize,
}

/// Normalize the catalog's barcode column in place and collect the set.
///
/// Catalog rows keep their normalized barcode text in the output workbook,
/// so both sides of the comparison and the written file agree.
pub fn catalog_barcode_set(catalog: &mut CatalogTable) -> HashSet<String> {
    let idx = catalog.barcode_idx;
    let mut set = HashSet::with_capacity(catalog.rows.len());
    for row in &mut catalog.rows {
        if let Some(cell) = row.get_mut(idx) {
            let normalized = normalize_cell(cell);
            *cell = CellValue::Text(normalized.clone());
            set.insert(normalized);
        }
    }
    set
}

/// Normalized barcodes of every source row, in row order.
pub fn source_barcodes(source: &SourceTable, barcode_idx: usize) -> Vec<String> {
    source
        .rows
        .iter()
        .map(|row| normalize_cell(row.get(barcode_idx).unwrap_or(&CellValue::Empty)))
        .collect()
}

/// Label each source row as existing or new against the catalog set.
pub fn reconcile(barcodes: &[String], catalog_set: &HashSet<String>) -> Reconciliation {
    let mut new_indices = Vec::new();
    let mut existing = 0usize;
    for (idx, barcode) in barcodes.iter().enumerate() {
        if catalog_set.contains(barcode) {
            existing += 1;
        } else {
            new_indices.push(idx);
        }
    }
    info!(
        "reconciled {} rows: {} existing, {} new",
        barcodes.len(),
        existing,
        new_indices.len()
    );
    Reconciliation {
        new_indices,
        existing,
    }
}

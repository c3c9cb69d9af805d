//! End-to-end merge pipeline and its Python entry points.
//!
//! One call reads the source and catalog workbooks, unions the source
//! sheets, resolves columns to roles, reconciles barcodes, projects the
//! new rows, and serializes the appended catalog. Everything in between
//! is pure; the Python layer only hands in bytes and shows the results.

use std::time::Instant;

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::errors::MergeResult;
use crate::ingest::columns::{resolve_roles, Role, RoleIndices, RoleMap, RoleOverrides};
use crate::ingest::table::{build_catalog_table, build_source_table};
use crate::merge::config::MergeProfile;
use crate::merge::project::project_new_rows;
use crate::merge::reconcile::{catalog_barcode_set, reconcile, source_barcodes};
use crate::models::{ColumnMap, MergeStats};
use crate::sheets::read::read_workbook_bytes;
use crate::sheets::write::write_table_bytes;

/// Counters and digests describing one merge run.
pub struct RunStats {
    pub source_sheets: usize,
    pub source_rows: usize,
    pub existing_rows: usize,
    pub new_rows: usize,
    pub catalog_rows: usize,
    pub output_rows: usize,
    pub elapsed_ms: i64,
    pub source_sha256: String,
    pub catalog_sha256: String,
}

/// Everything a merge run produces.
pub struct MergeOutcome {
    pub workbook: Vec<u8>,
    pub columns: Vec<String>,
    pub roles: RoleMap,
    pub stats: RunStats,
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Run the merge over raw workbook bytes.
pub fn run_merge_impl(
    source_bytes: &[u8],
    catalog_bytes: &[u8],
    profile: &MergeProfile,
    overrides: &RoleOverrides,
) -> MergeResult<MergeOutcome> {
    let started = Instant::now();

    let source_grids = read_workbook_bytes(source_bytes)?;
    let source = build_source_table(&source_grids, profile.header_row_index()?);
    let aliases = profile.alias_table();
    let roles = resolve_roles(&source.columns, &aliases, overrides)?;
    let idx = RoleIndices::bind(&source, &roles)?;

    let catalog_grids = read_workbook_bytes(catalog_bytes)?;
    let mut catalog = build_catalog_table(&catalog_grids)?;
    let catalog_rows = catalog.rows.len();
    let catalog_set = catalog_barcode_set(&mut catalog);

    let barcodes = source_barcodes(&source, idx.barcode);
    let rec = reconcile(&barcodes, &catalog_set);

    let projected = project_new_rows(
        &source,
        &idx,
        profile,
        &rec.new_indices,
        &barcodes,
        &catalog.columns,
    );
    catalog.rows.extend(projected);

    let workbook = write_table_bytes(&catalog.columns, &catalog.rows)?;

    let stats = RunStats {
        source_sheets: source.sheets.len(),
        source_rows: source.rows.len(),
        existing_rows: rec.existing,
        new_rows: rec.new_indices.len(),
        catalog_rows,
        output_rows: catalog.rows.len(),
        elapsed_ms: started.elapsed().as_millis() as i64,
        source_sha256: sha256_hex(source_bytes),
        catalog_sha256: sha256_hex(catalog_bytes),
    };
    info!(
        "merge complete: {} source rows, {} existing, {} new, {} output rows in {}ms",
        stats.source_rows, stats.existing_rows, stats.new_rows, stats.output_rows,
        stats.elapsed_ms
    );

    Ok(MergeOutcome {
        workbook,
        columns: catalog.columns,
        roles,
        stats,
    })
}

/// Describe the source workbook without merging anything.
pub fn inspect_source_impl(
    source_bytes: &[u8],
    profile: &MergeProfile,
    overrides: &RoleOverrides,
) -> MergeResult<serde_json::Value> {
    let grids = read_workbook_bytes(source_bytes)?;
    let source = build_source_table(&grids, profile.header_row_index()?);
    let aliases = profile.alias_table();
    let roles = resolve_roles(&source.columns, &aliases, overrides)?;

    let role_payload: serde_json::Map<String, serde_json::Value> = Role::ALL
        .iter()
        .map(|role| {
            let value = roles
                .get(*role)
                .map(|name| serde_json::Value::String(name.to_string()))
                .unwrap_or(serde_json::Value::Null);
            (role.key().to_string(), value)
        })
        .collect();

    let sheets: Vec<serde_json::Value> = source
        .sheets
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.name,
                "header_row": s.header_row,
                "data_rows": s.data_rows,
            })
        })
        .collect();

    Ok(serde_json::json!({
        "columns": source.columns,
        "roles": role_payload,
        "sheets": sheets,
        "rows": source.rows.len(),
    }))
}

// ---------------------------------------------------------------------------
// Python surface
// ---------------------------------------------------------------------------

/// Full merge exposed to Python; returns a dict with the output workbook
/// bytes, its column order, the resolved roles, and run statistics.
#[pyfunction]
#[pyo3(signature = (source, catalog, profile=None, barcode_column=None, description_column=None))]
pub fn run_merge(
    py: Python<'_>,
    source: &[u8],
    catalog: &[u8],
    profile: Option<MergeProfile>,
    barcode_column: Option<String>,
    description_column: Option<String>,
) -> PyResult<PyObject> {
    let profile = profile.unwrap_or_default();
    let overrides = RoleOverrides {
        barcode: barcode_column,
        description: description_column,
    };
    let outcome = run_merge_impl(source, catalog, &profile, &overrides)?;

    let result = PyDict::new(py);
    result.set_item("workbook", PyBytes::new(py, &outcome.workbook))?;
    result.set_item("columns", outcome.columns)?;
    result.set_item("roles", ColumnMap::from(&outcome.roles))?;
    result.set_item("stats", MergeStats::from(&outcome.stats))?;
    Ok(result.into())
}

/// Source inspection exposed to Python.
#[pyfunction]
#[pyo3(signature = (source, profile=None, barcode_column=None, description_column=None))]
pub fn inspect_source(
    py: Python<'_>,
    source: &[u8],
    profile: Option<MergeProfile>,
    barcode_column: Option<String>,
    description_column: Option<String>,
) -> PyResult<PyObject> {
    let profile = profile.unwrap_or_default();
    let overrides = RoleOverrides {
        barcode: barcode_column,
        description: description_column,
    };
    let result = inspect_source_impl(source, &profile, &overrides)?;
    let json_str = serde_json::to_string(&result)
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;
    let json_module = py.import("json")?;
    json_module
        .call_method1("loads", (json_str,))
        .map(|o| o.into())
}

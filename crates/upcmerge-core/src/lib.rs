//! Upcmerge core library — Rust backend for the UPC catalog merge tool.
//!
//! This crate reads a cleaned UPC list and a partner catalog workbook,
//! reconciles the two by normalized barcode, derives brand, category, and
//! size attributes for the rows the catalog is missing, and serializes the
//! appended catalog.  It is compiled as a Python extension module
//! (`_upcmerge_core`) via PyO3; the interactive surface lives in the
//! embedding Python app.

pub mod errors;
pub mod ingest;
pub mod merge;
pub mod models;
pub mod sheets;

use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

// ---------------------------------------------------------------------------
// Top-level Python module: _upcmerge_core
// ---------------------------------------------------------------------------

#[pymodule]
fn _upcmerge_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // -- Models (contract pyclasses) ------------------------------------------
    models::register_models(m)?;

    // -- Profiles -------------------------------------------------------------
    m.add_class::<merge::config::MergeProfile>()?;
    m.add("PROFILE_PRESETS", merge::config::PROFILE_PRESETS.to_vec())?;

    // -- Pipeline constants ---------------------------------------------------
    m.add("BARCODE_WIDTH", merge::barcode::BARCODE_WIDTH)?;
    m.add("FIELD_SENTINEL", merge::FIELD_SENTINEL)?;
    m.add("COUNT_UNIT", merge::attributes::COUNT_UNIT)?;
    m.add("HEADER_KEYWORDS", ingest::header::HEADER_KEYWORDS.to_vec())?;
    m.add("HEADER_SCAN_WINDOW", ingest::header::HEADER_SCAN_WINDOW)?;
    m.add(
        "PARTNER_PRODUCT_FLAG",
        merge::project::PARTNER_PRODUCT_FLAG,
    )?;
    m.add("AWARD_POINTS_FLAG", merge::project::AWARD_POINTS_FLAG)?;
    m.add(
        "CATALOG_BARCODE_COLUMN",
        ingest::table::CATALOG_BARCODE_COLUMN,
    )?;

    // -- Pure helpers ---------------------------------------------------------
    m.add_function(wrap_pyfunction!(merge::barcode::normalize_barcode, m)?)?;
    m.add_function(wrap_pyfunction!(merge::attributes::parse_description, m)?)?;
    m.add_function(wrap_pyfunction!(merge::category::split_category, m)?)?;
    m.add_function(wrap_pyfunction!(ingest::header::detect_header_row, m)?)?;
    m.add_function(wrap_pyfunction!(ingest::columns::resolve_columns, m)?)?;

    // -- Merge surface --------------------------------------------------------
    m.add_function(wrap_pyfunction!(merge::run::run_merge, m)?)?;
    m.add_function(wrap_pyfunction!(merge::run::inspect_source, m)?)?;

    Ok(())
}

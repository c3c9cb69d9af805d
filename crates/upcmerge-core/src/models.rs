//! Python-facing contract models returned by the merge entry points.

use pyo3::prelude::*;

use crate::ingest::columns::RoleMap;
use crate::merge::attributes;
use crate::merge::category;
use crate::merge::run::RunStats;

// ---------------------------------------------------------------------------
// 1. ColumnMap
// ---------------------------------------------------------------------------

/// Resolved source column per merge role; `None` means the role found no
/// column.
#[pyclass(frozen, get_all)]
#[derive(Clone, Debug)]
pub struct ColumnMap {
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub segment: Option<String>,
    pub product_type: Option<String>,
}

#[pymethods]
impl ColumnMap {
    #[new]
    #[pyo3(signature = (
        barcode=None,
        description=None,
        brand=None,
        department=None,
        category=None,
        segment=None,
        product_type=None,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        barcode: Option<String>,
        description: Option<String>,
        brand: Option<String>,
        department: Option<String>,
        category: Option<String>,
        segment: Option<String>,
        product_type: Option<String>,
    ) -> Self {
        Self {
            barcode,
            description,
            brand,
            department,
            category,
            segment,
            product_type,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ColumnMap(barcode={:?}, description={:?}, brand={:?}, department={:?}, \
             category={:?}, segment={:?}, product_type={:?})",
            self.barcode,
            self.description,
            self.brand,
            self.department,
            self.category,
            self.segment,
            self.product_type
        )
    }
}

impl From<&RoleMap> for ColumnMap {
    fn from(roles: &RoleMap) -> Self {
        ColumnMap {
            barcode: roles.barcode.clone(),
            description: roles.description.clone(),
            brand: roles.brand.clone(),
            department: roles.department.clone(),
            category: roles.category.clone(),
            segment: roles.segment.clone(),
            product_type: roles.product_type.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// 2. ParsedAttributes
// ---------------------------------------------------------------------------

/// Size and count attributes extracted from a description.
#[pyclass(frozen, get_all)]
#[derive(Clone, Debug)]
pub struct ParsedAttributes {
    pub size_value: Option<String>,
    pub size_measure: Option<String>,
    pub item_count_value: Option<String>,
    pub item_count_measure: Option<String>,
}

#[pymethods]
impl ParsedAttributes {
    #[new]
    #[pyo3(signature = (size_value=None, size_measure=None, item_count_value=None, item_count_measure=None))]
    fn new(
        size_value: Option<String>,
        size_measure: Option<String>,
        item_count_value: Option<String>,
        item_count_measure: Option<String>,
    ) -> Self {
        Self {
            size_value,
            size_measure,
            item_count_value,
            item_count_measure,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ParsedAttributes(size_value={:?}, size_measure={:?}, item_count_value={:?}, \
             item_count_measure={:?})",
            self.size_value, self.size_measure, self.item_count_value, self.item_count_measure
        )
    }
}

impl From<&attributes::ParsedAttributes> for ParsedAttributes {
    fn from(parsed: &attributes::ParsedAttributes) -> Self {
        ParsedAttributes {
            size_value: parsed.size_value.clone(),
            size_measure: parsed.size_measure.map(|u| u.label().to_string()),
            item_count_value: parsed.count_value.clone(),
            item_count_measure: parsed.count_measure().map(str::to_string),
        }
    }
}

// ---------------------------------------------------------------------------
// 3. CategoryLevels
// ---------------------------------------------------------------------------

/// The three classification levels split out of a product-type path.
#[pyclass(frozen, get_all)]
#[derive(Clone, Debug)]
pub struct CategoryLevels {
    pub department: String,
    pub category: String,
    pub segment: String,
}

#[pymethods]
impl CategoryLevels {
    #[new]
    fn new(department: String, category: String, segment: String) -> Self {
        Self {
            department,
            category,
            segment,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CategoryLevels(department={:?}, category={:?}, segment={:?})",
            self.department, self.category, self.segment
        )
    }
}

impl From<category::CategoryLevels> for CategoryLevels {
    fn from(levels: category::CategoryLevels) -> Self {
        CategoryLevels {
            department: levels.department,
            category: levels.category,
            segment: levels.segment,
        }
    }
}

// ---------------------------------------------------------------------------
// 4. MergeStats
// ---------------------------------------------------------------------------

/// Counters and input digests from one merge run.
#[pyclass(frozen, get_all)]
#[derive(Clone, Debug)]
pub struct MergeStats {
    pub source_sheets: i64,
    pub source_rows: i64,
    pub existing_rows: i64,
    pub new_rows: i64,
    pub catalog_rows: i64,
    pub output_rows: i64,
    pub elapsed_ms: i64,
    pub source_sha256: String,
    pub catalog_sha256: String,
}

#[pymethods]
impl MergeStats {
    #[new]
    #[pyo3(signature = (
        source_sheets,
        source_rows,
        existing_rows,
        new_rows,
        catalog_rows,
        output_rows,
        elapsed_ms=0,
        source_sha256=String::new(),
        catalog_sha256=String::new(),
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        source_sheets: i64,
        source_rows: i64,
        existing_rows: i64,
        new_rows: i64,
        catalog_rows: i64,
        output_rows: i64,
        elapsed_ms: i64,
        source_sha256: String,
        catalog_sha256: String,
    ) -> Self {
        Self {
            source_sheets,
            source_rows,
            existing_rows,
            new_rows,
            catalog_rows,
            output_rows,
            elapsed_ms,
            source_sha256,
            catalog_sha256,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "MergeStats(source_rows={}, existing_rows={}, new_rows={}, output_rows={}, \
             elapsed_ms={})",
            self.source_rows, self.existing_rows, self.new_rows, self.output_rows,
            self.elapsed_ms
        )
    }
}

impl From<&RunStats> for MergeStats {
    fn from(stats: &RunStats) -> Self {
        MergeStats {
            source_sheets: stats.source_sheets as i64,
            source_rows: stats.source_rows as i64,
            existing_rows: stats.existing_rows as i64,
            new_rows: stats.new_rows as i64,
            catalog_rows: stats.catalog_rows as i64,
            output_rows: stats.output_rows as i64,
            elapsed_ms: stats.elapsed_ms,
            source_sha256: stats.source_sha256.clone(),
            catalog_sha256: stats.catalog_sha256.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Register all model classes into the Python module.
pub fn register_models(m: &Bound<'_, pyo3::types::PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<ColumnMap>()?;
    m.add_class::<ParsedAttributes>()?;
    m.add_class::<CategoryLevels>()?;
    m.add_class::<MergeStats>()?;

    Ok(())
}

//! Category path splitting.
//!
//! Supplier feeds carry the classification as one `>`-delimited path,
//! "Beverages > Soda > Cola". The splitter breaks it into department,
//! category, and segment levels. Missing levels fill with the sentinel;
//! levels past the third are dropped.

use pyo3::prelude::*;

use crate::merge::FIELD_SENTINEL;
use crate::models;

/// Level separator inside a product-type path.
pub const CATEGORY_DELIMITER: char = '>';

/// The three classification levels of a catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLevels {
    pub department: String,
    pub category: String,
    pub segment: String,
}

impl CategoryLevels {
    /// All three levels filled with the sentinel.
    pub fn sentinel() -> CategoryLevels {
        CategoryLevels {
            department: FIELD_SENTINEL.to_string(),
            category: FIELD_SENTINEL.to_string(),
            segment: FIELD_SENTINEL.to_string(),
        }
    }
}

/// Split a product-type path into its three levels.
pub fn split_category_impl(raw: &str) -> CategoryLevels {
    if raw.trim().is_empty() {
        return CategoryLevels::sentinel();
    }

    let parts: Vec<&str> = raw.split(CATEGORY_DELIMITER).map(str::trim).collect();
    let level = |i: usize| parts.get(i).copied().unwrap_or(FIELD_SENTINEL).to_string();

    CategoryLevels {
        department: level(0),
        category: level(1),
        segment: level(2),
    }
}

/// Python-facing category splitting; `None` counts as a missing path.
#[pyfunction]
#[pyo3(signature = (text=None))]
pub fn split_category(text: Option<&str>) -> models::CategoryLevels {
    let levels = match text {
        Some(text) => split_category_impl(text),
        None => CategoryLevels::sentinel(),
    };
    models::CategoryLevels::from(levels)
}

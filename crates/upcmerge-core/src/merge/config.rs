//! Merge profiles.
//!
//! A [`MergeProfile`] parameterizes the whole pipeline for one feed shape:
//! where the header row sits, which column names fill each role, whether
//! size and count attributes are parsed out of descriptions, and whether
//! the category levels come from splitting a product-type path or from
//! dedicated columns. Named presets cover the known partner and supplier
//! feeds; `auto` is the tolerant default.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{MergeError, MergeResult};
use crate::ingest::columns::Role;

/// Names accepted by [`MergeProfile::from_preset`].
pub const PROFILE_PRESETS: &[&str] = &[
    "auto",
    "partner-export",
    "partner-export-sized",
    "supplier-feed",
    "supplier-feed-titled",
];

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Pipeline configuration for one merge run.
#[pyclass(frozen, get_all)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeProfile {
    /// Fixed header row index for every sheet, or `None` to detect per sheet.
    pub header_row: Option<i64>,
    pub barcode_aliases: Vec<String>,
    pub description_aliases: Vec<String>,
    pub brand_aliases: Vec<String>,
    pub department_aliases: Vec<String>,
    pub category_aliases: Vec<String>,
    pub segment_aliases: Vec<String>,
    pub product_type_aliases: Vec<String>,
    /// Parse size and count attributes out of the description text.
    pub parse_attributes: bool,
    /// Derive the category levels by splitting the product-type path.
    /// When false they come from the department/category/segment columns,
    /// uppercased.
    pub split_product_type: bool,
}

impl Default for MergeProfile {
    fn default() -> Self {
        Self::auto()
    }
}

impl MergeProfile {
    /// Tolerant default: detected header, common alias names, full
    /// attribute extraction.
    pub fn auto() -> Self {
        MergeProfile {
            header_row: None,
            barcode_aliases: aliases(&["gtin", "upc", "barcode"]),
            description_aliases: aliases(&["title", "description"]),
            brand_aliases: aliases(&["brand"]),
            department_aliases: Vec::new(),
            category_aliases: Vec::new(),
            segment_aliases: Vec::new(),
            product_type_aliases: aliases(&["product_type"]),
            parse_attributes: true,
            split_product_type: true,
        }
    }

    /// Partner back-office export: header on row 0, category levels in
    /// dedicated columns, no attribute parsing.
    pub fn partner_export() -> Self {
        MergeProfile {
            header_row: Some(0),
            barcode_aliases: aliases(&["barcode", "upc"]),
            description_aliases: aliases(&[
                "description",
                "name",
                "product / fido id",
                "product name",
                "product description",
            ]),
            brand_aliases: aliases(&["brand"]),
            department_aliases: aliases(&["department", "category 1", "category_1"]),
            category_aliases: aliases(&["category", "category 2", "category_2"]),
            segment_aliases: aliases(&["segment", "category 3", "category_3"]),
            product_type_aliases: Vec::new(),
            parse_attributes: false,
            split_product_type: false,
        }
    }

    /// Partner export with size and count parsing switched on.
    pub fn partner_export_sized() -> Self {
        MergeProfile {
            parse_attributes: true,
            ..Self::partner_export()
        }
    }

    /// Supplier feed: two banner rows above the header, categories carried
    /// as a `>`-delimited product-type path.
    pub fn supplier_feed() -> Self {
        MergeProfile {
            header_row: Some(2),
            barcode_aliases: aliases(&["gtin", "barcode"]),
            description_aliases: aliases(&["description", "title"]),
            brand_aliases: aliases(&["brand"]),
            department_aliases: Vec::new(),
            category_aliases: Vec::new(),
            segment_aliases: Vec::new(),
            product_type_aliases: aliases(&["product_type"]),
            parse_attributes: true,
            split_product_type: true,
        }
    }

    /// Supplier feed whose descriptions live in a `title` column.
    pub fn supplier_feed_titled() -> Self {
        MergeProfile {
            description_aliases: aliases(&["title", "description"]),
            ..Self::supplier_feed()
        }
    }

    /// Look up a preset by name.
    pub fn from_preset(name: &str) -> MergeResult<Self> {
        match name {
            "auto" => Ok(Self::auto()),
            "partner-export" => Ok(Self::partner_export()),
            "partner-export-sized" => Ok(Self::partner_export_sized()),
            "supplier-feed" => Ok(Self::supplier_feed()),
            "supplier-feed-titled" => Ok(Self::supplier_feed_titled()),
            other => Err(MergeError::Profile(format!(
                "unknown preset {other:?}; expected one of {PROFILE_PRESETS:?}"
            ))),
        }
    }

    /// Role alias lists in resolution order.
    pub fn alias_table(&self) -> [(Role, &[String]); 7] {
        [
            (Role::Barcode, self.barcode_aliases.as_slice()),
            (Role::Description, self.description_aliases.as_slice()),
            (Role::Brand, self.brand_aliases.as_slice()),
            (Role::Department, self.department_aliases.as_slice()),
            (Role::Category, self.category_aliases.as_slice()),
            (Role::Segment, self.segment_aliases.as_slice()),
            (Role::ProductType, self.product_type_aliases.as_slice()),
        ]
    }

    /// Validated header row index.
    pub fn header_row_index(&self) -> MergeResult<Option<usize>> {
        match self.header_row {
            None => Ok(None),
            Some(n) if n < 0 => Err(MergeError::Profile(format!(
                "header_row must be non-negative, got {n}"
            ))),
            Some(n) => Ok(Some(n as usize)),
        }
    }
}

#[pymethods]
impl MergeProfile {
    #[new]
    #[pyo3(signature = (
        header_row=None,
        barcode_aliases=None,
        description_aliases=None,
        brand_aliases=None,
        department_aliases=None,
        category_aliases=None,
        segment_aliases=None,
        product_type_aliases=None,
        parse_attributes=true,
        split_product_type=true,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        header_row: Option<i64>,
        barcode_aliases: Option<Vec<String>>,
        description_aliases: Option<Vec<String>>,
        brand_aliases: Option<Vec<String>>,
        department_aliases: Option<Vec<String>>,
        category_aliases: Option<Vec<String>>,
        segment_aliases: Option<Vec<String>>,
        product_type_aliases: Option<Vec<String>>,
        parse_attributes: bool,
        split_product_type: bool,
    ) -> Self {
        let base = Self::auto();
        MergeProfile {
            header_row,
            barcode_aliases: barcode_aliases.unwrap_or(base.barcode_aliases),
            description_aliases: description_aliases.unwrap_or(base.description_aliases),
            brand_aliases: brand_aliases.unwrap_or(base.brand_aliases),
            department_aliases: department_aliases.unwrap_or(base.department_aliases),
            category_aliases: category_aliases.unwrap_or(base.category_aliases),
            segment_aliases: segment_aliases.unwrap_or(base.segment_aliases),
            product_type_aliases: product_type_aliases.unwrap_or(base.product_type_aliases),
            parse_attributes,
            split_product_type,
        }
    }

    /// Construct a preset profile by name.
    #[staticmethod]
    fn preset(name: &str) -> PyResult<Self> {
        Ok(Self::from_preset(name)?)
    }

    /// Serialize the profile to a JSON string.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(self).map_err(|e| PyErr::from(MergeError::Json(e)))
    }

    /// Rebuild a profile from its JSON form.
    #[staticmethod]
    fn from_json(data: &str) -> PyResult<Self> {
        serde_json::from_str(data)
            .map_err(|e| PyErr::from(MergeError::Profile(format!("bad profile JSON: {e}"))))
    }

    fn __repr__(&self) -> String {
        format!(
            "MergeProfile(header_row={:?}, parse_attributes={}, split_product_type={})",
            self.header_row, self.parse_attributes, self.split_product_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_name_resolves() {
        for name in PROFILE_PRESETS {
            assert!(MergeProfile::from_preset(name).is_ok(), "preset {name}");
        }
    }

    #[test]
    fn test_unknown_preset_errors() {
        let err = MergeProfile::from_preset("bogus").unwrap_err();
        assert!(matches!(err, MergeError::Profile(_)));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_default_is_auto() {
        let profile = MergeProfile::default();
        assert_eq!(profile.header_row, None);
        assert!(profile.parse_attributes);
        assert!(profile.split_product_type);
        assert_eq!(profile.barcode_aliases[0], "gtin");
    }

    #[test]
    fn test_partner_export_shape() {
        let profile = MergeProfile::partner_export();
        assert_eq!(profile.header_row, Some(0));
        assert!(!profile.parse_attributes);
        assert!(!profile.split_product_type);
        assert!(profile
            .department_aliases
            .contains(&"category 1".to_string()));
    }

    #[test]
    fn test_sized_variant_only_flips_parsing() {
        let base = MergeProfile::partner_export();
        let sized = MergeProfile::partner_export_sized();
        assert!(sized.parse_attributes);
        assert_eq!(sized.header_row, base.header_row);
        assert_eq!(sized.description_aliases, base.description_aliases);
        assert_eq!(sized.split_product_type, base.split_product_type);
    }

    #[test]
    fn test_titled_variant_prefers_title() {
        let profile = MergeProfile::supplier_feed_titled();
        assert_eq!(profile.description_aliases[0], "title");
        assert_eq!(profile.header_row, Some(2));
    }

    #[test]
    fn test_negative_header_row_rejected() {
        let profile = MergeProfile {
            header_row: Some(-1),
            ..MergeProfile::auto()
        };
        assert!(profile.header_row_index().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let profile = MergeProfile::supplier_feed();
        let json = serde_json::to_string(&profile).unwrap();
        let back: MergeProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.header_row, Some(2));
        assert_eq!(back.barcode_aliases, profile.barcode_aliases);
    }
}

//! Projection of new source rows into catalog-shaped rows.
//!
//! Each new row becomes a record keyed by the partner's field names, then
//! gets laid out in the catalog's own column order. Catalog columns the
//! record does not know stay empty. Classification fields distinguish a
//! role with no source column (sentinel text) from a resolved column whose
//! cell happens to be blank (empty cell).

use indexmap::IndexMap;

use crate::ingest::columns::RoleIndices;
use crate::ingest::table::SourceTable;
use crate::merge::attributes::parse_description_impl;
use crate::merge::category::{split_category_impl, CategoryLevels};
use crate::merge::config::MergeProfile;
use crate::merge::FIELD_SENTINEL;
use crate::sheets::cells::{text_cell, CellValue};

/// Flag written to `partnerProduct` on every appended row.
pub const PARTNER_PRODUCT_FLAG: &str = "Y";

/// Flag written to `awardPoints` on every appended row.
pub const AWARD_POINTS_FLAG: &str = "N";

/// Project the new source rows into rows matching `catalog_columns`.
///
/// `barcodes` holds the normalized barcode of every source row, indexed
/// like `source.rows`; `new_indices` selects which rows to project.
pub fn project_new_rows(
    source: &SourceTable,
    idx: &RoleIndices,
    profile: &MergeProfile,
    new_indices: &[usize],
    barcodes: &[String],
    catalog_columns: &[String],
) -> Vec<Vec<CellValue>> {
    new_indices
        .iter()
        .map(|&row_idx| {
            let record = build_record(&source.rows[row_idx], idx, profile, &barcodes[row_idx]);
            catalog_columns
                .iter()
                .map(|col| {
                    record
                        .get(col.as_str())
                        .cloned()
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect()
}

fn build_record(
    row: &[CellValue],
    idx: &RoleIndices,
    profile: &MergeProfile,
    barcode: &str,
) -> IndexMap<&'static str, CellValue> {
    let cell = |i: usize| row.get(i).cloned().unwrap_or(CellValue::Empty);
    let description = cell(idx.description);

    let mut record: IndexMap<&'static str, CellValue> = IndexMap::new();
    record.insert("barcode", CellValue::Text(barcode.to_string()));
    record.insert("bh2Brand", upper_or_sentinel(idx.brand.map(|i| cell(i))));
    record.insert("name", description.clone());
    record.insert("description", description.clone());

    if profile.split_product_type {
        // Path levels are written as split, not uppercased.
        let levels = match idx.product_type {
            Some(pt) => split_category_impl(&cell(pt).to_text()),
            None => CategoryLevels::sentinel(),
        };
        record.insert("ch1Department", text_cell(levels.department));
        record.insert("ch2Category", text_cell(levels.category));
        record.insert("ch3Segment", text_cell(levels.segment));
    } else {
        record.insert(
            "ch1Department",
            upper_or_sentinel(idx.department.map(|i| cell(i))),
        );
        record.insert(
            "ch2Category",
            upper_or_sentinel(idx.category.map(|i| cell(i))),
        );
        record.insert(
            "ch3Segment",
            upper_or_sentinel(idx.segment.map(|i| cell(i))),
        );
    }

    if profile.parse_attributes {
        let parsed = parse_description_impl(&description.to_text());
        record.insert("itemCountValue", opt_text(parsed.count_value.clone()));
        record.insert(
            "itemCountMeasure",
            opt_text(parsed.count_measure().map(str::to_string)),
        );
        record.insert("sizeValue", opt_text(parsed.size_value.clone()));
        record.insert(
            "sizeMeasure",
            opt_text(parsed.size_measure.map(|u| u.label().to_string())),
        );
    }

    record.insert(
        "partnerProduct",
        CellValue::Text(PARTNER_PRODUCT_FLAG.to_string()),
    );
    record.insert(
        "awardPoints",
        CellValue::Text(AWARD_POINTS_FLAG.to_string()),
    );
    record
}

/// Sentinel text when the role has no source column; otherwise the cell's
/// text, uppercased. A resolved column with a blank cell stays blank.
fn upper_or_sentinel(value: Option<CellValue>) -> CellValue {
    match value {
        None => CellValue::Text(FIELD_SENTINEL.to_string()),
        Some(v) => text_cell(v.to_text().to_uppercase()),
    }
}

fn opt_text(value: Option<String>) -> CellValue {
    match value {
        Some(s) => CellValue::Text(s),
        None => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::cells::text_cell;

    fn partner_columns() -> Vec<String> {
        [
            "barcode",
            "bh2Brand",
            "name",
            "description",
            "ch1Department",
            "ch2Category",
            "ch3Segment",
            "itemCountValue",
            "itemCountMeasure",
            "sizeValue",
            "sizeMeasure",
            "partnerProduct",
            "awardPoints",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn source(columns: &[&str], rows: Vec<Vec<CellValue>>) -> SourceTable {
        SourceTable {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            rows,
            sheets: vec![],
        }
    }

    fn col(row: &[CellValue], columns: &[String], name: &str) -> CellValue {
        let idx = columns.iter().position(|c| c == name).unwrap();
        row.get(idx).cloned().unwrap_or(CellValue::Empty)
    }

    #[test]
    fn test_direct_mode_uppercases_classification() {
        let table = source(
            &["Description", "Barcode", "Brand", "Department"],
            vec![vec![
                text_cell("Coke Zero".to_string()),
                text_cell("49000000443".to_string()),
                text_cell("Coca-Cola".to_string()),
                text_cell("beverages".to_string()),
            ]],
        );
        let idx = RoleIndices {
            barcode: 1,
            description: 0,
            brand: Some(2),
            department: Some(3),
            category: None,
            segment: None,
            product_type: None,
        };
        let profile = MergeProfile::partner_export();
        let barcodes = vec!["049000000443".to_string()];
        let columns = partner_columns();

        let rows = project_new_rows(&table, &idx, &profile, &[0], &barcodes, &columns);
        let row = &rows[0];
        assert_eq!(col(row, &columns, "barcode").to_text(), "049000000443");
        assert_eq!(col(row, &columns, "bh2Brand").to_text(), "COCA-COLA");
        assert_eq!(col(row, &columns, "ch1Department").to_text(), "BEVERAGES");
        assert_eq!(col(row, &columns, "ch2Category").to_text(), "N/A");
        assert_eq!(col(row, &columns, "name").to_text(), "Coke Zero");
        assert_eq!(col(row, &columns, "description").to_text(), "Coke Zero");
        assert_eq!(col(row, &columns, "partnerProduct").to_text(), "Y");
        assert_eq!(col(row, &columns, "awardPoints").to_text(), "N");
        // Attribute parsing is off for this profile.
        assert_eq!(col(row, &columns, "sizeValue"), CellValue::Empty);
    }

    #[test]
    fn test_split_mode_keeps_path_casing() {
        let table = source(
            &["Title", "GTIN", "product_type"],
            vec![vec![
                text_cell("Chips".to_string()),
                text_cell("4011".to_string()),
                text_cell("Snacks > Salty".to_string()),
            ]],
        );
        let idx = RoleIndices {
            barcode: 1,
            description: 0,
            brand: None,
            department: None,
            category: None,
            segment: None,
            product_type: Some(2),
        };
        let profile = MergeProfile::auto();
        let barcodes = vec!["000000004011".to_string()];
        let columns = partner_columns();

        let rows = project_new_rows(&table, &idx, &profile, &[0], &barcodes, &columns);
        let row = &rows[0];
        assert_eq!(col(row, &columns, "ch1Department").to_text(), "Snacks");
        assert_eq!(col(row, &columns, "ch2Category").to_text(), "Salty");
        assert_eq!(col(row, &columns, "ch3Segment").to_text(), "N/A");
        assert_eq!(col(row, &columns, "bh2Brand").to_text(), "N/A");
    }

    #[test]
    fn test_missing_product_type_column_gives_sentinels() {
        let table = source(
            &["Title", "GTIN"],
            vec![vec![
                text_cell("Chips".to_string()),
                text_cell("4011".to_string()),
            ]],
        );
        let idx = RoleIndices {
            barcode: 1,
            description: 0,
            brand: None,
            department: None,
            category: None,
            segment: None,
            product_type: None,
        };
        let profile = MergeProfile::auto();
        let barcodes = vec!["000000004011".to_string()];
        let columns = partner_columns();

        let rows = project_new_rows(&table, &idx, &profile, &[0], &barcodes, &columns);
        let row = &rows[0];
        assert_eq!(col(row, &columns, "ch1Department").to_text(), "N/A");
        assert_eq!(col(row, &columns, "ch3Segment").to_text(), "N/A");
    }

    #[test]
    fn test_resolved_blank_cell_stays_blank() {
        let table = source(
            &["Description", "Barcode", "Brand"],
            vec![vec![
                text_cell("Water".to_string()),
                text_cell("42".to_string()),
                CellValue::Empty,
            ]],
        );
        let idx = RoleIndices {
            barcode: 1,
            description: 0,
            brand: Some(2),
            department: None,
            category: None,
            segment: None,
            product_type: None,
        };
        let profile = MergeProfile::partner_export();
        let barcodes = vec!["000000000042".to_string()];
        let columns = partner_columns();

        let rows = project_new_rows(&table, &idx, &profile, &[0], &barcodes, &columns);
        assert_eq!(col(&rows[0], &columns, "bh2Brand"), CellValue::Empty);
    }

    #[test]
    fn test_attribute_cells_filled_from_description() {
        let table = source(
            &["Title", "GTIN"],
            vec![vec![
                text_cell("Aquafina Water 16.9 oz 24 ct".to_string()),
                text_cell("12345678905".to_string()),
            ]],
        );
        let idx = RoleIndices {
            barcode: 1,
            description: 0,
            brand: None,
            department: None,
            category: None,
            segment: None,
            product_type: None,
        };
        let profile = MergeProfile::auto();
        let barcodes = vec!["012345678905".to_string()];
        let columns = partner_columns();

        let rows = project_new_rows(&table, &idx, &profile, &[0], &barcodes, &columns);
        let row = &rows[0];
        assert_eq!(col(row, &columns, "itemCountValue").to_text(), "24");
        assert_eq!(col(row, &columns, "itemCountMeasure").to_text(), "CT");
        assert_eq!(col(row, &columns, "sizeValue").to_text(), "16.9");
        assert_eq!(col(row, &columns, "sizeMeasure").to_text(), "OZ");
    }

    #[test]
    fn test_unknown_catalog_columns_stay_empty() {
        let table = source(
            &["Title", "GTIN"],
            vec![vec![
                text_cell("Water".to_string()),
                text_cell("42".to_string()),
            ]],
        );
        let idx = RoleIndices {
            barcode: 1,
            description: 0,
            brand: None,
            department: None,
            category: None,
            segment: None,
            product_type: None,
        };
        let profile = MergeProfile::auto();
        let barcodes = vec!["000000000042".to_string()];
        let columns = vec!["barcode".to_string(), "internalNote".to_string()];

        let rows = project_new_rows(&table, &idx, &profile, &[0], &barcodes, &columns);
        assert_eq!(rows[0][1], CellValue::Empty);
    }
}

//! Typed cell values shared by the read and write boundaries.

use calamine::Data;

/// A single spreadsheet cell.
///
/// Cells keep their container type so catalog passthrough can rewrite
/// numeric cells as numbers while normalized barcodes stay textual.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Convert a calamine cell into the internal representation.
    pub fn from_data(data: &Data) -> CellValue {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Text(format!("{:.6}", dt)),
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Empty,
        }
    }

    /// Render the cell as text. Integral numbers print without a decimal
    /// point so numeric barcode cells come out as plain digit strings.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(f) => {
                if f.fract() == 0.0 {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                }
            }
            CellValue::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Wrap a string as a cell, mapping "" to an empty cell.
pub fn text_cell(text: String) -> CellValue {
    if text.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_float_renders_without_decimal_point() {
        assert_eq!(CellValue::Number(12345678905.0).to_text(), "12345678905");
        assert_eq!(CellValue::Number(0.0).to_text(), "0");
    }

    #[test]
    fn test_fractional_float_keeps_fraction() {
        assert_eq!(CellValue::Number(16.9).to_text(), "16.9");
    }

    #[test]
    fn test_empty_renders_as_empty_string() {
        assert_eq!(CellValue::Empty.to_text(), "");
        assert!(CellValue::Empty.is_empty());
    }

    #[test]
    fn test_from_data_folds_int_into_number() {
        assert_eq!(
            CellValue::from_data(&Data::Int(42)),
            CellValue::Number(42.0)
        );
    }

    #[test]
    fn test_error_cells_read_as_empty() {
        let err = Data::Error(calamine::CellErrorType::Div0);
        assert_eq!(CellValue::from_data(&err), CellValue::Empty);
    }

    #[test]
    fn test_text_cell_maps_blank_to_empty() {
        assert_eq!(text_cell(String::new()), CellValue::Empty);
        assert_eq!(text_cell("x".to_string()), CellValue::Text("x".to_string()));
    }
}

//! Spreadsheet boundary: cell values, workbook reading, workbook writing.

pub mod cells;
pub mod read;
pub mod write;

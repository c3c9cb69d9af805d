//! The merge pipeline: normalization, reconciliation, attribute extraction,
//! and projection of new catalog rows.

pub mod attributes;
pub mod barcode;
pub mod category;
pub mod config;
pub mod project;
pub mod reconcile;
pub mod run;

/// Fill value for classification fields with no resolvable source.
pub const FIELD_SENTINEL: &str = "N/A";

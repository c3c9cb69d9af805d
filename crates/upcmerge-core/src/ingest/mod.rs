//! Source and catalog ingest: header detection, table union, role binding.

pub mod columns;
pub mod header;
pub mod table;

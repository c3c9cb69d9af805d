//! Error types for the upcmerge core library.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::PyErr;

/// Top-level error enum for the upcmerge core library.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Missing required column: {0}")]
    MissingRequiredColumn(String),

    #[error("Catalog schema error: {0}")]
    CatalogSchema(String),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<MergeError> for PyErr {
    fn from(err: MergeError) -> PyErr {
        match &err {
            MergeError::MissingRequiredColumn(_) => PyValueError::new_err(err.to_string()),
            MergeError::CatalogSchema(_) => PyValueError::new_err(err.to_string()),
            MergeError::Profile(_) => PyValueError::new_err(err.to_string()),
            MergeError::Workbook(_) => PyValueError::new_err(err.to_string()),
            MergeError::Io(_) => PyIOError::new_err(err.to_string()),
            MergeError::Json(_) => PyValueError::new_err(err.to_string()),
        }
    }
}

pub type MergeResult<T> = Result<T, MergeError>;

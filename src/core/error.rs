//! Error taxonomy for catalog loading, importing and filtering.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Invalid unit: {0:?} (expected one of pp, gp, ep, sp, cp)")]
    InvalidUnit(String),

    #[error("Invalid range: {field} price {value:?} must be a number")]
    InvalidRange { field: &'static str, value: String },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

//! Error handling for ICT processing operations.
//!
//! Provides error types with context for header discovery, file
//! enumeration, table construction and profile analysis failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IctError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Could not determine header line number in file: {path} - {reason}")]
    HeaderLineNumber { path: PathBuf, reason: String },

    #[error(
        "Header line {line} is outside file: {path} (file has {total_lines} lines)"
    )]
    HeaderLineOutOfRange {
        path: PathBuf,
        line: usize,
        total_lines: usize,
    },

    #[error("No files matching '*{extension}' found in directory: {dir}")]
    NoMatchingFiles { dir: PathBuf, extension: String },

    #[error("Column '{column}' not found. Available columns: {available}")]
    ColumnNotFound { column: String, available: String },

    #[error("No valid rows left for profile of '{column}' after cleaning")]
    EmptyProfile { column: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, IctError>;

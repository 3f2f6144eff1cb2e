//! Core data structures for ICT processing.
//!
//! Defines header metadata extracted from the first line of a file and
//! the summary structures reported after a batch conversion.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata extracted from the first line of an ICT file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IctHeader {
    /// 1-based line number of the column-name row
    pub header_line: usize,
    /// ICARTT file format index (e.g. 1001), when present and numeric
    pub format_index: Option<u32>,
}

impl IctHeader {
    /// Number of lines preceding the first data row
    pub fn skip_rows(&self) -> usize {
        self.header_line
    }
}

/// Shape of one parsed table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub file_name: String,
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// Summary of a batch conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub files: Vec<FileSummary>,
    pub total_rows: usize,
    /// Union of column names across all tables, in first-appearance order
    pub column_inventory: Vec<String>,
}

impl BatchSummary {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

//! ICT header parsing and column-name extraction.
//!
//! Line 1 of an ICT file is a comma-separated metadata record whose first
//! field is the 1-based line number of the column-name row (ICARTT
//! `NLHEAD`). The optional second field is the file format index.

use crate::constants::FIELD_DELIMITER;
use crate::error::{IctError, Result};
use crate::models::IctHeader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Read only the first line of the file and extract header metadata
pub fn parse_ict_header(file_path: &Path) -> Result<IctHeader> {
    let file = File::open(file_path)?;
    let mut reader = BufReader::new(file);

    let mut first_line = String::new();
    let bytes_read = reader.read_line(&mut first_line)?;
    if bytes_read == 0 {
        return Err(IctError::HeaderLineNumber {
            path: file_path.to_path_buf(),
            reason: "file is empty".to_string(),
        });
    }

    let header = parse_header_fields(&first_line, file_path)?;

    debug!(
        "Parsed header for {}: header_line={}, format_index={:?}",
        file_path.display(),
        header.header_line,
        header.format_index
    );

    Ok(header)
}

/// Parse the comma-separated fields of the first line
fn parse_header_fields(line: &str, file_path: &Path) -> Result<IctHeader> {
    let line = line.trim_start_matches('\u{feff}');
    let mut fields = line.split(FIELD_DELIMITER).map(str::trim);

    let first = fields.next().unwrap_or_default();
    let header_line = parse_line_number(first).map_err(|reason| IctError::HeaderLineNumber {
        path: file_path.to_path_buf(),
        reason,
    })?;

    // FFI is informational only, never an error
    let format_index = fields.next().and_then(|f| f.parse::<u32>().ok());

    Ok(IctHeader {
        header_line,
        format_index,
    })
}

/// Parse a header line number, accepting integral floats such as "38.0"
fn parse_line_number(field: &str) -> std::result::Result<usize, String> {
    let value = field
        .parse::<f64>()
        .map_err(|_| format!("first field '{}' is not numeric", field))?;

    if !value.is_finite() || value.fract() != 0.0 {
        return Err(format!("first field '{}' is not a whole number", field));
    }

    if value < 1.0 {
        return Err(format!("header line number must be at least 1, got {}", value));
    }

    Ok(value as usize)
}

/// Extract trimmed column names from the header row of the full file text
pub fn extract_column_names(
    lines: &[&str],
    header: &IctHeader,
    file_path: &Path,
) -> Result<Vec<String>> {
    let column_line =
        lines
            .get(header.header_line - 1)
            .ok_or_else(|| IctError::HeaderLineOutOfRange {
                path: file_path.to_path_buf(),
                line: header.header_line,
                total_lines: lines.len(),
            })?;

    Ok(column_line
        .split(FIELD_DELIMITER)
        .map(|name| name.trim().to_string())
        .collect())
}

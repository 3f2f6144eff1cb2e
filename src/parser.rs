//! Single-file ICT parser.
//!
//! Reads an ICT file in two phases: the first line alone to discover where
//! the column-name row sits, then the whole file to extract names and parse
//! the data section into a Polars `DataFrame`. Sentinel missing values are
//! replaced by null and a provenance column records the source file name.

use crate::config::IctConfig;
use crate::constants::{DEFAULT_MISSING_VALUES, POSITIONAL_COLUMN_PREFIX};
use crate::error::Result;
use crate::header::{extract_column_names, parse_ict_header};
use polars::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Parse one ICT file with the given sentinel set
///
/// `None` uses the default ICARTT sentinels; an empty slice disables
/// substitution.
pub fn read_ict_file(file_path: &Path, missing_values: Option<&[f64]>) -> Result<DataFrame> {
    let missing_values = missing_values.unwrap_or(DEFAULT_MISSING_VALUES).to_vec();
    let config = IctConfig::default().with_missing_values(missing_values);
    IctReader::new(config)?.read(file_path)
}

/// Configurable ICT file reader
#[derive(Debug, Clone)]
pub struct IctReader {
    config: IctConfig,
}

impl IctReader {
    /// Create a reader after validating the configuration
    pub fn new(config: IctConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parse a single ICT file into a table
    pub fn read(&self, file_path: &Path) -> Result<DataFrame> {
        debug!("Reading ICT file: {}", file_path.display());

        // Step 1: Header line number from the first line only
        let header = parse_ict_header(file_path)?;

        // Step 2: Re-read the whole file and pull the column names
        let content = fs::read_to_string(file_path)?;
        let lines: Vec<&str> = content.lines().collect();
        let column_names = extract_column_names(&lines, &header, file_path)?;

        // Step 3: Parse everything after the header row
        let data_lines: Vec<&str> = lines[header.skip_rows()..]
            .iter()
            .copied()
            .filter(|line| !line.trim().is_empty())
            .collect();

        let df = if data_lines.is_empty() {
            debug!("No data rows in {}", file_path.display());
            empty_table(&column_names)?
        } else {
            let df = read_data_section(&data_lines.join("\n"))?;
            // Step 4: Names are truncated to the parsed width
            assign_column_names(df, &column_names)?
        };

        let df = normalize_text_columns(df)?;

        // Step 5: Sentinel substitution across the whole table
        let df = replace_missing_values(df, &self.config.missing_values)?;

        // Step 6: Provenance
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let df = add_source_column(df, &self.config.source_column, &file_name)?;

        debug!(
            "Parsed {}: {} rows x {} columns",
            file_name,
            df.height(),
            df.width()
        );

        Ok(df)
    }
}

/// Parse the comma-separated data rows with no header row
fn read_data_section(data: &str) -> Result<DataFrame> {
    let mut cursor = Cursor::new(data.as_bytes());

    let parse_options = CsvParseOptions::default().with_truncate_ragged_lines(true);
    let options = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(None)
        .with_raise_if_empty(false)
        .with_parse_options(parse_options);

    let df = CsvReader::new(&mut cursor).with_options(options).finish()?;
    Ok(df)
}

/// Zero-row table carrying the header names
fn empty_table(column_names: &[String]) -> Result<DataFrame> {
    let columns = unique_column_names(column_names, column_names.len())
        .iter()
        .map(|name| Column::new_empty(name.as_str().into(), &DataType::String))
        .collect::<Vec<_>>();
    Ok(DataFrame::new(columns)?)
}

/// Resolve `width` distinct column names from the header row
///
/// Missing or empty names become `column_<k>` (1-based); a repeated name
/// gets a `_duplicated_<n>` suffix.
fn unique_column_names(column_names: &[String], width: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(width);
    let mut resolved = Vec::with_capacity(width);

    for idx in 0..width {
        let base = match column_names.get(idx) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{}{}", POSITIONAL_COLUMN_PREFIX, idx + 1),
        };

        let mut name = base.clone();
        let mut n = 0;
        while seen.contains(&name) {
            name = format!("{}_duplicated_{}", base, n);
            n += 1;
        }
        if name != base {
            debug!("Duplicate column name '{}' renamed to '{}'", base, name);
        }

        seen.insert(name.clone());
        resolved.push(name);
    }

    resolved
}

/// Rename parsed columns from the header row
///
/// Excess names are dropped; columns without a name keep a positional
/// `column_<k>` name.
fn assign_column_names(df: DataFrame, column_names: &[String]) -> Result<DataFrame> {
    let width = df.width();
    if column_names.len() > width {
        debug!(
            "Header declares {} names for {} data columns, dropping {:?}",
            column_names.len(),
            width,
            &column_names[width..]
        );
    }

    let names = unique_column_names(column_names, width);
    let columns = df
        .get_columns()
        .iter()
        .zip(&names)
        .map(|(column, name)| {
            Column::from(
                column
                    .as_materialized_series()
                    .clone()
                    .with_name(name.as_str().into()),
            )
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Trim text cells and convert text columns that are all numeric into Float64
///
/// ICT rows are commonly written with a space after each comma, which the
/// CSV reader leaves as text.
fn normalize_text_columns(df: DataFrame) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if series.dtype() != &DataType::String {
            columns.push(column.clone());
            continue;
        }

        match numeric_from_text(series)? {
            Some(numeric) => {
                debug!("Column '{}' coerced from text to Float64", series.name());
                columns.push(Column::from(numeric));
            }
            None => {
                let trimmed: StringChunked =
                    series.str()?.into_iter().map(|cell| cell.map(str::trim)).collect();
                columns.push(Column::from(
                    trimmed.with_name(series.name().clone()).into_series(),
                ));
            }
        }
    }

    Ok(DataFrame::new(columns)?)
}

fn numeric_from_text(series: &Series) -> Result<Option<Series>> {
    let text = series.str()?;
    let mut values: Vec<Option<f64>> = Vec::with_capacity(text.len());
    let mut any_value = false;

    for cell in text.into_iter() {
        match cell.map(str::trim) {
            None | Some("") => values.push(None),
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) => {
                    any_value = true;
                    values.push(Some(value));
                }
                Err(_) => return Ok(None),
            },
        }
    }

    if !any_value {
        return Ok(None);
    }

    Ok(Some(Series::new(series.name().clone(), values)))
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn is_sentinel_text(cell: &str, missing_values: &[f64]) -> bool {
    cell.trim()
        .parse::<f64>()
        .is_ok_and(|value| missing_values.contains(&value))
}

/// Replace every cell equal to a sentinel code with null
///
/// Numeric columns compare by value; text cells match when their trimmed
/// text parses to a sentinel.
fn replace_missing_values(df: DataFrame, missing_values: &[f64]) -> Result<DataFrame> {
    if missing_values.is_empty() {
        return Ok(df);
    }

    let numeric_exprs: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|column| is_numeric_dtype(column.dtype()))
        .map(|column| {
            let name = column.name().as_str();
            let is_missing = missing_values.iter().fold(lit(false), |acc, &sentinel| {
                acc.or(col(name).cast(DataType::Float64).eq(lit(sentinel)))
            });
            when(is_missing)
                .then(lit(NULL))
                .otherwise(col(name))
                .alias(name)
        })
        .collect();

    let df = if numeric_exprs.is_empty() {
        df
    } else {
        df.lazy().with_columns(numeric_exprs).collect()?
    };

    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            if column.dtype() != &DataType::String {
                return Ok(column.clone());
            }
            let text = column.as_materialized_series().str()?;
            let cleaned: StringChunked = text
                .into_iter()
                .map(|cell| cell.filter(|value| !is_sentinel_text(value, missing_values)))
                .collect();
            Ok(Column::from(
                cleaned.with_name(column.name().clone()).into_series(),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DataFrame::new(columns)?)
}

/// Append the provenance column holding the file's base name
fn add_source_column(mut df: DataFrame, column_name: &str, file_name: &str) -> Result<DataFrame> {
    let source = Series::new(column_name.into(), vec![file_name; df.height()]);
    df.with_column(source)?;
    Ok(df)
}

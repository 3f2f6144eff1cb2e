//! Directory batch converter.
//!
//! Discovers ICT files in a directory and parses each one into its own
//! table. Processing is sequential and fail-fast: the first file that
//! cannot be parsed aborts the whole batch.

pub mod discovery;

#[cfg(test)]
pub mod tests;

use self::discovery::FileDiscovery;

use crate::config::IctConfig;
use crate::error::{IctError, Result};
use crate::models::{BatchSummary, FileSummary};
use crate::parser::IctReader;

use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Convert every `.ict` file in a directory using the default configuration
///
/// `output_path` is accepted for interface compatibility; nothing is written.
pub fn convert_directory(input_dir: &Path, output_path: Option<&Path>) -> Result<Vec<DataFrame>> {
    BatchProcessor::new(input_dir.to_path_buf(), output_path.map(Path::to_path_buf)).process()
}

/// Batch processor for a directory of ICT files
#[derive(Debug)]
pub struct BatchProcessor {
    input_dir: PathBuf,
    output_path: Option<PathBuf>,
    config: IctConfig,
}

impl BatchProcessor {
    /// Create a new batch processor
    pub fn new(input_dir: PathBuf, output_path: Option<PathBuf>) -> Self {
        Self {
            input_dir,
            output_path,
            config: IctConfig::default(),
        }
    }

    /// Configure the processor
    pub fn with_config(mut self, config: IctConfig) -> Self {
        self.config = config;
        self
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Enumerate matching files without parsing them
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        FileDiscovery::new(self.input_dir.clone(), self.config.extension.clone()).discover_files()
    }

    /// Parse every matching file, one table per file in enumeration order
    pub fn process(&self) -> Result<Vec<DataFrame>> {
        self.process_with_summary().map(|(tables, _)| tables)
    }

    /// Parse every matching file and report the shape of the batch
    pub fn process_with_summary(&self) -> Result<(Vec<DataFrame>, BatchSummary)> {
        let start_time = Instant::now();
        let reader = IctReader::new(self.config.clone())?;

        let files = self.discover()?;
        if files.is_empty() {
            return Err(IctError::NoMatchingFiles {
                dir: self.input_dir.clone(),
                extension: self.config.extension.clone(),
            });
        }

        info!(
            "Converting {} files from {}",
            files.len(),
            self.input_dir.display()
        );

        if let Some(output_path) = &self.output_path {
            debug!(
                "Output path {} ignored: combined output writing is disabled",
                output_path.display()
            );
        }

        let pb = self.progress_bar(files.len());
        let mut tables = Vec::with_capacity(files.len());

        for file_path in &files {
            if let Some(file_name) = file_path.file_name() {
                pb.set_message(format!("Parsing: {}", file_name.to_string_lossy()));
            }

            // First failure aborts the batch
            let table = match reader.read(file_path) {
                Ok(table) => table,
                Err(e) => {
                    pb.abandon_with_message("Batch aborted");
                    return Err(e);
                }
            };

            tables.push(table);
            pb.inc(1);
        }

        pb.finish_with_message("All ICT files parsed");

        let summary = summarize(&files, &tables);
        info!(
            "Parsed {} files ({} rows) in {}ms",
            summary.file_count(),
            summary.total_rows,
            start_time.elapsed().as_millis()
        );

        Ok((tables, summary))
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

/// Union of column names across tables in first-appearance order
pub fn column_inventory(tables: &[DataFrame]) -> Vec<String> {
    let mut inventory: Vec<String> = Vec::new();
    for table in tables {
        for name in table.get_column_names() {
            if !inventory.iter().any(|seen| seen == name.as_str()) {
                inventory.push(name.to_string());
            }
        }
    }
    inventory
}

/// Pair each table with its source path and collect batch statistics
pub fn summarize(files: &[PathBuf], tables: &[DataFrame]) -> BatchSummary {
    let file_summaries: Vec<FileSummary> = files
        .iter()
        .zip(tables)
        .map(|(path, table)| FileSummary {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.clone(),
            rows: table.height(),
            columns: table.width(),
        })
        .collect();

    BatchSummary {
        total_rows: file_summaries.iter().map(|f| f.rows).sum(),
        files: file_summaries,
        column_inventory: column_inventory(tables),
    }
}

//! ICT Processor Library
//!
//! A Rust library for reading ICT (ICARTT) atmospheric and aerosol
//! measurement files into Polars tables.
//!
//! This library provides tools for:
//! - Discovering the column-name row from the numeric header on line 1
//! - Parsing the data section with ragged-row tolerance
//! - Replacing sentinel missing-value codes (-9999, -8888, -7777) with null
//! - Tagging every row with its source file name
//! - Batch-converting a directory into one table per file
//! - Altitude-binned vertical profiles of a measurement column

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod header;
pub mod models;
pub mod parser;
pub mod processor;
pub mod profile;

pub use config::{IctConfig, ProfileConfig};
pub use error::{IctError, Result};
pub use models::{BatchSummary, FileSummary, IctHeader};
pub use parser::{IctReader, read_ict_file};
pub use processor::{BatchProcessor, column_inventory, convert_directory, summarize};
pub use profile::compute_profile;

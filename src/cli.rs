//! Command-line interface components.

use crate::config::{IctConfig, ProfileConfig};
use crate::constants::{
    DEFAULT_ALTITUDE_COLUMN, DEFAULT_BIN_SIZE, DEFAULT_MIN_PERIODS, DEFAULT_SMOOTHING_WINDOW,
    DEFAULT_VALUE_COLUMN, ICT_EXTENSION,
};
use crate::models::BatchSummary;
use crate::parser::IctReader;
use crate::processor::BatchProcessor;
use crate::profile::compute_profile;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(name = "ict-processor")]
#[command(about = "Parse ICT (ICARTT) measurement files into in-memory tables")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse every ICT file in a directory and report the resulting tables
    Convert(ConvertArgs),
    /// Compute an altitude-binned vertical profile from one ICT file
    Profile(ProfileArgs),
}

/// Sentinel options shared by both commands
#[derive(ClapArgs, Debug, Clone)]
pub struct MissingValueArgs {
    /// Sentinel code to replace with null (repeatable; defaults to -9999, -8888, -7777)
    #[arg(long = "missing-value", value_name = "VALUE", allow_hyphen_values = true)]
    pub missing_values: Vec<f64>,

    /// Keep sentinel codes as ordinary values
    #[arg(long, conflicts_with = "missing_values")]
    pub no_missing_values: bool,
}

impl MissingValueArgs {
    /// Apply the sentinel options to a configuration
    pub fn apply(&self, config: IctConfig) -> IctConfig {
        if self.no_missing_values {
            config.without_missing_values()
        } else if !self.missing_values.is_empty() {
            config.with_missing_values(self.missing_values.clone())
        } else {
            config
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ConvertArgs {
    /// Directory containing ICT files
    #[arg(value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Combined output path (accepted, writing is disabled)
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// Literal, case-sensitive file suffix to match
    #[arg(long, default_value = ICT_EXTENSION)]
    pub extension: String,

    #[command(flatten)]
    pub missing: MissingValueArgs,
}

impl ConvertArgs {
    pub fn to_config(&self, show_progress: bool) -> IctConfig {
        let config = self
            .missing
            .apply(IctConfig::default().with_extension(self.extension.clone()));
        if show_progress {
            config.with_progress()
        } else {
            config
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ProfileArgs {
    /// ICT file to profile
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Altitude column
    #[arg(long, default_value = DEFAULT_ALTITUDE_COLUMN)]
    pub altitude_column: String,

    /// Measurement column to profile
    #[arg(long, default_value = DEFAULT_VALUE_COLUMN)]
    pub value_column: String,

    /// Altitude bin size
    #[arg(long, default_value_t = DEFAULT_BIN_SIZE)]
    pub bin_size: f64,

    /// Rolling window in bins (odd)
    #[arg(long, default_value_t = DEFAULT_SMOOTHING_WINDOW)]
    pub window: usize,

    /// Minimum bins per smoothed value
    #[arg(long, default_value_t = DEFAULT_MIN_PERIODS)]
    pub min_periods: usize,

    #[command(flatten)]
    pub missing: MissingValueArgs,
}

impl ProfileArgs {
    pub fn to_profile_config(&self) -> ProfileConfig {
        ProfileConfig::new(self.altitude_column.clone(), self.value_column.clone())
            .with_bin_size(self.bin_size)
            .with_window(self.window)
            .with_min_periods(self.min_periods)
    }
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ict_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Dispatch the selected command
pub fn run(args: Args) -> Result<()> {
    let show_progress = !args.quiet;
    match args.command {
        Command::Convert(convert) => run_convert(&convert, show_progress),
        Command::Profile(profile) => run_profile(&profile),
    }
}

fn run_convert(args: &ConvertArgs, show_progress: bool) -> Result<()> {
    if let Some(output_path) = &args.output_path {
        warn!(
            "Output path {} accepted but combined output writing is disabled",
            output_path.display()
        );
    }

    let processor = BatchProcessor::new(args.input_dir.clone(), args.output_path.clone())
        .with_config(args.to_config(show_progress));

    let (_tables, summary) = processor
        .process_with_summary()
        .with_context(|| format!("Failed to convert {}", args.input_dir.display()))?;

    print_summary(&args.input_dir, &summary);
    Ok(())
}

fn run_profile(args: &ProfileArgs) -> Result<()> {
    let reader = IctReader::new(args.missing.apply(IctConfig::default()))?;
    let table = reader
        .read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let profile = compute_profile(&table, &args.to_profile_config())
        .with_context(|| format!("Failed to profile {}", args.file.display()))?;

    println!(
        "{} {} vs {} ({} bins)",
        "Vertical profile:".bright_green().bold(),
        args.value_column.bright_cyan(),
        args.altitude_column.bright_cyan(),
        profile.height().to_string().bright_white().bold()
    );
    println!("{}", profile);
    Ok(())
}

fn print_summary(input_dir: &std::path::Path, summary: &BatchSummary) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!("  {} {}", "Directory:".bright_cyan(), input_dir.display());
    println!(
        "  {} {}",
        "Files parsed:".bright_cyan(),
        summary.file_count().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Total rows:".bright_cyan(),
        summary.total_rows.to_string().bright_white().bold()
    );

    println!();
    for file in &summary.files {
        println!(
            "  {} {} rows x {} columns",
            file.file_name.bright_yellow(),
            file.rows,
            file.columns
        );
    }

    println!(
        "\n{} ({})",
        "Column inventory".bright_green().bold(),
        summary.column_inventory.len()
    );
    for name in &summary.column_inventory {
        println!("  - {}", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_command() {
        let args = Args::parse_from([
            "ict-processor",
            "convert",
            "/data/staqs",
            "--missing-value",
            "-9999",
            "--missing-value",
            "-1",
            "-v",
        ]);

        assert!(args.verbose);
        assert_eq!(args.get_log_level(), "debug");
        match args.command {
            Command::Convert(convert) => {
                assert_eq!(convert.input_dir, PathBuf::from("/data/staqs"));
                assert_eq!(convert.extension, ".ict");
                let config = convert.to_config(false);
                assert_eq!(config.missing_values, vec![-9999.0, -1.0]);
                assert!(!config.show_progress);
            }
            other => panic!("Expected convert command, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_defaults_and_output_path() {
        let args = Args::parse_from(["ict-processor", "convert", "dir", "-o", "combined.csv"]);

        assert_eq!(args.get_log_level(), "info");
        match args.command {
            Command::Convert(convert) => {
                assert_eq!(convert.output_path, Some(PathBuf::from("combined.csv")));
                let config = convert.to_config(true);
                assert_eq!(config.missing_values, vec![-9999.0, -8888.0, -7777.0]);
                assert!(config.show_progress);
            }
            other => panic!("Expected convert command, got {:?}", other),
        }
    }

    #[test]
    fn test_no_missing_values_flag() {
        let args = Args::parse_from(["ict-processor", "convert", "dir", "--no-missing-values"]);
        match args.command {
            Command::Convert(convert) => {
                assert!(convert.to_config(false).missing_values.is_empty());
            }
            other => panic!("Expected convert command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_profile_command() {
        let args = Args::parse_from([
            "ict-processor",
            "profile",
            "flight.ict",
            "--value-column",
            "CO_ppbv",
            "--bin-size",
            "100",
            "-q",
        ]);

        assert_eq!(args.get_log_level(), "warn");
        match args.command {
            Command::Profile(profile) => {
                let config = profile.to_profile_config();
                assert_eq!(config.altitude_column, "Altitude_m_MSL");
                assert_eq!(config.value_column, "CO_ppbv");
                assert_eq!(config.bin_size, 100.0);
                assert_eq!(config.window, 11);
                assert!(config.validate().is_ok());
            }
            other => panic!("Expected profile command, got {:?}", other),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Args::try_parse_from(["ict-processor", "convert", "dir", "-v", "-q"]);
        assert!(result.is_err());
    }
}

//! Configuration management and validation.
//!
//! Provides configuration structures for ICT parsing, batch directory
//! conversion and vertical profile analysis.

use crate::constants::{
    DEFAULT_BIN_SIZE, DEFAULT_MIN_COUNT_FOR_SEM, DEFAULT_MIN_PERIODS, DEFAULT_MISSING_VALUES,
    DEFAULT_SMOOTHING_WINDOW, ICT_EXTENSION, SOURCE_FILE_COLUMN,
};
use crate::error::{IctError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for parsing ICT files and converting directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IctConfig {
    /// Literal file-name suffix matched during discovery (case sensitive)
    pub extension: String,

    /// Sentinel codes replaced by null in every parsed table
    pub missing_values: Vec<f64>,

    /// Name of the provenance column holding the source file name
    pub source_column: String,

    /// Show a progress bar while converting a directory
    pub show_progress: bool,
}

impl Default for IctConfig {
    fn default() -> Self {
        Self {
            extension: ICT_EXTENSION.to_string(),
            missing_values: DEFAULT_MISSING_VALUES.to_vec(),
            source_column: SOURCE_FILE_COLUMN.to_string(),
            show_progress: false,
        }
    }
}

impl IctConfig {
    /// Set the file extension used for discovery
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Replace the sentinel set
    pub fn with_missing_values(mut self, missing_values: Vec<f64>) -> Self {
        self.missing_values = missing_values;
        self
    }

    /// Disable sentinel substitution entirely
    pub fn without_missing_values(mut self) -> Self {
        self.missing_values.clear();
        self
    }

    /// Rename the provenance column
    pub fn with_source_column(mut self, name: impl Into<String>) -> Self {
        self.source_column = name.into();
        self
    }

    /// Enable the batch progress bar
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Check the configuration for values that would make parsing meaningless
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(IctError::Configuration {
                message: "File extension must not be empty".to_string(),
            });
        }

        if self.source_column.trim().is_empty() {
            return Err(IctError::Configuration {
                message: "Source column name must not be empty".to_string(),
            });
        }

        if let Some(bad) = self.missing_values.iter().find(|v| !v.is_finite()) {
            return Err(IctError::Configuration {
                message: format!("Missing value sentinel must be finite, got {}", bad),
            });
        }

        Ok(())
    }
}

/// Configuration for an altitude-binned vertical profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Column holding altitude
    pub altitude_column: String,

    /// Column holding the measurement to profile
    pub value_column: String,

    /// Width of each altitude bin
    pub bin_size: f64,

    /// Bins in the centered rolling mean (odd)
    pub window: usize,

    /// Minimum bins inside a window for a smoothed value
    pub min_periods: usize,

    /// Minimum observations in a bin for a standard error
    pub min_count_for_sem: u64,
}

impl ProfileConfig {
    /// Create a profile configuration with default binning and smoothing
    pub fn new(altitude_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            altitude_column: altitude_column.into(),
            value_column: value_column.into(),
            bin_size: DEFAULT_BIN_SIZE,
            window: DEFAULT_SMOOTHING_WINDOW,
            min_periods: DEFAULT_MIN_PERIODS,
            min_count_for_sem: DEFAULT_MIN_COUNT_FOR_SEM,
        }
    }

    /// Set the altitude bin width
    pub fn with_bin_size(mut self, bin_size: f64) -> Self {
        self.bin_size = bin_size;
        self
    }

    /// Set the rolling window length in bins
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the minimum number of bins per smoothed value
    pub fn with_min_periods(mut self, min_periods: usize) -> Self {
        self.min_periods = min_periods;
        self
    }

    /// Set the minimum bin count for a standard error
    pub fn with_min_count_for_sem(mut self, min_count: u64) -> Self {
        self.min_count_for_sem = min_count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.bin_size.is_finite() && self.bin_size > 0.0) {
            return Err(IctError::Configuration {
                message: format!("Bin size must be positive, got {}", self.bin_size),
            });
        }

        if self.window == 0 || self.window % 2 == 0 {
            return Err(IctError::Configuration {
                message: format!("Smoothing window must be odd, got {}", self.window),
            });
        }

        if self.min_periods == 0 || self.min_periods > self.window {
            return Err(IctError::Configuration {
                message: format!(
                    "Minimum periods must be between 1 and window ({}), got {}",
                    self.window, self.min_periods
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IctConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extension, ".ict");
        assert_eq!(config.source_column, "source_file");
        assert!(!config.show_progress);
    }

    #[test]
    fn test_builder_methods() {
        let config = IctConfig::default()
            .with_extension(".csv")
            .with_missing_values(vec![-999.0])
            .with_source_column("file")
            .with_progress();

        assert_eq!(config.extension, ".csv");
        assert_eq!(config.missing_values, vec![-999.0]);
        assert_eq!(config.source_column, "file");
        assert!(config.show_progress);
    }

    #[test]
    fn test_without_missing_values() {
        let config = IctConfig::default().without_missing_values();
        assert!(config.missing_values.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_ict_config() {
        assert!(IctConfig::default().with_extension("").validate().is_err());
        assert!(IctConfig::default().with_source_column(" ").validate().is_err());
        assert!(
            IctConfig::default()
                .with_missing_values(vec![f64::NAN])
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_profile_config_validation() {
        let config = ProfileConfig::new("Altitude_m_MSL", "Ozone_ppbv");
        assert!(config.validate().is_ok());
        assert_eq!(config.bin_size, 50.0);
        assert_eq!(config.window, 11);

        assert!(config.clone().with_bin_size(0.0).validate().is_err());
        assert!(config.clone().with_window(4).validate().is_err());
        assert!(config.clone().with_window(0).validate().is_err());
        assert!(config.clone().with_min_periods(0).validate().is_err());
        assert!(
            config
                .clone()
                .with_window(3)
                .with_min_periods(5)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "extension": ".ict",
            "missing_values": [-9999.0, -1.0],
            "source_column": "file",
            "show_progress": false
        }"#;

        let config: IctConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.missing_values, vec![-9999.0, -1.0]);
        assert_eq!(config.source_column, "file");
        assert!(config.validate().is_ok());

        let profile = ProfileConfig::new("Altitude_m_MSL", "CO_ppbv").with_window(5);
        let restored: ProfileConfig =
            serde_json::from_str(&serde_json::to_string(&profile).unwrap()).unwrap();
        assert_eq!(restored.value_column, "CO_ppbv");
        assert_eq!(restored.window, 5);
    }
}

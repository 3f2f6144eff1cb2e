//! Application constants for the ICT processor
//!
//! File patterns, missing-value sentinels and column names used
//! throughout the parser, batch converter and profile analysis.

// =============================================================================
// File Patterns
// =============================================================================

/// Literal, case-sensitive suffix of ICT data files
pub const ICT_EXTENSION: &str = ".ict";

/// Delimiter used in both the header metadata line and data rows
pub const FIELD_DELIMITER: char = ',';

// =============================================================================
// Missing Values
// =============================================================================

/// Sentinel codes used by ICARTT data providers to mark missing measurements
///
/// -9999 is the standard missing flag, -8888 marks values below the lower
/// limit of detection and -7777 values above the upper limit.
pub const DEFAULT_MISSING_VALUES: &[f64] = &[-9999.0, -8888.0, -7777.0];

// =============================================================================
// Column Names
// =============================================================================

/// Provenance column appended to every parsed table
pub const SOURCE_FILE_COLUMN: &str = "source_file";

/// Prefix for data columns the header row does not name (1-based suffix)
pub const POSITIONAL_COLUMN_PREFIX: &str = "column_";

/// Output columns of a vertical profile
pub mod profile_columns {
    pub const ALT_BIN: &str = "alt_bin";
    pub const MEAN: &str = "mean";
    pub const MEDIAN: &str = "median";
    pub const COUNT: &str = "n";
    pub const STD: &str = "std";
    pub const SEM: &str = "sem";
    pub const MEAN_SMOOTH: &str = "mean_smooth";

    /// Internal name of the measurement column while binning
    pub const VALUE: &str = "value";
}

// =============================================================================
// Profile Defaults
// =============================================================================

/// Altitude column used by the profile command when none is given
pub const DEFAULT_ALTITUDE_COLUMN: &str = "Altitude_m_MSL";

/// Measurement column used by the profile command when none is given
pub const DEFAULT_VALUE_COLUMN: &str = "Ozone_ppbv";

/// Altitude bin width in the units of the altitude column (metres)
pub const DEFAULT_BIN_SIZE: f64 = 50.0;

/// Number of bins in the centered rolling mean
pub const DEFAULT_SMOOTHING_WINDOW: usize = 11;

/// Minimum non-null bins inside a window for a smoothed value
pub const DEFAULT_MIN_PERIODS: usize = 3;

/// Bins with fewer observations get no standard error
pub const DEFAULT_MIN_COUNT_FOR_SEM: u64 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_missing_values() {
        assert_eq!(DEFAULT_MISSING_VALUES.len(), 3);
        assert!(DEFAULT_MISSING_VALUES.contains(&-9999.0));
    }

    #[test]
    fn test_extension_is_literal_suffix() {
        assert!(ICT_EXTENSION.starts_with('.'));
        assert_eq!(ICT_EXTENSION, ICT_EXTENSION.to_lowercase());
    }

    #[test]
    fn test_smoothing_window_is_odd() {
        assert_eq!(DEFAULT_SMOOTHING_WINDOW % 2, 1);
        assert!(DEFAULT_MIN_PERIODS <= DEFAULT_SMOOTHING_WINDOW);
    }
}

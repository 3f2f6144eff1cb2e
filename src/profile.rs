//! Altitude-binned vertical profiles.
//!
//! Bins one measurement column of a parsed table by altitude and computes
//! per-bin statistics plus a centered rolling mean across bins.

use crate::config::ProfileConfig;
use crate::constants::profile_columns::{
    ALT_BIN, COUNT, MEAN, MEAN_SMOOTH, MEDIAN, SEM, STD, VALUE,
};
use crate::error::{IctError, Result};
use polars::prelude::*;
use tracing::debug;

/// Compute a vertical profile of `value_column` against `altitude_column`
///
/// Output columns: `alt_bin`, `mean`, `median`, `n`, `std`, `sem`,
/// `mean_smooth`, sorted by ascending bin.
pub fn compute_profile(df: &DataFrame, config: &ProfileConfig) -> Result<DataFrame> {
    config.validate()?;

    let altitude = numeric_values(df, &config.altitude_column)?;
    let values = numeric_values(df, &config.value_column)?;

    // Non-positive measurements are not physical
    let (bins, kept): (Vec<f64>, Vec<f64>) = altitude
        .into_iter()
        .zip(values)
        .filter_map(|pair| match pair {
            (Some(alt), Some(value)) if alt.is_finite() && value.is_finite() && value > 0.0 => {
                Some((bin_altitude(alt, config.bin_size), value))
            }
            _ => None,
        })
        .unzip();

    if bins.is_empty() {
        return Err(IctError::EmptyProfile {
            column: config.value_column.clone(),
        });
    }

    debug!(
        "Profiling {} valid rows of '{}' with bin size {}",
        kept.len(),
        config.value_column,
        config.bin_size
    );

    let binned = df!(ALT_BIN => bins, VALUE => kept)?;

    let smoothing = RollingOptionsFixedWindow {
        window_size: config.window,
        min_periods: config.min_periods,
        center: true,
        ..Default::default()
    };

    // Standard error only for bins with enough observations
    let sem = when(col(COUNT).gt_eq(lit(config.min_count_for_sem)))
            .then(col(STD) / col(COUNT).cast(DataType::Float64).sqrt())
        .otherwise(lit(NULL))
        .alias(SEM);

    let profile = binned
        .lazy()
        .group_by([col(ALT_BIN)])
        .agg([
            col(VALUE).mean().alias(MEAN),
            col(VALUE).median().alias(MEDIAN),
            col(VALUE).count().cast(DataType::UInt64).alias(COUNT),
            col(VALUE).std(1).alias(STD),
        ])
        .sort_by_exprs([col(ALT_BIN)], SortMultipleOptions::default())
        .with_columns([sem, col(MEAN).rolling_mean(smoothing).alias(MEAN_SMOOTH)])
        .collect()?;

    Ok(profile)
}

/// Snap an altitude to the nearest bin centre, ties to even like NumPy
pub fn bin_altitude(altitude: f64, bin_size: f64) -> f64 {
    (altitude / bin_size).round_ties_even() * bin_size
}

/// Extract a column as floats; text that does not parse becomes null
fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name).map_err(|_| IctError::ColumnNotFound {
        column: name.to_string(),
        available: df
            .get_column_names()
            .iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    })?;

    let series = column.as_materialized_series();
    let values = if series.dtype() == &DataType::String {
        series
            .str()?
            .into_iter()
            .map(|cell| cell.and_then(|text| text.trim().parse::<f64>().ok()))
            .collect()
    } else {
        series.cast(&DataType::Float64)?.f64()?.into_iter().collect()
    };

    Ok(values)
}

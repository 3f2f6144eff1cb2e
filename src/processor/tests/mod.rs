//! Pipeline tests for the processor module
//!
//! Tests the complete batch conversion using temporary ICT directories.


use std::fs;
use std::path::{Path, PathBuf};

/// Write a minimal ICT file with a three-line header and `rows` data rows
///
/// Every fourth ozone value is the -9999 sentinel.
pub(crate) fn write_ict(dir: &Path, name: &str, rows: usize) -> PathBuf {
    let mut content = String::from("3, 1001\nDoe, Jane\nTime_Start, Ozone_ppbv, Altitude_m_MSL\n");
    for i in 0..rows {
        let ozone = if i % 4 == 3 {
            "-9999".to_string()
        } else {
            format!("{:.1}", 30.0 + i as f64)
        };
        content.push_str(&format!(
            "{}, {}, {:.1}\n",
            43200 + i,
            ozone,
            100.0 + 10.0 * i as f64
        ));
    }

    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

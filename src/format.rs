//! Median Output Formatting
//!
//! Medians are rendered with exactly two decimals by formatting to three
//! decimals and then chopping the last digit. This is not the same as
//! rounding to two decimals:
//!
//! ```
//! use velodegree::format::format_median;
//!
//! assert_eq!(format_median(1.006), "1.00");
//! assert_eq!(format!("{:.2}", 1.006), "1.01");
//! ```

/// Placeholder written when the window holds no nodes.
pub const DEFAULT_NO_DATA_OUTPUT: &str = "0.00";

/// Format a median as a two-decimal fixed-point string (3 decimals, truncated).
pub fn format_median(value: f64) -> String {
    let three_places = format!("{:.3}", value);
    match three_places.split_once('.') {
        Some((integer, decimals)) => {
            let mut two: String = decimals.chars().take(2).collect();
            while two.len() < 2 {
                two.push('0');
            }
            format!("{}.{}", integer, two)
        }
        // NaN and infinities carry no decimal point
        None => three_places,
    }
}

/// Format one output line; `None` renders the no-data placeholder.
pub fn format_output(median: Option<f64>, no_data: &str) -> String {
    match median {
        Some(value) => format_median(value),
        None => no_data.to_string(),
    }
}

use chrono::{DateTime, Utc};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count with two decimals, e.g. `1.50 KB`
pub fn format_file_size(size: u64) -> String {
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, SIZE_UNITS[unit])
}

/// Format a timestamp as `Sep 12, 2024`
pub fn format_modified_date(time: &DateTime<Utc>) -> String {
    time.format("%b %-d, %Y").to_string()
}

// Statistics engine
// Extrema, means, volume dispersion, midpoint median and fixed-window trends

pub mod aggregates;
pub mod ordering;
pub mod windows;

pub use aggregates::{
    find_extrema, mean_close, mean_volume, median_midpoint, volume_std_dev, Extrema,
};
pub use ordering::sort_by_midpoint;
pub use windows::{
    scan_legacy, scan_window, trend, ScanBoundary, WindowConfig, WindowScan, WindowScanner,
};

use crate::error::StatsError;
use crate::models::{DailyRecord, StockStats};

/// Compute the full statistics bundle for an ordered series
///
/// Fails only on an empty series or an invalid window configuration. Window
/// lengths longer than the series come back as `None`.
pub fn compute_stats(
    records: &[DailyRecord],
    windows: WindowConfig,
) -> Result<StockStats, StatsError> {
    let scanner = WindowScanner::new(windows)?;
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(StatsError::EmptySeries),
    };

    tracing::debug!(
        "Computing stats over {} records ({} to {})",
        records.len(),
        first.date,
        last.date
    );

    let extrema = find_extrema(records)?;
    let mean_close = mean_close(records)?;
    let mean_volume = mean_volume(records)?;
    let volume_std_dev = volume_std_dev(records, mean_volume)?;
    let median = median_midpoint(records)?;
    let scan = scanner.scan(records);

    if scan.long.is_none() {
        tracing::warn!(
            "Only {} records, {}-day periods unavailable",
            records.len(),
            windows.long
        );
    }

    Ok(StockStats {
        days: records.len(),
        first_date: first.date,
        last_date: last.date,
        min_price: extrema.min_price,
        max_price: extrema.max_price,
        min_volume: extrema.min_volume,
        max_volume: extrema.max_volume,
        mean_close,
        mean_volume,
        volume_std_dev,
        median,
        short_window: scan.short,
        long_window: scan.long,
    })
}

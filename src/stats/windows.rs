use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::models::{DailyRecord, PeriodPerformance, WindowExtremes};

pub const DEFAULT_SHORT_WINDOW: usize = 5;
pub const DEFAULT_LONG_WINDOW: usize = 20;

/// Which start indices the window scan considers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScanBoundary {
    /// Every start `0..=n - length`, each length scanned independently
    #[default]
    Inclusive,
    /// Single joint loop over `1..n - short`; the long window is only
    /// compared while `i < n - long`, so the last valid start of either
    /// length is never considered
    Legacy,
}

/// Window lengths and boundary convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub short: usize,
    pub long: usize,
    pub boundary: ScanBoundary,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            short: DEFAULT_SHORT_WINDOW,
            long: DEFAULT_LONG_WINDOW,
            boundary: ScanBoundary::Inclusive,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.short == 0 || self.short > self.long {
            return Err(StatsError::InvalidWindow {
                short: self.short,
                long: self.long,
            });
        }
        Ok(())
    }
}

/// Trend of the window starting at `start`: `close[start + length - 1] - open[start]`
///
/// `None` for an empty window or one that runs past the end of the series.
pub fn trend(records: &[DailyRecord], start: usize, length: usize) -> Option<f64> {
    let end = start.checked_add(length.checked_sub(1)?)?;
    Some(records.get(end)?.close - records.get(start)?.open)
}

// Callers have already checked that the window fits
fn window_trend(records: &[DailyRecord], start: usize, length: usize) -> f64 {
    records[start + length - 1].close - records[start].open
}

/// Running best/worst for one window length
///
/// Index 0 is the seed. Later starts only win on strict improvement, so
/// ties keep the earliest window.
struct ExtremeTracker {
    length: usize,
    best: (usize, f64),
    worst: (usize, f64),
}

impl ExtremeTracker {
    fn seed(records: &[DailyRecord], length: usize) -> Self {
        let value = window_trend(records, 0, length);
        Self {
            length,
            best: (0, value),
            worst: (0, value),
        }
    }

    fn offer(&mut self, start: usize, value: f64) {
        if value > self.best.1 {
            self.best = (start, value);
        }
        if value < self.worst.1 {
            self.worst = (start, value);
        }
    }

    fn finish(self, records: &[DailyRecord]) -> WindowExtremes {
        WindowExtremes {
            best: period(records, self.best.0, self.length, self.best.1),
            worst: period(records, self.worst.0, self.length, self.worst.1),
        }
    }
}

fn period(records: &[DailyRecord], start: usize, length: usize, trend: f64) -> PeriodPerformance {
    let end = start + length - 1;
    PeriodPerformance {
        length,
        start_index: start,
        end_index: end,
        start_date: records[start].date,
        end_date: records[end].date,
        trend,
    }
}

fn require(records: &[DailyRecord], length: usize) -> Result<(), StatsError> {
    if records.len() < length {
        return Err(StatsError::InsufficientData {
            operation: "window scan",
            required: length,
            actual: records.len(),
        });
    }
    Ok(())
}

/// Best and worst window of `length` over every valid start index
pub fn scan_window(records: &[DailyRecord], length: usize) -> Result<WindowExtremes, StatsError> {
    if length == 0 {
        return Err(StatsError::InvalidWindow {
            short: length,
            long: length,
        });
    }
    require(records, length)?;

    let mut tracker = ExtremeTracker::seed(records, length);
    for start in 1..=records.len() - length {
        tracker.offer(start, window_trend(records, start, length));
    }

    Ok(tracker.finish(records))
}

/// Joint short/long scan with the legacy stopping boundaries
///
/// Requires `n >= long`. The loop runs `i` over `1..n - short` and compares
/// the long window only while `i < n - long`.
pub fn scan_legacy(
    records: &[DailyRecord],
    short: usize,
    long: usize,
) -> Result<(WindowExtremes, WindowExtremes), StatsError> {
    WindowConfig {
        short,
        long,
        boundary: ScanBoundary::Legacy,
    }
    .validate()?;
    require(records, long)?;

    let n = records.len();
    let mut short_tracker = ExtremeTracker::seed(records, short);
    let mut long_tracker = ExtremeTracker::seed(records, long);

    for i in 1..n - short {
        if i < n - long {
            long_tracker.offer(i, window_trend(records, i, long));
        }
        short_tracker.offer(i, window_trend(records, i, short));
    }

    Ok((short_tracker.finish(records), long_tracker.finish(records)))
}

/// Window scan output; a length that does not fit the series is `None`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowScan {
    pub short: Option<WindowExtremes>,
    pub long: Option<WindowExtremes>,
}

/// Scans the configured short and long windows over a series
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowScanner {
    config: WindowConfig,
}

impl WindowScanner {
    pub fn new(config: WindowConfig) -> Result<Self, StatsError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Scan both lengths
    ///
    /// Insufficient data for a length is not an error here: that length is
    /// reported as `None` and the rest of the analysis stays valid.
    pub fn scan(&self, records: &[DailyRecord]) -> WindowScan {
        let WindowConfig {
            short,
            long,
            boundary,
        } = self.config;

        match boundary {
            ScanBoundary::Inclusive => WindowScan {
                short: self.optional(scan_window(records, short)),
                long: self.optional(scan_window(records, long)),
            },
            ScanBoundary::Legacy => match scan_legacy(records, short, long) {
                Ok((s, l)) => WindowScan {
                    short: Some(s),
                    long: Some(l),
                },
                Err(e) => {
                    tracing::debug!("Legacy window scan skipped: {}", e);
                    WindowScan {
                        short: None,
                        long: None,
                    }
                }
            },
        }
    }

    fn optional(&self, result: Result<WindowExtremes, StatsError>) -> Option<WindowExtremes> {
        match result {
            Ok(extremes) => Some(extremes),
            Err(e) => {
                tracing::debug!("Window scan skipped: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(opens: &[f64], closes: &[f64]) -> Vec<DailyRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        opens
            .iter()
            .zip(closes)
            .enumerate()
            .map(|(i, (&o, &c))| {
                DailyRecord::new(start + Duration::days(i as i64), o, o.max(c), o.min(c), c, 1000)
            })
            .collect()
    }

    fn rising(n: usize) -> Vec<DailyRecord> {
        let prices: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        series(&prices, &prices)
    }

    #[test]
    fn test_trend_formula() {
        let records = series(&[10.0, 10.0, 10.0], &[11.0, 12.0, 15.0]);
        assert_eq!(trend(&records, 0, 3), Some(5.0));
        assert_eq!(trend(&records, 1, 2), Some(5.0));
        assert_eq!(trend(&records, 2, 1), Some(5.0));
    }

    #[test]
    fn test_trend_outside_series_is_none() {
        let records = series(&[10.0, 10.0, 10.0], &[11.0, 12.0, 15.0]);
        assert_eq!(trend(&records, 0, 0), None);
        assert_eq!(trend(&records, 1, 3), None);
        assert_eq!(trend(&records, 3, 1), None);
        assert_eq!(trend(&records, usize::MAX, 2), None);
        assert_eq!(trend(&[], 0, 1), None);
    }

    #[test]
    fn test_later_strictly_better_window_wins() {
        let records = series(
            &[10.0, 10.0, 10.0, 10.0, 10.0, 50.0],
            &[11.0, 11.0, 11.0, 11.0, 11.0, 60.0],
        );

        let extremes = scan_window(&records, 5).unwrap();

        // i=0: 11 - 10 = 1, i=1: 60 - 10 = 50
        assert_eq!(extremes.best.start_index, 1);
        assert_eq!(extremes.best.end_index, 5);
        assert_eq!(extremes.best.trend, 50.0);
        assert_eq!(extremes.worst.start_index, 0);
        assert_eq!(extremes.worst.trend, 1.0);
    }

    #[test]
    fn test_ties_keep_earliest_window() {
        let records = series(&[10.0; 8], &[10.0; 8]);

        let extremes = scan_window(&records, 5).unwrap();

        assert_eq!(extremes.best.start_index, 0);
        assert_eq!(extremes.worst.start_index, 0);
    }

    #[test]
    fn test_exact_length_has_single_window() {
        let records = rising(20);

        let extremes = scan_window(&records, 20).unwrap();

        assert_eq!(extremes.best, extremes.worst);
        assert_eq!(extremes.best.start_index, 0);
        assert_eq!(extremes.best.end_index, 19);
        assert_eq!(extremes.best.trend, 19.0);
    }

    #[test]
    fn test_last_window_is_considered() {
        let mut records = rising(25);
        records[24].close = 1_000.0;

        let extremes = scan_window(&records, 5).unwrap();

        assert_eq!(extremes.best.start_index, 20);
        assert_eq!(extremes.best.end_date, records[24].date);
    }

    #[test]
    fn test_insufficient_data() {
        let records = rising(4);

        assert_eq!(
            scan_window(&records, 5),
            Err(StatsError::InsufficientData {
                operation: "window scan",
                required: 5,
                actual: 4,
            })
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        let records = rising(4);
        assert!(matches!(
            scan_window(&records, 0),
            Err(StatsError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_worst_never_exceeds_best() {
        let opens = [5.0, 9.0, 2.0, 8.0, 7.0, 3.0, 6.0, 1.0, 4.0, 9.0, 2.0, 5.0];
        let closes = [6.0, 1.0, 9.0, 3.0, 2.0, 8.0, 4.0, 7.0, 5.0, 1.0, 9.0, 3.0];
        let records = series(&opens, &closes);

        for length in 1..=records.len() {
            let extremes = scan_window(&records, length).unwrap();
            assert!(extremes.worst.trend <= extremes.best.trend);
        }
    }

    #[test]
    fn test_legacy_skips_final_windows() {
        // 25 days rising, then a spike on the last close
        let mut records = rising(25);
        records[24].close = 1_000.0;

        let (short, long) = scan_legacy(&records, 5, 20).unwrap();

        // Start 20 (the only 5-day window containing day 24) is never visited
        assert_eq!(short.best.start_index, 0);
        assert_eq!(short.best.trend, 4.0);
        // Valid long starts are 0..=5 but the loop stops at i < 5
        assert!(long.best.start_index <= 4);
    }

    #[test]
    fn test_legacy_long_scan_stops_before_short() {
        let n = 30;
        let mut opens = vec![100.0; n];
        let closes = vec![100.0; n];
        // Start 9 would be the best 20-day and 5-day window (low open)
        opens[9] = 50.0;
        let records = series(&opens, &closes);

        let (short, long) = scan_legacy(&records, 5, 20).unwrap();
        assert_eq!(short.best.start_index, 9);
        assert_eq!(long.best.start_index, 9);

        // n - 20 = 10, so start 10 is outside the long loop but inside the short one
        let mut opens = vec![100.0; n];
        opens[10] = 50.0;
        let records = series(&opens, &closes);

        let (short, long) = scan_legacy(&records, 5, 20).unwrap();
        assert_eq!(short.best.start_index, 10);
        assert_eq!(long.best.start_index, 0);

        let inclusive = scan_window(&records, 20).unwrap();
        assert_eq!(inclusive.best.start_index, 10);
    }

    #[test]
    fn test_legacy_requires_long_window() {
        let records = rising(19);
        assert!(matches!(
            scan_legacy(&records, 5, 20),
            Err(StatsError::InsufficientData { required: 20, .. })
        ));
    }

    #[test]
    fn test_window_config_validation() {
        assert!(WindowConfig::default().validate().is_ok());

        let bad = WindowConfig {
            short: 10,
            long: 5,
            boundary: ScanBoundary::Inclusive,
        };
        assert_eq!(
            bad.validate(),
            Err(StatsError::InvalidWindow { short: 10, long: 5 })
        );
        assert!(WindowScanner::new(bad).is_err());
    }

    #[test]
    fn test_scanner_short_series_reports_none_for_long() {
        let records = rising(10);
        let scanner = WindowScanner::default();

        let scan = scanner.scan(&records);

        assert!(scan.short.is_some());
        assert!(scan.long.is_none());
    }

    #[test]
    fn test_scanner_legacy_short_series_reports_none() {
        let records = rising(10);
        let scanner = WindowScanner::new(WindowConfig {
            boundary: ScanBoundary::Legacy,
            ..WindowConfig::default()
        })
        .unwrap();

        let scan = scanner.scan(&records);

        assert!(scan.short.is_none());
        assert!(scan.long.is_none());
    }
}

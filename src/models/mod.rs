use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of price and volume data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: i64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Midpoint of open and close, the ordering and median key
    pub fn midpoint(&self) -> f64 {
        (self.open + self.close) / 2.0
    }
}

/// A price extreme and the date it was first reached
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceExtreme {
    pub price: f64,
    pub date: NaiveDate,
}

/// A volume extreme and the date it was first reached
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VolumeExtreme {
    pub volume: i64,
    pub date: NaiveDate,
}

/// Best or worst fixed-length period found by the window scan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PeriodPerformance {
    pub length: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// close[end] - open[start]
    pub trend: f64,
}

/// Best and worst periods for one window length
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WindowExtremes {
    pub best: PeriodPerformance,
    pub worst: PeriodPerformance,
}

/// Full result bundle handed to the report layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockStats {
    pub days: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,

    // Extrema
    pub min_price: PriceExtreme,
    pub max_price: PriceExtreme,
    pub min_volume: VolumeExtreme,
    pub max_volume: VolumeExtreme,

    // Central tendency / dispersion
    pub mean_close: f64,
    pub mean_volume: i64, // truncated, feeds volume_std_dev
    pub volume_std_dev: f64,
    pub median: f64, // median of midpoints, not of closes

    // Window scan; None when the series is shorter than the window
    pub short_window: Option<WindowExtremes>,
    pub long_window: Option<WindowExtremes>,
}

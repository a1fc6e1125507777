use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::models::{DailyRecord, PriceExtreme, VolumeExtreme};
use crate::stats::ordering::sort_by_midpoint;

/// Price and volume extremes of a series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Extrema {
    pub min_price: PriceExtreme,
    pub max_price: PriceExtreme,
    pub min_volume: VolumeExtreme,
    pub max_volume: VolumeExtreme,
}

/// Find lowest low, highest high, lowest and highest volume in one pass
///
/// Seeded with the first record. A later record only replaces a running
/// extreme on strict improvement, so ties resolve to the earliest date.
pub fn find_extrema(records: &[DailyRecord]) -> Result<Extrema, StatsError> {
    let first = records.first().ok_or(StatsError::EmptySeries)?;

    let mut extrema = Extrema {
        min_price: PriceExtreme {
            price: first.low,
            date: first.date,
        },
        max_price: PriceExtreme {
            price: first.high,
            date: first.date,
        },
        min_volume: VolumeExtreme {
            volume: first.volume,
            date: first.date,
        },
        max_volume: VolumeExtreme {
            volume: first.volume,
            date: first.date,
        },
    };

    for record in &records[1..] {
        if record.low < extrema.min_price.price {
            extrema.min_price = PriceExtreme {
                price: record.low,
                date: record.date,
            };
        }
        if record.high > extrema.max_price.price {
            extrema.max_price = PriceExtreme {
                price: record.high,
                date: record.date,
            };
        }
        if record.volume < extrema.min_volume.volume {
            extrema.min_volume = VolumeExtreme {
                volume: record.volume,
                date: record.date,
            };
        }
        if record.volume > extrema.max_volume.volume {
            extrema.max_volume = VolumeExtreme {
                volume: record.volume,
                date: record.date,
            };
        }
    }

    Ok(extrema)
}

/// Arithmetic mean of closing prices
pub fn mean_close(records: &[DailyRecord]) -> Result<f64, StatsError> {
    if records.is_empty() {
        return Err(StatsError::EmptySeries);
    }

    let sum: f64 = records.iter().map(|r| r.close).sum();
    Ok(sum / records.len() as f64)
}

/// Mean volume, integer accumulation with truncating division
///
/// The result is truncated toward zero, not rounded. [`volume_std_dev`]
/// measures deviation from this truncated value.
pub fn mean_volume(records: &[DailyRecord]) -> Result<i64, StatsError> {
    if records.is_empty() {
        return Err(StatsError::EmptySeries);
    }

    let sum: i128 = records.iter().map(|r| r.volume as i128).sum();
    Ok((sum / records.len() as i128) as i64)
}

/// Population standard deviation of volume around `mean_volume`
///
/// Divides by `n`, not `n - 1`. Callers pass the truncated mean from
/// [`mean_volume`]; using the exact mean instead changes the result whenever
/// the volume sum is not divisible by `n`.
pub fn volume_std_dev(records: &[DailyRecord], mean_volume: i64) -> Result<f64, StatsError> {
    if records.is_empty() {
        return Err(StatsError::EmptySeries);
    }

    let mean = mean_volume as f64;
    let sum_sq: f64 = records
        .iter()
        .map(|r| {
            let diff = r.volume as f64 - mean;
            diff * diff
        })
        .sum();

    Ok((sum_sq / records.len() as f64).sqrt())
}

/// Median of record midpoints `(open + close) / 2`
///
/// Sorts a private copy; the caller's slice is left untouched. With an even
/// count the two middle midpoints are averaged.
pub fn median_midpoint(records: &[DailyRecord]) -> Result<f64, StatsError> {
    if records.is_empty() {
        return Err(StatsError::EmptySeries);
    }

    let mut sorted = records.to_vec();
    sort_by_midpoint(&mut sorted);

    let n = sorted.len();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1].midpoint() + sorted[n / 2].midpoint()) / 2.0
    } else {
        sorted[n / 2].midpoint()
    };

    tracing::debug!("Median midpoint over {} records: {}", n, median);
    Ok(median)
}

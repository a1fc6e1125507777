use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::DailyRecord;

/// Market scenario types for synthetic series
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MarketScenario {
    /// Steady uptrend with noise (+0.5% daily drift)
    Uptrend,
    /// Steady downtrend with noise (-0.5% daily drift)
    Downtrend,
    /// Mean-reverting around the base price
    Sideways,
    /// Large daily swings (±5%)
    Volatile,
}

/// Generates reproducible daily price/volume series
pub struct SyntheticSeries {
    rng: StdRng,
    base_price: f64,
    base_volume: f64,
}

impl SyntheticSeries {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 150.0,
            base_volume: 1_000_000.0,
        }
    }

    /// Generate `days` consecutive calendar days starting at `start`
    ///
    /// Every record satisfies `low <= open, close <= high`, prices stay
    /// positive and volumes are positive integers.
    pub fn generate(
        &mut self,
        scenario: MarketScenario,
        days: usize,
        start: NaiveDate,
    ) -> Vec<DailyRecord> {
        let (drift, noise) = match scenario {
            MarketScenario::Uptrend => (0.005, 0.01),
            MarketScenario::Downtrend => (-0.005, 0.01),
            MarketScenario::Sideways => (0.0, 0.01),
            MarketScenario::Volatile => (0.0, 0.05),
        };

        let mut records = Vec::with_capacity(days);
        let mut open = self.base_price;

        for i in 0..days {
            let mut change = drift + self.rng.gen_range(-noise..noise);
            if scenario == MarketScenario::Sideways {
                // Pull back toward the base price
                change += (self.base_price - open) / self.base_price * 0.1;
            }

            let close = (open * (1.0 + change)).max(0.01);
            let high = open.max(close) * (1.0 + self.rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - self.rng.gen_range(0.0..0.01));
            let volume = (self.base_volume * self.rng.gen_range(0.5..1.5)).round() as i64;

            records.push(DailyRecord::new(
                start + Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume.max(1),
            ));

            // Small overnight gap
            open = (close * (1.0 + self.rng.gen_range(-0.002..0.002))).max(0.01);
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = SyntheticSeries::new(7).generate(MarketScenario::Volatile, 50, start());
        let b = SyntheticSeries::new(7).generate(MarketScenario::Volatile, 50, start());
        assert_eq!(a, b);
    }

    #[test]
    fn test_records_are_consistent() {
        for scenario in [
            MarketScenario::Uptrend,
            MarketScenario::Downtrend,
            MarketScenario::Sideways,
            MarketScenario::Volatile,
        ] {
            let records = SyntheticSeries::new(42).generate(scenario, 200, start());

            assert_eq!(records.len(), 200);
            for r in &records {
                assert!(r.low <= r.open && r.low <= r.close, "{:?}", r);
                assert!(r.high >= r.open && r.high >= r.close, "{:?}", r);
                assert!(r.low > 0.0);
                assert!(r.volume > 0);
            }
            assert!(records.windows(2).all(|w| w[1].date == w[0].date + Duration::days(1)));
        }
    }

    #[test]
    fn test_uptrend_ends_higher() {
        let records = SyntheticSeries::new(42).generate(MarketScenario::Uptrend, 250, start());
        assert!(records[249].close > records[0].open);
    }
}

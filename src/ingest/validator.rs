use crate::models::DailyRecord;

/// Sanity checks for a daily record
///
/// The statistics engine never calls this; it is the loader's job to decide
/// whether a failing record is rejected or only reported.
pub struct RecordValidator;

impl RecordValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a record for correctness
    pub fn validate(&self, record: &DailyRecord) -> Result<(), String> {
        self.validate_prices(record)?;
        self.validate_ohlc_relationship(record)?;
        Ok(())
    }

    /// Validate that all prices are positive and volume is not negative
    fn validate_prices(&self, record: &DailyRecord) -> Result<(), String> {
        let prices = [
            ("open", record.open),
            ("high", record.high),
            ("low", record.low),
            ("close", record.close),
        ];
        for (name, price) in prices {
            if !price.is_finite() || price <= 0.0 {
                return Err(format!("Invalid {} price: {}", name, price));
            }
        }
        // Zero volume happens on halted days
        if record.volume < 0 {
            return Err(format!("Invalid volume: {}", record.volume));
        }
        Ok(())
    }

    /// Validate OHLC relationships: low <= open, close <= high
    fn validate_ohlc_relationship(&self, record: &DailyRecord) -> Result<(), String> {
        if record.high < record.low {
            return Err(format!(
                "High ({}) is less than low ({})",
                record.high, record.low
            ));
        }

        for (name, price) in [("open", record.open), ("close", record.close)] {
            if record.high < price {
                return Err(format!(
                    "High ({}) is less than {} ({})",
                    record.high, name, price
                ));
            }
            if record.low > price {
                return Err(format!(
                    "Low ({}) is greater than {} ({})",
                    record.low, name, price
                ));
            }
        }

        Ok(())
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};

    fn make_valid_record() -> DailyRecord {
        DailyRecord::new(
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            100.0,
            102.0,
            99.0,
            101.0,
            1_000_000,
        )
    }

    #[test]
    fn test_validate_valid_record() {
        let validator = RecordValidator::new();
        assert!(validator.validate(&make_valid_record()).is_ok());
    }

    #[test]
    fn test_validate_negative_open() {
        let validator = RecordValidator::new();
        let mut record = make_valid_record();
        record.open = -100.0;

        let result = validator.validate(&record);
        assert!(result.unwrap_err().contains("Invalid open price"));
    }

    #[test]
    fn test_validate_nan_close() {
        let validator = RecordValidator::new();
        let mut record = make_valid_record();
        record.close = f64::NAN;

        let result = validator.validate(&record);
        assert!(result.unwrap_err().contains("Invalid close price"));
    }

    #[test]
    fn test_validate_zero_volume_allowed() {
        let validator = RecordValidator::new();
        let mut record = make_valid_record();
        record.volume = 0;

        assert!(validator.validate(&record).is_ok());
    }

    #[test]
    fn test_validate_negative_volume() {
        let validator = RecordValidator::new();
        let mut record = make_valid_record();
        record.volume = -5;

        assert!(validator.validate(&record).unwrap_err().contains("Invalid volume"));
    }

    #[test]
    fn test_validate_ignores_calendar_date() {
        let validator = RecordValidator::new();
        let mut record = make_valid_record();
        record.date = Utc::now().date_naive() + Duration::days(30);

        assert!(validator.validate(&record).is_ok());
    }

    #[test]
    fn test_validate_high_less_than_low() {
        let validator = RecordValidator::new();
        let mut record = make_valid_record();
        record.high = 98.0;
        record.low = 99.5;

        assert!(validator
            .validate(&record)
            .unwrap_err()
            .contains("High (98) is less than low (99.5)"));
    }

    #[test]
    fn test_validate_close_above_high() {
        let validator = RecordValidator::new();
        let mut record = make_valid_record();
        record.close = 103.0;

        assert!(validator
            .validate(&record)
            .unwrap_err()
            .contains("High (102) is less than close (103)"));
    }

    #[test]
    fn test_validate_open_below_low() {
        let validator = RecordValidator::new();
        let mut record = make_valid_record();
        record.open = 98.5;

        assert!(validator
            .validate(&record)
            .unwrap_err()
            .contains("Low (99) is greater than open (98.5)"));
    }
}

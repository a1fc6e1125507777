use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::LoadError;
use crate::ingest::validator::RecordValidator;
use crate::models::DailyRecord;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads `Date,Open,High,Low,Close,Volume` CSV into an ordered series
///
/// Columns are positional; the header row is skipped and extra trailing
/// columns are ignored. Dates must be strictly ascending.
pub struct CsvLoader {
    validator: RecordValidator,
    strict: bool,
}

impl CsvLoader {
    pub fn new() -> Self {
        Self {
            validator: RecordValidator::new(),
            strict: false,
        }
    }

    /// Reject records that fail validation instead of logging them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Load a CSV file from disk
    pub fn load_path(&self, path: &Path) -> Result<Vec<DailyRecord>, LoadError> {
        tracing::info!("Loading daily records from {}", path.display());
        let file = File::open(path)?;
        self.load_reader(file)
    }

    /// Load CSV from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<DailyRecord>, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records: Vec<DailyRecord> = Vec::new();
        let mut flagged = 0usize;

        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            let record = parse_row(&row, line)?;

            if let Some(previous) = records.last() {
                if record.date <= previous.date {
                    return Err(LoadError::OutOfOrder {
                        line,
                        previous: previous.date,
                        current: record.date,
                    });
                }
            }

            if let Err(reason) = self.validator.validate(&record) {
                if self.strict {
                    return Err(LoadError::Invalid { line, reason });
                }
                tracing::warn!("Line {}: {} (kept)", line, reason);
                flagged += 1;
            }

            records.push(record);
        }

        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        tracing::debug!(
            "Loaded {} records ({} flagged by validation)",
            records.len(),
            flagged
        );
        Ok(records)
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Symbol shown in reports: the file name up to its first `.`
pub fn symbol_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

fn parse_row(row: &StringRecord, line: u64) -> Result<DailyRecord, LoadError> {
    let cell = |index: usize, field: &'static str| {
        row.get(index).ok_or_else(|| LoadError::Parse {
            line,
            field,
            value: String::new(),
        })
    };

    Ok(DailyRecord {
        date: parse_date(cell(0, "date")?, line)?,
        open: parse_price(cell(1, "open")?, "open", line)?,
        high: parse_price(cell(2, "high")?, "high", line)?,
        low: parse_price(cell(3, "low")?, "low", line)?,
        close: parse_price(cell(4, "close")?, "close", line)?,
        volume: parse_volume(cell(5, "volume")?, line)?,
    })
}

/// Only the leading `YYYY-MM-DD` is used; time and zone suffixes are dropped
fn parse_date(value: &str, line: u64) -> Result<NaiveDate, LoadError> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, DATE_FORMAT).map_err(|_| LoadError::Parse {
        line,
        field: "date",
        value: value.to_string(),
    })
}

fn parse_price(value: &str, field: &'static str, line: u64) -> Result<f64, LoadError> {
    value.parse::<f64>().map_err(|_| LoadError::Parse {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_volume(value: &str, line: u64) -> Result<i64, LoadError> {
    if let Ok(volume) = value.parse::<i64>() {
        return Ok(volume);
    }

    // Some exports write whole volumes as "12345.0"
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(LoadError::Parse {
            line,
            field: "volume",
            value: value.to_string(),
        }),
    }
}

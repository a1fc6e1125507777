// Load a series and compute its statistics in one call

use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::ingest::{symbol_from_path, CsvLoader};
use crate::models::{DailyRecord, StockStats};
use crate::settings::Settings;
use crate::stats::compute_stats;

/// Statistics for one symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub symbol: String,
    pub stats: StockStats,
}

/// Analyze a CSV file; the symbol is the file stem
pub fn analyze_file(path: &Path, settings: &Settings) -> Result<Analysis> {
    let records = loader(settings).load_path(path)?;
    analyze(symbol_from_path(path), &records, settings)
}

/// Analyze CSV from any reader under the given symbol
pub fn analyze_reader<R: Read>(symbol: &str, reader: R, settings: &Settings) -> Result<Analysis> {
    let records = loader(settings).load_reader(reader)?;
    analyze(symbol.to_string(), &records, settings)
}

fn loader(settings: &Settings) -> CsvLoader {
    CsvLoader::new().strict(settings.ingest.strict_ohlc)
}

/// Compute statistics for an already loaded series
pub fn analyze(symbol: String, records: &[DailyRecord], settings: &Settings) -> Result<Analysis> {
    tracing::info!("Analyzing {} ({} days)", symbol, records.len());
    let stats = compute_stats(records, settings.windows)?;
    Ok(Analysis { symbol, stats })
}

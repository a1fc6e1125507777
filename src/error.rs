use thiserror::Error;

/// Failures of the statistics engine
///
/// All of these are precondition violations: the engine never reads past the
/// end of a series or divides by a zero count, it reports one of these instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Series is empty")]
    EmptySeries,

    #[error("Insufficient data for {operation}: need {required} records, have {actual}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Invalid window lengths: short={short}, long={long} (need 1 <= short <= long)")]
    InvalidWindow { short: usize, long: usize },
}

/// Failures while reading daily records from CSV
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: cannot parse {field} from {value:?}")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: date {current} is not after previous date {previous}")]
    OutOfOrder {
        line: u64,
        previous: chrono::NaiveDate,
        current: chrono::NaiveDate,
    },

    #[error("Line {line}: {reason}")]
    Invalid { line: u64, reason: String },

    #[error("No records found")]
    Empty,
}

/// Failures while assembling settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Crate-wide error
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

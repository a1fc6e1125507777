// Core modules
pub mod analysis;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
pub mod settings;
pub mod stats;
pub mod synthetic;

// Re-export commonly used types
pub use analysis::{analyze_file, analyze_reader, Analysis};
pub use error::{ConfigError, Error, LoadError, StatsError};
pub use models::*;
pub use settings::Settings;
pub use stats::{compute_stats, ScanBoundary, WindowConfig};

// Error handling
pub use error::Result;

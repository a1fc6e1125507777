// Ingestion: CSV daily records in, validated ordered series out

pub mod csv_loader;
pub mod validator;

pub use csv_loader::{symbol_from_path, CsvLoader};
pub use validator::RecordValidator;

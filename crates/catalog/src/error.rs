use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed record {record}: {reason}")]
    MalformedRecord { record: usize, reason: String },

    #[error("Failed to read the dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to build stock: {0}")]
    Core(#[from] CoreError),
}

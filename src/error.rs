use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing input '{source_name}' at {}: {cause}", .path.display())]
    MissingInput {
        source_name: &'static str,
        path: PathBuf,
        cause: csv::Error,
    },

    #[error("Malformed row in '{source_name}': {cause}")]
    MalformedInput {
        source_name: &'static str,
        cause: csv::Error,
    },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Slot already occupied: section {section}, day {day}, hour {hour}")]
    OccupiedSlot {
        section: String,
        day: usize,
        hour: usize,
    },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV failure: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON failure: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by the caller's input rather than the engine.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::MissingInput { .. } | Error::MalformedInput { .. } | Error::InvalidCatalog(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

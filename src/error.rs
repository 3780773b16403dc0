use thiserror::Error;

/// Errors that may rise when loading, building or exporting tables.
/// Connectivity filtering and best link selection never fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("column \"{name}\" has {found} rows, expecting {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("duplicate column \"{0}\"")]
    DuplicateColumn(String),
    #[error("unknown column \"{0}\"")]
    UnknownColumn(String),
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("{dataset} row {row_index} has {found} columns, expected {expected}")]
    SchemaShape {
        dataset: &'static str,
        row_index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{dataset} row {row_index}: no 4-digit year in '{value}'")]
    MalformedYear {
        dataset: &'static str,
        row_index: usize,
        value: String,
    },

    #[error("{dataset} row {row_index}: column '{column}' value '{value}' is not {expected}")]
    TypeCoercion {
        dataset: &'static str,
        row_index: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{dataset} contains duplicate key '{key}'")]
    DuplicateKey { dataset: &'static str, key: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{dataset} frame could not be built: {message}")]
    Frame {
        dataset: &'static str,
        message: String,
    },
}

use std::path::{Path, PathBuf};

use culturedash_parser::{read_delimited_file, NormalizeError, RawTable};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    File(#[from] NormalizeError),

    #[error("table '{table}' does not exist or has no columns")]
    MissingTable { table: String },

    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to start database runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Anything that can hand over every row of a named table.
pub trait DataSource {
    fn describe(&self) -> String;

    fn fetch_all(&mut self, table: &str) -> Result<RawTable, SourceError>;
}

/// Reads delimited files; the table name is a path relative to `base_dir`.
#[derive(Debug, Clone)]
pub struct DelimitedFileSource {
    base_dir: PathBuf,
    delimiter: u8,
}

impl DelimitedFileSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl DataSource for DelimitedFileSource {
    fn describe(&self) -> String {
        format!("files under {}", self.base_dir.display())
    }

    fn fetch_all(&mut self, table: &str) -> Result<RawTable, SourceError> {
        let path = self.base_dir.join(Path::new(table));
        debug!(path = %path.display(), "reading delimited file");
        Ok(read_delimited_file(&path, self.delimiter)?)
    }
}

// crates/culturedash-core/src/error.rs

use std::path::PathBuf;

use culturedash_parser::NormalizeError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::metrics::MetricError;
use crate::source::SourceError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch {dataset}: {source}")]
    Source {
        dataset: &'static str,
        #[source]
        source: SourceError,
    },

    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Metric computation failed: {0}")]
    Metric(#[from] MetricError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

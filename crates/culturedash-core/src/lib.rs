pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod snapshot;
pub mod source;
pub mod views;

pub use config::{ConfigError, DashboardConfig, SourceSpec};
pub use error::{PipelineError, Result};
pub use metrics::{
    aggregate, correlation, extremum, ratio, top_n, AggregateOp, Extremum, ExtremumKind,
    MetricError, MetricRecord, NaturalKey, SortOrder,
};
pub use snapshot::{Dataset, RawSnapshot, Snapshot};
pub use source::{DataSource, DelimitedFileSource, SourceError};
pub use views::Dashboard;

use std::fmt;

use culturedash_parser::{
    normalize_conservation, normalize_funds, normalize_institutes, normalize_tourism,
    ConservationComponent, FundsRecord, InstituteRecord, RawTable, TourismRecord,
};
use serde::Serialize;
use tracing::info;

use crate::config::{ConfigError, DashboardConfig, SourceSpec};
use crate::error::{PipelineError, Result};
use crate::source::{DataSource, DelimitedFileSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Funds,
    Tourism,
    Conservation,
    Institutes,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Funds,
        Dataset::Tourism,
        Dataset::Conservation,
        Dataset::Institutes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Funds => "funds",
            Dataset::Tourism => "tourism",
            Dataset::Conservation => "conservation",
            Dataset::Institutes => "institutes",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four raw tables exactly as fetched.
#[derive(Debug, Clone, Default)]
pub struct RawSnapshot {
    pub funds: RawTable,
    pub tourism: RawTable,
    pub conservation: RawTable,
    pub institutes: RawTable,
}

impl RawSnapshot {
    /// Fetches every dataset from its configured source. `database` must be
    /// provided when any dataset is configured for the database.
    pub fn fetch(
        config: &DashboardConfig,
        mut database: Option<&mut dyn DataSource>,
    ) -> Result<Self> {
        let mut fetch = |dataset: Dataset| -> Result<RawTable> {
            let table = match config.source(dataset) {
                SourceSpec::File { path, delimiter } => {
                    let mut source = DelimitedFileSource::new(&config.data_dir)
                        .with_delimiter(*delimiter as u8);
                    source.fetch_all(&path.to_string_lossy())
                }
                SourceSpec::Database { table } => match database.as_mut() {
                    Some(source) => source.fetch_all(table),
                    None => {
                        return Err(ConfigError::DatabaseUnsupported {
                            dataset: dataset.as_str(),
                        }
                        .into())
                    }
                },
            }
            .map_err(|source| PipelineError::Source {
                dataset: dataset.as_str(),
                source,
            })?;
            info!(%dataset, rows = table.len(), "fetched raw table");
            Ok(table)
        };

        Ok(Self {
            funds: fetch(Dataset::Funds)?,
            tourism: fetch(Dataset::Tourism)?,
            conservation: fetch(Dataset::Conservation)?,
            institutes: fetch(Dataset::Institutes)?,
        })
    }
}

/// Normalized, immutable records of all four datasets for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub funds: Vec<FundsRecord>,
    pub tourism: Vec<TourismRecord>,
    pub conservation: Vec<ConservationComponent>,
    pub institutes: Vec<InstituteRecord>,
}

impl Snapshot {
    pub fn normalize(raw: &RawSnapshot) -> Result<Self> {
        let snapshot = Self {
            funds: normalize_funds(&raw.funds)?,
            tourism: normalize_tourism(&raw.tourism)?,
            conservation: normalize_conservation(&raw.conservation)?,
            institutes: normalize_institutes(&raw.institutes)?,
        };
        info!(
            funds = snapshot.funds.len(),
            tourism = snapshot.tourism.len(),
            conservation = snapshot.conservation.len(),
            institutes = snapshot.institutes.len(),
            "snapshot normalized"
        );
        Ok(snapshot)
    }

    /// Fetches and normalizes every dataset. A database connection is opened
    /// only when the config asks for one and is closed before normalization.
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        let raw = if config.uses_database() {
            fetch_with_database(config)?
        } else {
            RawSnapshot::fetch(config, None)?
        };
        Self::normalize(&raw)
    }

    pub fn dataset_len(&self, dataset: Dataset) -> usize {
        match dataset {
            Dataset::Funds => self.funds.len(),
            Dataset::Tourism => self.tourism.len(),
            Dataset::Conservation => self.conservation.len(),
            Dataset::Institutes => self.institutes.len(),
        }
    }
}

#[cfg(feature = "postgres")]
fn fetch_with_database(config: &DashboardConfig) -> Result<RawSnapshot> {
    use crate::postgres::PostgresSource;

    let var = &config.database.url_env;
    let url = std::env::var(var).map_err(|_| ConfigError::MissingDatabaseUrl { var: var.clone() })?;
    let mut database = PostgresSource::connect(&url).map_err(|source| PipelineError::Source {
        dataset: "database",
        source,
    })?;
    info!(source = %database.describe(), "fetching database-backed datasets");
    let fetched = RawSnapshot::fetch(config, Some(&mut database));
    database.close();
    fetched
}

#[cfg(not(feature = "postgres"))]
fn fetch_with_database(config: &DashboardConfig) -> Result<RawSnapshot> {
    let dataset = Dataset::ALL
        .into_iter()
        .find(|dataset| config.source(*dataset).is_database())
        .unwrap_or(Dataset::Funds);
    tracing::warn!(%dataset, "database source requested without the postgres feature");
    Err(ConfigError::DatabaseUnsupported {
        dataset: dataset.as_str(),
    }
    .into())
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::snapshot::Dataset;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("source for {dataset}: {message}")]
    InvalidSource {
        dataset: &'static str,
        message: String,
    },

    #[error("environment variable {var} must be set to reach the database")]
    MissingDatabaseUrl { var: String },

    #[error("{dataset} is configured for the database but this build lacks the `postgres` feature")]
    DatabaseUnsupported { dataset: &'static str },
}

/// Where one dataset is read from. Each dataset has exactly one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    File {
        path: PathBuf,
        #[serde(default = "default_delimiter")]
        delimiter: char,
    },
    Database {
        table: String,
    },
}

impl SourceSpec {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceSpec::File {
            path: path.into(),
            delimiter: default_delimiter(),
        }
    }

    pub fn is_database(&self) -> bool {
        matches!(self, SourceSpec::Database { .. })
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_url_env() -> String {
    "DATABASE_URL".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Environment variable holding the connection URL.
    #[serde(default = "default_url_env")]
    pub url_env: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url_env: default_url_env(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub funds: SourceSpec,
    pub tourism: SourceSpec,
    pub conservation: SourceSpec,
    pub institutes: SourceSpec,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            funds: SourceSpec::file("RS_Session_250_AU186.csv"),
            tourism: SourceSpec::file("Tourism_Statistics_Since_1991_2.csv"),
            conservation: SourceSpec::file("Convergenceproject_Conservation.csv"),
            institutes: SourceSpec::file("SES_2007-08_enrl_tech_indus.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base directory for relative file paths.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database: DatabaseConfig::default(),
            sources: SourcesConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if config.data_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.data_dir = parent.join(&config.data_dir);
            }
        }
        debug!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    /// Reads `path` if it exists, otherwise falls back to the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_path(path)
        } else {
            debug!(path = %path.display(), "config not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn source(&self, dataset: Dataset) -> &SourceSpec {
        match dataset {
            Dataset::Funds => &self.sources.funds,
            Dataset::Tourism => &self.sources.tourism,
            Dataset::Conservation => &self.sources.conservation,
            Dataset::Institutes => &self.sources.institutes,
        }
    }

    pub fn uses_database(&self) -> bool {
        Dataset::ALL
            .iter()
            .any(|dataset| self.source(*dataset).is_database())
    }

    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for dataset in Dataset::ALL {
            let invalid = |message: &str| ConfigError::InvalidSource {
                dataset: dataset.as_str(),
                message: message.to_string(),
            };
            match self.source(dataset) {
                SourceSpec::File { path, delimiter } => {
                    if path.as_os_str().is_empty() {
                        return Err(invalid("file path is empty"));
                    }
                    if !delimiter.is_ascii() {
                        return Err(invalid("delimiter must be a single ASCII character"));
                    }
                }
                SourceSpec::Database { table } => {
                    if table.trim().is_empty() {
                        return Err(invalid("table name is empty"));
                    }
                }
            }
        }
        Ok(())
    }
}

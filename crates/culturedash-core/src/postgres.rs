use culturedash_parser::{RawTable, RawValue};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::source::{DataSource, SourceError};

/// Blocking PostgreSQL source. Every column is read as text so coercion stays
/// with the normalizer.
pub struct PostgresSource {
    runtime: Runtime,
    pool: PgPool,
}

impl PostgresSource {
    pub fn connect(database_url: &str) -> Result<Self, SourceError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceError::Runtime)?;
        let pool = runtime.block_on(
            PgPoolOptions::new()
                .max_connections(1)
                .connect(database_url),
        )?;
        info!("database connection established");
        Ok(Self { runtime, pool })
    }

    /// Releases the connection. Consumes the source so it cannot be reused.
    pub fn close(self) {
        self.runtime.block_on(self.pool.close());
        info!("database connection closed");
    }

    fn column_names(&self, table: &str) -> Result<Vec<String>, SourceError> {
        let columns: Vec<String> = self.runtime.block_on(
            sqlx::query_scalar::<_, String>(
                "SELECT column_name::text FROM information_schema.columns \
                 WHERE table_schema = current_schema() AND table_name = $1 \
                 ORDER BY ordinal_position",
            )
            .bind(table)
            .fetch_all(&self.pool),
        )?;
        if columns.is_empty() {
            return Err(SourceError::MissingTable {
                table: table.to_string(),
            });
        }
        Ok(columns)
    }
}

impl DataSource for PostgresSource {
    fn describe(&self) -> String {
        "postgres".to_string()
    }

    fn fetch_all(&mut self, table: &str) -> Result<RawTable, SourceError> {
        let columns = self.column_names(table)?;
        let select_list = columns
            .iter()
            .map(|column| format!("{}::text", quote_identifier(column)))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!("SELECT {select_list} FROM {}", quote_identifier(table));
        debug!(%query, "fetching table");

        let rows = self
            .runtime
            .block_on(sqlx::query(&query).fetch_all(&self.pool))?;

        let rows = rows
            .iter()
            .map(|row| {
                (0..columns.len())
                    .map(|idx| row.try_get::<Option<String>, _>(idx).map(RawValue::from))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RawTable::new(table, columns, rows))
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

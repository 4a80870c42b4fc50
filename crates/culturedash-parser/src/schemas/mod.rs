mod common;
mod conservation;
mod funds;
mod institutes;
mod tourism;

use std::collections::HashSet;

use crate::errors::NormalizeError;
use crate::raw::{RawRow, RawTable};

pub use common::extract_year;
pub use conservation::ConservationSchema;
pub use funds::FundsSchema;
pub use institutes::InstituteSchema;
pub use tourism::TourismSchema;

pub(crate) use common::{parse_optional_f64, parse_optional_i64, parse_text, parse_year};

/// Positional canonical schema for one dataset.
pub trait DatasetSchema {
    type Record;

    fn name(&self) -> &'static str;

    /// Canonical column names, in the order the source delivers them.
    fn columns(&self) -> &'static [&'static str];

    fn normalize_row(&self, row: &RawRow, row_index: usize)
        -> Result<Self::Record, NormalizeError>;

    /// Key that must be unique within the collection, if the dataset has one.
    fn unique_key(&self, _record: &Self::Record) -> Option<String> {
        None
    }
}

/// Validates the shape of every row, then normalizes the rows in order and
/// enforces key uniqueness.
pub fn normalize<S: DatasetSchema>(
    schema: &S,
    table: &RawTable,
) -> Result<Vec<S::Record>, NormalizeError> {
    common::check_shape(schema.name(), schema.columns().len(), table)?;

    let records = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| schema.normalize_row(row, row_index))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for record in &records {
        if let Some(key) = schema.unique_key(record) {
            if !seen.insert(key.clone()) {
                return Err(NormalizeError::DuplicateKey {
                    dataset: schema.name(),
                    key,
                });
            }
        }
    }

    Ok(records)
}

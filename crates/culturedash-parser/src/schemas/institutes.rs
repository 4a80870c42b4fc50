use crate::errors::NormalizeError;
use crate::model::{InstituteField, InstituteRecord};
use crate::raw::RawRow;

use super::{parse_optional_i64, parse_text, DatasetSchema};

/// State-wise ITI/ITC counts and intake capacity.
pub struct InstituteSchema;

impl InstituteSchema {
    pub const NAME: &'static str = "institutes";
    pub const COLUMNS: [&'static str; 3] =
        ["state_or_territory", "institute_count", "intake_capacity"];
}

impl DatasetSchema for InstituteSchema {
    type Record = InstituteRecord;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    fn normalize_row(
        &self,
        row: &RawRow,
        row_index: usize,
    ) -> Result<InstituteRecord, NormalizeError> {
        Ok(InstituteRecord {
            state_or_territory: parse_text(&row[0]),
            institute_count: parse_optional_i64(
                Self::NAME,
                &row[1],
                row_index,
                InstituteField::InstituteCount.canonical_name(),
            )?,
            intake_capacity: parse_optional_i64(
                Self::NAME,
                &row[2],
                row_index,
                InstituteField::IntakeCapacity.canonical_name(),
            )?,
        })
    }

    fn unique_key(&self, record: &InstituteRecord) -> Option<String> {
        Some(record.state_or_territory.clone())
    }
}

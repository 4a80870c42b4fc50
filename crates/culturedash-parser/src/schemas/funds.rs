use crate::errors::NormalizeError;
use crate::model::{FundsField, FundsRecord};
use crate::raw::RawRow;

use super::{parse_optional_f64, parse_year, DatasetSchema};

pub struct FundsSchema;

impl FundsSchema {
    pub const NAME: &'static str = "funds";
    pub const COLUMNS: [&'static str; 3] = ["year", "funds_allocated_cr", "funds_utilized_cr"];
}

impl DatasetSchema for FundsSchema {
    type Record = FundsRecord;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    fn normalize_row(&self, row: &RawRow, row_index: usize) -> Result<FundsRecord, NormalizeError> {
        Ok(FundsRecord {
            year: parse_year(Self::NAME, &row[0], row_index)?,
            funds_allocated: parse_optional_f64(
                Self::NAME,
                &row[1],
                row_index,
                FundsField::Allocated.canonical_name(),
            )?,
            funds_utilized: parse_optional_f64(
                Self::NAME,
                &row[2],
                row_index,
                FundsField::Utilized.canonical_name(),
            )?,
        })
    }

    fn unique_key(&self, record: &FundsRecord) -> Option<String> {
        Some(record.year.to_string())
    }
}

use crate::errors::NormalizeError;
use crate::model::{TourismField, TourismRecord};
use crate::raw::RawRow;

use super::{parse_optional_f64, parse_optional_i64, parse_year, DatasetSchema};

pub struct TourismSchema;

impl TourismSchema {
    pub const NAME: &'static str = "tourism";
    pub const COLUMNS: [&'static str; 5] = [
        "year",
        "foreign_arrivals",
        "earnings_local_cr",
        "earnings_foreign_usd",
        "domestic_visits",
    ];
}

impl DatasetSchema for TourismSchema {
    type Record = TourismRecord;

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
    ) -> Result<TourismRecord, NormalizeError> {
        use TourismField::*;

        Ok(TourismRecord {
            year: parse_year(Self::NAME, &row[0], row_index)?,
            foreign_arrivals: parse_optional_i64(
                Self::NAME,
                &row[1],
                row_index,
                ForeignArrivals.canonical_name(),
            )?,
            earnings_local: parse_optional_f64(
                Self::NAME,
                &row[2],
                row_index,
                EarningsLocal.canonical_name(),
            )?,
            earnings_foreign: parse_optional_f64(
                Self::NAME,
                &row[3],
                row_index,
                EarningsForeign.canonical_name(),
            )?,
            domestic_visits: parse_optional_i64(
                Self::NAME,
                &row[4],
                row_index,
                DomesticVisits.canonical_name(),
            )?,
        })
    }

    fn unique_key(&self, record: &TourismRecord) -> Option<String> {
        Some(record.year.to_string())
    }
}

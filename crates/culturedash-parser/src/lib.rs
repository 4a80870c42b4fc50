pub mod errors;
pub mod frames;
pub mod model;
pub mod raw;
pub mod schemas;

pub use errors::NormalizeError;
pub use model::{
    ConservationComponent, ConservationField, FundsField, FundsRecord, InstituteField,
    InstituteRecord, TourismField, TourismRecord,
};
pub use raw::{read_delimited, read_delimited_file, RawRow, RawTable, RawValue};
pub use schemas::{
    extract_year, normalize, ConservationSchema, DatasetSchema, FundsSchema, InstituteSchema,
    TourismSchema,
};

pub fn normalize_funds(table: &RawTable) -> Result<Vec<FundsRecord>, NormalizeError> {
    normalize(&FundsSchema, table)
}

pub fn normalize_tourism(table: &RawTable) -> Result<Vec<TourismRecord>, NormalizeError> {
    normalize(&TourismSchema, table)
}

pub fn normalize_conservation(
    table: &RawTable,
) -> Result<Vec<ConservationComponent>, NormalizeError> {
    normalize(&ConservationSchema, table)
}

pub fn normalize_institutes(table: &RawTable) -> Result<Vec<InstituteRecord>, NormalizeError> {
    normalize(&InstituteSchema, table)
}

use polars::prelude::*;

use crate::errors::NormalizeError;
use crate::model::{ConservationComponent, FundsRecord, InstituteRecord, TourismRecord};
use crate::schemas::{ConservationSchema, FundsSchema, InstituteSchema, TourismSchema};

fn build_frame(dataset: &'static str, columns: Vec<Column>) -> Result<DataFrame, NormalizeError> {
    DataFrame::new(columns).map_err(|err| NormalizeError::Frame {
        dataset,
        message: err.to_string(),
    })
}

fn column<T, F>(name: &str, records: &[T], value: F) -> Column
where
    F: Fn(&T) -> Option<f64>,
{
    let values: Vec<Option<f64>> = records.iter().map(value).collect();
    Series::new(name.into(), values).into()
}

fn int_column<T, F>(name: &str, records: &[T], value: F) -> Column
where
    F: Fn(&T) -> Option<i64>,
{
    let values: Vec<Option<i64>> = records.iter().map(value).collect();
    Series::new(name.into(), values).into()
}

fn text_column<T, F>(name: &str, records: &[T], value: F) -> Column
where
    F: Fn(&T) -> &str,
{
    let values: Vec<&str> = records.iter().map(value).collect();
    Series::new(name.into(), values).into()
}

fn year_column<T, F>(name: &str, records: &[T], value: F) -> Column
where
    F: Fn(&T) -> i32,
{
    let values: Vec<i32> = records.iter().map(value).collect();
    Series::new(name.into(), values).into()
}

pub fn funds_frame(records: &[FundsRecord]) -> Result<DataFrame, NormalizeError> {
    let [year, allocated, utilized] = FundsSchema::COLUMNS;
    build_frame(
        FundsSchema::NAME,
        vec![
            year_column(year, records, |r| r.year),
            column(allocated, records, |r| r.funds_allocated),
            column(utilized, records, |r| r.funds_utilized),
        ],
    )
}

pub fn tourism_frame(records: &[TourismRecord]) -> Result<DataFrame, NormalizeError> {
    let [year, foreign, local_earnings, foreign_earnings, domestic] = TourismSchema::COLUMNS;
    build_frame(
        TourismSchema::NAME,
        vec![
            year_column(year, records, |r| r.year),
            int_column(foreign, records, |r| r.foreign_arrivals),
            column(local_earnings, records, |r| r.earnings_local),
            column(foreign_earnings, records, |r| r.earnings_foreign),
            int_column(domestic, records, |r| r.domestic_visits),
        ],
    )
}

pub fn conservation_frame(records: &[ConservationComponent]) -> Result<DataFrame, NormalizeError> {
    let [component, description, cost] = ConservationSchema::COLUMNS;
    build_frame(
        ConservationSchema::NAME,
        vec![
            text_column(component, records, |r| r.component.as_str()),
            text_column(description, records, |r| r.description.as_str()),
            column(cost, records, |r| r.estimated_cost),
        ],
    )
}

pub fn institute_frame(records: &[InstituteRecord]) -> Result<DataFrame, NormalizeError> {
    let [state, count, capacity] = InstituteSchema::COLUMNS;
    build_frame(
        InstituteSchema::NAME,
        vec![
            text_column(state, records, |r| r.state_or_territory.as_str()),
            int_column(count, records, |r| r.institute_count),
            int_column(capacity, records, |r| r.intake_capacity),
        ],
    )
}

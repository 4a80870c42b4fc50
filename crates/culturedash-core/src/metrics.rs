//! Derived scalars over normalized collections.
//!
//! Missing cells (`None`) count as zero in [`aggregate`], are never extremum
//! candidates (nor are non-finite values), and sort after every present value in [`top_n`].

use std::cmp::Ordering;
use std::fmt;

use culturedash_parser::{
    ConservationComponent, ConservationField, FundsField, FundsRecord, InstituteField,
    InstituteRecord, TourismField, TourismRecord,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricError {
    #[error("cannot aggregate '{field}' over an empty collection")]
    EmptyCollection { field: String },

    #[error("denominator '{field}' sums to zero")]
    ZeroDenominator { field: String },
}

/// Key that orders a collection naturally; used to break extremum ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NaturalKey<'a> {
    Year(i32),
    Name(&'a str),
}

impl fmt::Display for NaturalKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaturalKey::Year(year) => write!(f, "{year}"),
            NaturalKey::Name(name) => f.write_str(name),
        }
    }
}

pub trait MetricRecord {
    type Field: Copy + fmt::Display;

    fn natural_key(&self) -> NaturalKey<'_>;

    fn value(&self, field: Self::Field) -> Option<f64>;
}

impl<T: MetricRecord + ?Sized> MetricRecord for &T {
    type Field = T::Field;

    fn natural_key(&self) -> NaturalKey<'_> {
        (**self).natural_key()
    }

    fn value(&self, field: Self::Field) -> Option<f64> {
        (**self).value(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    Avg,
}

/// The extreme value of a field and every record holding it, ordered by natural key.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremum<'a, R> {
    pub value: f64,
    pub holders: Vec<&'a R>,
}

impl<'a, R> Extremum<'a, R> {
    /// The holder with the smallest natural key.
    pub fn record(&self) -> &'a R {
        self.holders[0]
    }

    pub fn is_tied(&self) -> bool {
        self.holders.len() > 1
    }
}

/// Returns `None` when no record carries a finite value for `field`.
pub fn extremum<'a, R: MetricRecord>(
    records: &'a [R],
    field: R::Field,
    kind: ExtremumKind,
) -> Option<Extremum<'a, R>> {
    let value = records
        .iter()
        .filter_map(|record| record.value(field))
        .filter(|value| value.is_finite())
        .reduce(|best, candidate| match kind {
            ExtremumKind::Min => best.min(candidate),
            ExtremumKind::Max => best.max(candidate),
        })?;

    let mut holders: Vec<&R> = records
        .iter()
        .filter(|record| record.value(field) == Some(value))
        .collect();
    holders.sort_by(|a, b| a.natural_key().cmp(&b.natural_key()));

    Some(Extremum { value, holders })
}

/// First `n` records after a stable sort on `field`.
pub fn top_n<'a, R: MetricRecord>(
    records: &'a [R],
    field: R::Field,
    n: usize,
    order: SortOrder,
) -> Vec<&'a R> {
    let mut sorted: Vec<&R> = records.iter().collect();
    sorted.sort_by(|a, b| compare_values(a.value(field), b.value(field), order));
    sorted.truncate(n);
    sorted
}

pub fn aggregate<R: MetricRecord>(
    records: &[R],
    field: R::Field,
    op: AggregateOp,
) -> Result<f64, MetricError> {
    let total = field_sum(records, field);
    match op {
        AggregateOp::Sum => Ok(total),
        AggregateOp::Avg if records.is_empty() => Err(MetricError::EmptyCollection {
            field: field.to_string(),
        }),
        AggregateOp::Avg => Ok(total / records.len() as f64),
    }
}

/// `sum(numerator) / sum(denominator)` over the same collection.
pub fn ratio<R: MetricRecord>(
    records: &[R],
    numerator: R::Field,
    denominator: R::Field,
) -> Result<f64, MetricError> {
    if records.is_empty() {
        return Err(MetricError::EmptyCollection {
            field: numerator.to_string(),
        });
    }
    let bottom = field_sum(records, denominator);
    if bottom == 0.0 {
        return Err(MetricError::ZeroDenominator {
            field: denominator.to_string(),
        });
    }
    Ok(field_sum(records, numerator) / bottom)
}

/// Pearson correlation of two fields over the records carrying both. `None`
/// with fewer than two such records or when either field is constant.
pub fn correlation<R: MetricRecord>(records: &[R], x: R::Field, y: R::Field) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|record| Some((record.value(x)?, record.value(y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Values are added in ascending order so the result does not depend on input order.
fn field_sum<R: MetricRecord>(records: &[R], field: R::Field) -> f64 {
    let mut values: Vec<f64> = records
        .iter()
        .map(|record| record.value(field).unwrap_or(0.0))
        .collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

fn compare_values(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.total_cmp(&b),
            SortOrder::Desc => b.total_cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl MetricRecord for FundsRecord {
    type Field = FundsField;

    fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey::Year(self.year)
    }

    fn value(&self, field: FundsField) -> Option<f64> {
        match field {
            FundsField::Allocated => self.funds_allocated,
            FundsField::Utilized => self.funds_utilized,
        }
    }
}

impl MetricRecord for TourismRecord {
    type Field = TourismField;

    fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey::Year(self.year)
    }

    fn value(&self, field: TourismField) -> Option<f64> {
        match field {
            TourismField::ForeignArrivals => self.foreign_arrivals.map(|v| v as f64),
            TourismField::EarningsLocal => self.earnings_local,
            TourismField::EarningsForeign => self.earnings_foreign,
            TourismField::DomesticVisits => self.domestic_visits.map(|v| v as f64),
        }
    }
}

impl MetricRecord for ConservationComponent {
    type Field = ConservationField;

    fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey::Name(&self.component)
    }

    fn value(&self, field: ConservationField) -> Option<f64> {
        match field {
            ConservationField::EstimatedCost => self.estimated_cost,
        }
    }
}

impl MetricRecord for InstituteRecord {
    type Field = InstituteField;

    fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey::Name(&self.state_or_territory)
    }

    fn value(&self, field: InstituteField) -> Option<f64> {
        match field {
            InstituteField::InstituteCount => self.institute_count.map(|v| v as f64),
            InstituteField::IntakeCapacity => self.intake_capacity.map(|v| v as f64),
        }
    }
}

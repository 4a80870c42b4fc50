use culturedash_parser::{
    ConservationComponent, ConservationField, FundsField, FundsRecord, InstituteField,
    InstituteRecord, TourismField, TourismRecord,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::metrics::{
    aggregate, correlation, extremum, ratio, top_n, AggregateOp, ExtremumKind, MetricError,
    MetricRecord, SortOrder,
};
use crate::snapshot::Snapshot;

/// Length of the ranked institute lists.
pub const TOP_STATES: usize = 10;

fn required<R: MetricRecord + Clone>(
    records: &[R],
    field: R::Field,
    kind: ExtremumKind,
) -> Result<R, MetricError> {
    extremum(records, field, kind)
        .map(|found| found.record().clone())
        .ok_or_else(|| MetricError::EmptyCollection {
            field: field.to_string(),
        })
}

fn sum<R: MetricRecord>(records: &[R], field: R::Field) -> Result<f64, MetricError> {
    aggregate(records, field, AggregateOp::Sum)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsMetrics {
    pub max_funds_allocated: FundsRecord,
    pub min_funds_allocated: FundsRecord,
    pub max_funds_utilized: FundsRecord,
    pub min_funds_utilized: FundsRecord,
    pub total_funds_allocated: f64,
    pub total_funds_utilized: f64,
    /// Utilized over allocated; `None` when nothing was allocated.
    pub utilization_rate: Option<f64>,
}

impl FundsMetrics {
    pub fn compute(records: &[FundsRecord]) -> Result<Self, MetricError> {
        use ExtremumKind::{Max, Min};
        use FundsField::{Allocated, Utilized};

        let utilization_rate = match ratio(records, Utilized, Allocated) {
            Ok(rate) => Some(rate),
            Err(MetricError::ZeroDenominator { .. }) => None,
            Err(err) => return Err(err),
        };

        Ok(Self {
            max_funds_allocated: required(records, Allocated, Max)?,
            min_funds_allocated: required(records, Allocated, Min)?,
            max_funds_utilized: required(records, Utilized, Max)?,
            min_funds_utilized: required(records, Utilized, Min)?,
            total_funds_allocated: sum(records, Allocated)?,
            total_funds_utilized: sum(records, Utilized)?,
            utilization_rate,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourismMetrics {
    pub min_domestic_visits: TourismRecord,
    pub max_domestic_visits: TourismRecord,
    pub min_foreign_arrivals: TourismRecord,
    pub max_foreign_arrivals: TourismRecord,
    pub total_earnings_local: f64,
}

impl TourismMetrics {
    pub fn compute(records: &[TourismRecord]) -> Result<Self, MetricError> {
        use ExtremumKind::{Max, Min};
        use TourismField::{DomesticVisits, EarningsLocal, ForeignArrivals};

        Ok(Self {
            min_domestic_visits: required(records, DomesticVisits, Min)?,
            max_domestic_visits: required(records, DomesticVisits, Max)?,
            min_foreign_arrivals: required(records, ForeignArrivals, Min)?,
            max_foreign_arrivals: required(records, ForeignArrivals, Max)?,
            total_earnings_local: sum(records, EarningsLocal)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConservationMetrics {
    pub component_count: usize,
    pub total_estimated_cost: f64,
    pub costliest_component: ConservationComponent,
}

impl ConservationMetrics {
    pub fn compute(records: &[ConservationComponent]) -> Result<Self, MetricError> {
        let field = ConservationField::EstimatedCost;
        Ok(Self {
            component_count: records.len(),
            total_estimated_cost: round2(sum(records, field)?),
            costliest_component: required(records, field, ExtremumKind::Max)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstituteMetrics {
    pub sorted_by_intake_capacity: Vec<InstituteRecord>,
    pub top10_by_intake_capacity: Vec<InstituteRecord>,
    pub top10_by_institute_count: Vec<InstituteRecord>,
    pub top_state_by_intake_capacity: InstituteRecord,
    pub top_state_by_institute_count: InstituteRecord,
    pub total_institute_count: i64,
    pub total_intake_capacity: i64,
    /// Total intake capacity over total institutes, rounded to two decimals.
    pub average_intake_per_institute: f64,
    /// Correlation between institute count and intake capacity across states.
    pub count_capacity_correlation: Option<f64>,
}

impl InstituteMetrics {
    pub fn compute(records: &[InstituteRecord]) -> Result<Self, MetricError> {
        use InstituteField::{InstituteCount, IntakeCapacity};

        let ranked = |field: InstituteField, n: usize| -> Vec<InstituteRecord> {
            top_n(records, field, n, SortOrder::Desc)
                .into_iter()
                .cloned()
                .collect()
        };

        Ok(Self {
            sorted_by_intake_capacity: ranked(IntakeCapacity, records.len()),
            top10_by_intake_capacity: ranked(IntakeCapacity, TOP_STATES),
            top10_by_institute_count: ranked(InstituteCount, TOP_STATES),
            top_state_by_intake_capacity: required(records, IntakeCapacity, ExtremumKind::Max)?,
            top_state_by_institute_count: required(records, InstituteCount, ExtremumKind::Max)?,
            total_institute_count: sum(records, InstituteCount)? as i64,
            total_intake_capacity: sum(records, IntakeCapacity)? as i64,
            average_intake_per_institute: round2(ratio(records, IntakeCapacity, InstituteCount)?),
            count_capacity_correlation: correlation(records, InstituteCount, IntakeCapacity),
        })
    }
}

/// Normalized snapshot plus the derived metrics of every view.
///
/// A view whose metrics fail keeps its error; the other views are unaffected.
#[derive(Debug)]
pub struct Dashboard {
    pub snapshot: Snapshot,
    pub funds: Result<FundsMetrics, MetricError>,
    pub tourism: Result<TourismMetrics, MetricError>,
    pub conservation: Result<ConservationMetrics, MetricError>,
    pub institutes: Result<InstituteMetrics, MetricError>,
}

impl Dashboard {
    pub fn build(snapshot: Snapshot) -> Self {
        let dashboard = Self {
            funds: FundsMetrics::compute(&snapshot.funds),
            tourism: TourismMetrics::compute(&snapshot.tourism),
            conservation: ConservationMetrics::compute(&snapshot.conservation),
            institutes: InstituteMetrics::compute(&snapshot.institutes),
            snapshot,
        };
        for (view, error) in dashboard.failures() {
            warn!(view, %error, "view metrics unavailable");
        }
        dashboard
    }

    pub fn failures(&self) -> Vec<(&'static str, &MetricError)> {
        [
            ("funds", self.funds.as_ref().err()),
            ("tourism", self.tourism.as_ref().err()),
            ("conservation", self.conservation.as_ref().err()),
            ("institutes", self.institutes.as_ref().err()),
        ]
        .into_iter()
        .filter_map(|(view, error)| error.map(|error| (view, error)))
        .collect()
    }

    /// Metrics of every view keyed by dataset; failed views carry an `error` entry.
    pub fn metrics_json(&self) -> Value {
        json!({
            "funds": view_json(&self.funds),
            "tourism": view_json(&self.tourism),
            "conservation": view_json(&self.conservation),
            "institutes": view_json(&self.institutes),
        })
    }
}

fn view_json<T: Serialize>(view: &Result<T, MetricError>) -> Value {
    match view {
        Ok(metrics) => serde_json::to_value(metrics)
            .unwrap_or_else(|err| json!({ "error": err.to_string() })),
        Err(err) => json!({ "error": err.to_string() }),
    }
}

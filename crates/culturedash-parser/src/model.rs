use std::fmt;

use serde::{Deserialize, Serialize};

/// Ministry of Culture allocation and utilization for one fiscal year (₹ crore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsRecord {
    pub year: i32,
    pub funds_allocated: Option<f64>,
    pub funds_utilized: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourismRecord {
    pub year: i32,
    pub foreign_arrivals: Option<i64>,
    /// Foreign exchange earnings in ₹ crore.
    pub earnings_local: Option<f64>,
    /// Foreign exchange earnings in US$ million.
    pub earnings_foreign: Option<f64>,
    pub domestic_visits: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConservationComponent {
    pub component: String,
    pub description: String,
    /// ₹ crore.
    pub estimated_cost: Option<f64>,
}

/// ITI/ITC counts for one state or union territory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstituteRecord {
    pub state_or_territory: String,
    pub institute_count: Option<i64>,
    pub intake_capacity: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundsField {
    Allocated,
    Utilized,
}

impl FundsField {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            FundsField::Allocated => "funds_allocated_cr",
            FundsField::Utilized => "funds_utilized_cr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TourismField {
    ForeignArrivals,
    EarningsLocal,
    EarningsForeign,
    DomesticVisits,
}

impl TourismField {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            TourismField::ForeignArrivals => "foreign_arrivals",
            TourismField::EarningsLocal => "earnings_local_cr",
            TourismField::EarningsForeign => "earnings_foreign_usd",
            TourismField::DomesticVisits => "domestic_visits",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConservationField {
    EstimatedCost,
}

impl ConservationField {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ConservationField::EstimatedCost => "estimated_cost_cr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstituteField {
    InstituteCount,
    IntakeCapacity,
}

impl InstituteField {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            InstituteField::InstituteCount => "institute_count",
            InstituteField::IntakeCapacity => "intake_capacity",
        }
    }
}

macro_rules! display_canonical {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.canonical_name())
                }
            }
        )*
    };
}

display_canonical!(FundsField, TourismField, ConservationField, InstituteField);

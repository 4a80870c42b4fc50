use crate::errors::NormalizeError;
use crate::model::{ConservationComponent, ConservationField};
use crate::raw::RawRow;

use super::{parse_optional_f64, parse_text, DatasetSchema};

pub struct ConservationSchema;

impl ConservationSchema {
    pub const NAME: &'static str = "conservation";
    pub const COLUMNS: [&'static str; 3] = ["component", "description", "estimated_cost_cr"];
}

impl DatasetSchema for ConservationSchema {
    type Record = ConservationComponent;

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
    ) -> Result<ConservationComponent, NormalizeError> {
        Ok(ConservationComponent {
            component: parse_text(&row[0]),
            description: parse_text(&row[1]),
            estimated_cost: parse_optional_f64(
                Self::NAME,
                &row[2],
                row_index,
                ConservationField::EstimatedCost.canonical_name(),
            )?,
        })
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::NormalizeError;
use crate::raw::{RawTable, RawValue};

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[0-9]+").expect("digit run pattern is valid"));

const MISSING_MARKERS: &[&str] = &["nan", "null", "na", "n/a", "-"];

/// Returns the first maximal run of exactly four ASCII digits in `value`.
///
/// Runs of any other length are skipped, so `"2015-16"` yields 2015 and
/// `"12345"` yields nothing. Longer runs such as `"201516"` are rejected
/// rather than truncated to their first four digits.
pub fn extract_year(value: &str) -> Option<i32> {
    DIGIT_RUN
        .find_iter(value)
        .map(|run| run.as_str())
        .find(|run| run.len() == 4)
        .and_then(|run| run.parse::<i32>().ok())
}

pub(crate) fn check_shape(
    dataset: &'static str,
    expected: usize,
    table: &RawTable,
) -> Result<(), NormalizeError> {
    for (row_index, row) in table.rows.iter().enumerate() {
        if row.len() != expected {
            return Err(NormalizeError::SchemaShape {
                dataset,
                row_index,
                expected,
                found: row.len(),
            });
        }
    }
    Ok(())
}

pub(crate) fn parse_year(
    dataset: &'static str,
    value: &RawValue,
    row_index: usize,
) -> Result<i32, NormalizeError> {
    let text = match value {
        RawValue::Decimal(number) if number.fract() == 0.0 => format!("{}", *number as i64),
        other => other.to_string(),
    };
    extract_year(&text).ok_or_else(|| NormalizeError::MalformedYear {
        dataset,
        row_index,
        value: text.trim().to_string(),
    })
}

pub(crate) fn parse_optional_f64(
    dataset: &'static str,
    value: &RawValue,
    row_index: usize,
    column: &'static str,
) -> Result<Option<f64>, NormalizeError> {
    let mismatch = |raw: &str| NormalizeError::TypeCoercion {
        dataset,
        row_index,
        column,
        value: raw.to_string(),
        expected: "a decimal number",
    };

    match value {
        RawValue::Null => Ok(None),
        RawValue::Integer(number) => Ok(Some(*number as f64)),
        RawValue::Decimal(number) if number.is_nan() => Ok(None),
        RawValue::Decimal(number) if number.is_finite() => Ok(Some(*number)),
        RawValue::Decimal(number) => Err(mismatch(&number.to_string())),
        RawValue::Text(text) => {
            let Some(cleaned) = clean_numeric(text) else {
                return Ok(None);
            };
            match cleaned.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
                _ => Err(mismatch(text.trim())),
            }
        }
    }
}

pub(crate) fn parse_optional_i64(
    dataset: &'static str,
    value: &RawValue,
    row_index: usize,
    column: &'static str,
) -> Result<Option<i64>, NormalizeError> {
    let mismatch = |raw: &str| NormalizeError::TypeCoercion {
        dataset,
        row_index,
        column,
        value: raw.to_string(),
        expected: "an integer",
    };

    match value {
        RawValue::Null => Ok(None),
        RawValue::Integer(number) => Ok(Some(*number)),
        RawValue::Decimal(number) if number.is_nan() => Ok(None),
        RawValue::Decimal(number) => {
            whole_number(*number).map(Some).ok_or_else(|| mismatch(&number.to_string()))
        }
        RawValue::Text(text) => {
            let Some(cleaned) = clean_numeric(text) else {
                return Ok(None);
            };
            if let Ok(parsed) = cleaned.parse::<i64>() {
                return Ok(Some(parsed));
            }
            cleaned
                .parse::<f64>()
                .ok()
                .and_then(whole_number)
                .map(Some)
                .ok_or_else(|| mismatch(text.trim()))
        }
    }
}

pub(crate) fn parse_text(value: &RawValue) -> String {
    value.to_string().trim().to_string()
}

/// Trims and strips thousands separators; `None` means the cell is missing.
fn clean_numeric(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return None;
    }
    Some(trimmed.replace(',', ""))
}

fn whole_number(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

//! Feature construction for a (date, commodity) pair.
//!
//! Must match the training pipeline column for column:
//!
//! - `month`: calendar month (1–12)
//! - `week`: ISO 8601 week number (1–53). Dates in late December can fall in
//!   week 1 and dates in early January in week 52/53.
//! - `year`: calendar year of the date (not the ISO week-based year)
//! - `month_sin`, `month_cos`: the month on the unit circle, so December and
//!   January are neighbours
//! - `commodity`: vocabulary code, or unrecognized

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};

use crate::domain::FeatureVector;
use crate::error::PredictError;
use crate::features::CommodityVocabulary;

/// Canonical date format accepted by every operation.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, PredictError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| PredictError::InvalidDateFormat {
        input: input.to_string(),
    })
}

/// `(sin, cos)` of the month's angle on a 12-step circle.
pub fn cyclical_month(month: u32) -> (f64, f64) {
    let angle = 2.0 * PI * f64::from(month) / 12.0;
    (angle.sin(), angle.cos())
}

/// Build the model input row for `commodity` on `date`.
pub fn build_features(date: NaiveDate, commodity: &str, vocabulary: &CommodityVocabulary) -> FeatureVector {
    let month = date.month();
    let (month_sin, month_cos) = cyclical_month(month);

    FeatureVector {
        commodity: vocabulary.code(commodity),
        month,
        week: date.iso_week().week(),
        year: date.year(),
        month_sin,
        month_cos,
    }
}

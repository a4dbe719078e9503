//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the feature builder, the models and the predictor
//! - printed as JSON by the CLI
//! - exported to disk and reloaded later for plotting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value fed to the model for a commodity outside the vocabulary.
///
/// Tree ensembles route it down the "missing" branch; linear models add no
/// commodity effect for it.
pub const UNRECOGNIZED_FEATURE_VALUE: f64 = f64::NAN;

/// Categorical code of a commodity within the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommodityCode {
    /// Index of the commodity in the ordered vocabulary.
    Known(u32),
    /// The commodity is not part of the vocabulary.
    Unrecognized,
}

impl CommodityCode {
    pub fn index(self) -> Option<usize> {
        match self {
            CommodityCode::Known(code) => Some(code as usize),
            CommodityCode::Unrecognized => None,
        }
    }

    /// Numeric model input for this code.
    pub fn as_feature(self) -> f64 {
        match self {
            CommodityCode::Known(code) => f64::from(code),
            CommodityCode::Unrecognized => UNRECOGNIZED_FEATURE_VALUE,
        }
    }
}

/// Named model input columns, in training column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Commodity,
    Month,
    Week,
    Year,
    MonthSin,
    MonthCos,
}

/// One model input row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub commodity: CommodityCode,
    /// Calendar month, 1–12.
    pub month: u32,
    /// ISO 8601 week number, 1–53.
    pub week: u32,
    /// Calendar year of the date.
    pub year: i32,
    pub month_sin: f64,
    pub month_cos: f64,
}

impl FeatureVector {
    /// Numeric value of a single column.
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Commodity => self.commodity.as_feature(),
            Feature::Month => f64::from(self.month),
            Feature::Week => f64::from(self.week),
            Feature::Year => f64::from(self.year),
            Feature::MonthSin => self.month_sin,
            Feature::MonthCos => self.month_cos,
        }
    }
}

/// A single predicted price for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_price: f64,
}

/// Predicted prices for consecutive calendar days, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastSeries {
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastPoint> {
        self.points.iter()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Minimum and maximum predicted price, if the series is non-empty.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.points.iter().map(|p| p.predicted_price);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a ForecastPoint;
    type IntoIter = std::slice::Iter<'a, ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// When to sow so that the harvest lands on the forecast price peak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SowingRecommendation {
    pub commodity: String,
    /// May be earlier than today: the window is already open or has passed.
    pub best_sowing_date: NaiveDate,
    pub expected_harvest_date: NaiveDate,
    pub expected_peak_price: f64,
}

impl SowingRecommendation {
    /// Days between sowing and harvest.
    pub fn crop_duration_days(&self) -> i64 {
        (self.expected_harvest_date - self.best_sowing_date).num_days()
    }
}

/// A saved forecast file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastFile {
    pub tool: String,
    pub model: String,
    pub commodity: String,
    pub predictions: ForecastSeries,
}

//! Single-date and ranged price prediction.
//!
//! Every operation:
//! 1. parses/validates its inputs
//! 2. rejects commodities outside the vocabulary (`UnknownCommodity`)
//! 3. builds feature rows and calls the model (one batch for a range)
//! 4. rounds prices to 2 decimals and rejects non-finite output

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::domain::{ForecastPoint, ForecastSeries};
use crate::error::PredictError;
use crate::features::{build_features, parse_date};
use crate::predict::ModelContext;

/// Round a raw model output to 2 decimal places.
///
/// Rounds the exact binary value, ties to even: 2.675 (stored just below the
/// half-cent) gives 2.67 and 0.125 gives 0.12.
pub fn round_price(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Price predictor over a shared, immutable model context.
///
/// Cloning is cheap: clones share the same context.
#[derive(Debug, Clone)]
pub struct Predictor {
    context: Arc<ModelContext>,
}

impl Predictor {
    pub fn new(context: Arc<ModelContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ModelContext {
        &self.context
    }

    /// Supported commodity names, in vocabulary order.
    pub fn commodities(&self) -> &[String] {
        self.context.vocabulary().names()
    }

    /// Predicted price for `commodity` on `date` (`YYYY-MM-DD`).
    pub fn predict_price(&self, date: &str, commodity: &str) -> Result<f64, PredictError> {
        let date = parse_date(date)?;
        self.predict_price_on(date, commodity)
    }

    pub fn predict_price_on(&self, date: NaiveDate, commodity: &str) -> Result<f64, PredictError> {
        self.ensure_known(commodity)?;

        let row = build_features(date, commodity, self.context.vocabulary());
        let price = finalize_price(date, self.context.model().predict(&row))?;

        tracing::debug!(%date, commodity, price, "predicted price");
        Ok(price)
    }

    /// Predicted prices for `days` consecutive days starting at `start_date` (inclusive).
    pub fn predict_range(&self, start_date: &str, commodity: &str, days: i64) -> Result<ForecastSeries, PredictError> {
        let start = parse_date(start_date)?;
        self.predict_range_from(start, commodity, days)
    }

    pub fn predict_range_from(
        &self,
        start: NaiveDate,
        commodity: &str,
        days: i64,
    ) -> Result<ForecastSeries, PredictError> {
        let dates = consecutive_dates(start, days)?;
        self.ensure_known(commodity)?;

        let vocabulary = self.context.vocabulary();
        let rows: Vec<_> = dates
            .iter()
            .map(|&date| build_features(date, commodity, vocabulary))
            .collect();
        let raw = self.context.model().predict_batch(&rows);
        if raw.len() != rows.len() {
            return Err(PredictError::PredictionCountMismatch {
                expected: rows.len(),
                actual: raw.len(),
            });
        }

        let points = dates
            .into_iter()
            .zip(raw)
            .map(|(date, value)| {
                Ok(ForecastPoint {
                    date,
                    predicted_price: finalize_price(date, value)?,
                })
            })
            .collect::<Result<Vec<_>, PredictError>>()?;

        tracing::debug!(%start, commodity, days, "predicted range");
        Ok(ForecastSeries::new(points))
    }

    pub(crate) fn ensure_known(&self, commodity: &str) -> Result<(), PredictError> {
        if self.context.vocabulary().contains(commodity) {
            return Ok(());
        }
        tracing::warn!(commodity, "rejected commodity outside the model vocabulary");
        Err(PredictError::UnknownCommodity {
            commodity: commodity.to_string(),
        })
    }
}

fn finalize_price(date: NaiveDate, value: f64) -> Result<f64, PredictError> {
    if !value.is_finite() {
        return Err(PredictError::InvalidPrediction { date, value });
    }
    Ok(round_price(value))
}

/// `days` consecutive dates from `start`, checking the whole span is representable.
fn consecutive_dates(start: NaiveDate, days: i64) -> Result<Vec<NaiveDate>, PredictError> {
    if days < 0 {
        return Err(PredictError::invalid_parameter("days", days, "must be >= 0"));
    }
    if days == 0 {
        return Ok(Vec::new());
    }

    let last_offset = (days - 1) as u64;
    if start.checked_add_days(Days::new(last_offset)).is_none() {
        return Err(PredictError::invalid_parameter(
            "days",
            days,
            format!("range starting {start} runs past the supported calendar"),
        ));
    }

    Ok(start.iter_days().take(days as usize).collect())
}

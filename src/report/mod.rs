//! Reporting: text formatting and JSON response bodies.
//!
//! The JSON shapes match what the prediction service returns, so `--json`
//! output can be consumed by the same clients.

use serde::Serialize;

use crate::domain::ForecastSeries;
use crate::error::{AppError, EXIT_RUNTIME};

pub mod format;

pub use format::*;

#[derive(Debug, Clone, Serialize)]
pub struct CommoditiesResponse<'a> {
    pub commodities: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    pub predicted_modal_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeResponse<'a> {
    pub commodity: &'a str,
    pub predictions: &'a ForecastSeries,
}

/// Serialize a response body as pretty JSON.
pub fn to_json<T: Serialize>(body: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(body)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to serialize JSON output: {e}")))
}

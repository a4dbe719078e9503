//! Read/write forecast JSON files.
//!
//! Forecast JSON is the portable representation of one ranged prediction:
//! the model that produced it, the commodity, and the dated prices. `mandi plot`
//! reads it back. The schema is defined by `domain::ForecastFile`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::domain::{ForecastFile, ForecastSeries};
use crate::error::{AppError, EXIT_INPUT};

/// Write a forecast JSON file.
pub fn write_forecast_json(
    path: &Path,
    model: &str,
    commodity: &str,
    series: &ForecastSeries,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create forecast JSON '{}': {e}", path.display())))?;

    let forecast = ForecastFile {
        tool: "mandi".to_string(),
        model: model.to_string(),
        commodity: commodity.to_string(),
        predictions: series.clone(),
    };

    serde_json::to_writer_pretty(BufWriter::new(file), &forecast)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write forecast JSON: {e}")))?;

    Ok(())
}

/// Read a forecast JSON file.
pub fn read_forecast_json(path: &Path) -> Result<ForecastFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open forecast JSON '{}': {e}", path.display())))?;
    let forecast: ForecastFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid forecast JSON: {e}")))?;

    let ordered = forecast
        .predictions
        .points
        .windows(2)
        .all(|w| w[0].date < w[1].date);
    if !ordered {
        return Err(AppError::new(
            EXIT_INPUT,
            format!("Forecast JSON '{}' is not in chronological order.", path.display()),
        ));
    }
    Ok(forecast)
}
